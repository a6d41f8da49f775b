//! Sharded identity index: element -> current [`ScoreKey`].
//!
//! The shard guard doubles as the per-element mutation lock. A facade operation
//! that changes an element's membership takes the shard write guard first and
//! keeps it until the ordered store has been updated, so mutations of one
//! element never interleave. Lock order is always shard, then ordered store.

use std::hash::{BuildHasher, Hash};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::key::ScoreKey;
use crate::score::Score;

pub(crate) type Shard<N, T> = FxHashMap<T, ScoreKey<N>>;

pub(crate) const MAX_SHARDS: usize = 1024;

pub(crate) struct IdentityIndex<N: Score, T> {
	shards: Box<[RwLock<Shard<N, T>>]>,
	mask: usize,
	hasher: FxBuildHasher,
}

impl<N: Score, T: Eq + Hash> IdentityIndex<N, T> {
	/// Creates an index with `shards` rounded up to a power of two in `1..=MAX_SHARDS`.
	pub(crate) fn new(shards: usize) -> Self {
		let count = shards.clamp(1, MAX_SHARDS).next_power_of_two();
		let shards = (0..count)
			.map(|_| RwLock::new(FxHashMap::default()))
			.collect::<Vec<_>>()
			.into_boxed_slice();
		Self {
			shards,
			mask: count - 1,
			hasher: FxBuildHasher,
		}
	}

	#[cfg(test)]
	pub(crate) fn shard_count(&self) -> usize {
		self.shards.len()
	}

	/// Position of `element`'s shard, matching the order of [`Self::write_all`].
	#[inline]
	pub(crate) fn shard_index(&self, element: &T) -> usize {
		// High bits: the per-shard map buckets by the low bits of the same hash.
		let hash = self.hasher.hash_one(element);
		(hash >> 48) as usize & self.mask
	}

	#[inline]
	fn shard_of(&self, element: &T) -> &RwLock<Shard<N, T>> {
		&self.shards[self.shard_index(element)]
	}

	pub(crate) fn read(&self, element: &T) -> RwLockReadGuard<'_, Shard<N, T>> {
		self.shard_of(element).read()
	}

	pub(crate) fn write(&self, element: &T) -> RwLockWriteGuard<'_, Shard<N, T>> {
		self.shard_of(element).write()
	}

	pub(crate) fn get(&self, element: &T) -> Option<ScoreKey<N>> {
		self.read(element).get(element).copied()
	}

	pub(crate) fn contains(&self, element: &T) -> bool {
		self.read(element).contains_key(element)
	}

	/// Sum of shard sizes. Not atomic across shards.
	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.shards.iter().map(|s| s.read().len()).sum()
	}

	/// Write-locks every shard in index order.
	pub(crate) fn write_all(&self) -> Vec<RwLockWriteGuard<'_, Shard<N, T>>> {
		self.shards.iter().map(|s| s.write()).collect()
	}
}
