//! Score-ordered projection of a [`crate::ScoredSet`].
//!
//! # Role
//!
//! Holds `ScoreKey -> element` in ascending key order and owns the mutation
//! sequence number. Every write section that changes membership bumps the
//! sequence before releasing the lock, so a reader holding the read lock sees
//! a map and a sequence number that belong together.
//!
//! # Invariants
//!
//! - At most one entry per element at every moment: a score update retires the
//!   old key and inserts the new one inside a single write section.
//! - Callers hold the element's identity shard while mutating here (every shard,
//!   for [`OrderedStore::truncate_below`] and [`OrderedStore::clear`]); this
//!   module never takes a shard lock itself.

use std::collections::BTreeMap;
use std::ops::RangeBounds;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::key::ScoreKey;
use crate::score::Score;

pub(crate) struct OrderedStore<N: Score, T> {
	map: RwLock<BTreeMap<ScoreKey<N>, T>>,
	seq: AtomicU64,
}

impl<N: Score, T> OrderedStore<N, T> {
	pub(crate) fn new() -> Self {
		Self {
			map: RwLock::new(BTreeMap::new()),
			seq: AtomicU64::new(0),
		}
	}

	/// Mutation sequence number as of the last completed write section.
	#[inline]
	pub(crate) fn seq(&self) -> u64 {
		self.seq.load(Ordering::Acquire)
	}

	#[inline]
	fn bump(&self) {
		self.seq.fetch_add(1, Ordering::Release);
	}

	/// Retires `old` (if any) and inserts `key -> element` as one step.
	///
	/// Returns the element that was stored under `old`.
	pub(crate) fn replace(
		&self,
		old: Option<&ScoreKey<N>>,
		key: ScoreKey<N>,
		element: T,
	) -> Option<T> {
		let mut map = self.map.write();
		let retired = old.and_then(|old| map.remove(old));
		map.insert(key, element);
		self.bump();
		retired
	}

	pub(crate) fn remove(&self, key: &ScoreKey<N>) -> Option<T> {
		let mut map = self.map.write();
		let removed = map.remove(key);
		if removed.is_some() {
			self.bump();
		}
		removed
	}

	/// Splits off every entry strictly below `boundary` in one write section.
	///
	/// The sequence advances once, and only if something was removed.
	pub(crate) fn truncate_below(&self, boundary: &ScoreKey<N>) -> BTreeMap<ScoreKey<N>, T> {
		let mut map = self.map.write();
		if map.first_key_value().is_none_or(|(k, _)| k >= boundary) {
			return BTreeMap::new();
		}
		let kept = map.split_off(boundary);
		let evicted = std::mem::replace(&mut *map, kept);
		self.bump();
		evicted
	}

	/// Drops every entry. Returns how many were removed.
	pub(crate) fn clear(&self) -> usize {
		let mut map = self.map.write();
		let removed = map.len();
		map.clear();
		self.bump();
		removed
	}

	pub(crate) fn len(&self) -> usize {
		self.map.read().len()
	}

	pub(crate) fn first_key(&self) -> Option<ScoreKey<N>> {
		self.map.read().first_key_value().map(|(k, _)| *k)
	}

	pub(crate) fn last_key(&self) -> Option<ScoreKey<N>> {
		self.map.read().last_key_value().map(|(k, _)| *k)
	}

	/// Runs `f` against the map and the matching sequence number under one read lock.
	pub(crate) fn read_with<R>(
		&self,
		f: impl FnOnce(&BTreeMap<ScoreKey<N>, T>, u64) -> R,
	) -> R {
		let map = self.map.read();
		f(&map, self.seq())
	}
}

impl<N: Score, T: Clone> OrderedStore<N, T> {
	pub(crate) fn first(&self) -> Option<(T, N)> {
		self.map
			.read()
			.first_key_value()
			.map(|(k, e)| (e.clone(), k.raw()))
	}

	pub(crate) fn last(&self) -> Option<(T, N)> {
		self.map
			.read()
			.last_key_value()
			.map(|(k, e)| (e.clone(), k.raw()))
	}

	/// Appends every element in `[lo, hi]` to `out`, ascending.
	///
	/// An inverted range appends nothing.
	pub(crate) fn range_into(&self, lo: ScoreKey<N>, hi: ScoreKey<N>, out: &mut Vec<T>) {
		if lo > hi {
			return;
		}
		self.collect_range(lo..=hi, |_, e| out.push(e.clone()));
	}

	/// Every `(element, raw score)`, ascending.
	pub(crate) fn to_vec(&self) -> Vec<(T, N)> {
		let map = self.map.read();
		map.iter().map(|(k, e)| (e.clone(), k.raw())).collect()
	}

	fn collect_range<R>(&self, range: R, mut visit: impl FnMut(&ScoreKey<N>, &T))
	where
		R: RangeBounds<ScoreKey<N>>,
	{
		let map = self.map.read();
		for (k, e) in map.range(range) {
			visit(k, e);
		}
	}
}
