//! Point-in-time identity views.
//!
//! # Role
//!
//! A [`Snapshot`] is an immutable element -> [`ScoreKey`] mapping tagged with the
//! mutation sequence number it was captured at. The facade publishes the latest
//! one through an `ArcSwap` so repeated calls without intervening mutation hand
//! back the same `Arc`.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::key::ScoreKey;
use crate::score::Score;

/// Immutable copy of a set's membership at one sequence number.
pub struct Snapshot<N: Score, T> {
	seq: u64,
	entries: FxHashMap<T, ScoreKey<N>>,
}

impl<N: Score, T: Eq + Hash + Clone> Snapshot<N, T> {
	pub(crate) fn empty() -> Self {
		Self {
			seq: 0,
			entries: FxHashMap::default(),
		}
	}

	/// Inverts the ordered projection; it holds one entry per member.
	pub(crate) fn capture(ordered: &BTreeMap<ScoreKey<N>, T>, seq: u64) -> Self {
		let mut entries = FxHashMap::with_capacity_and_hasher(ordered.len(), Default::default());
		for (key, element) in ordered {
			let prev = entries.insert(element.clone(), *key);
			debug_assert!(prev.is_none(), "ordered store held two keys for one element");
		}
		Self { seq, entries }
	}

	/// Mutation sequence number this snapshot reflects.
	pub fn seq(&self) -> u64 {
		self.seq
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, element: &T) -> Option<&ScoreKey<N>> {
		self.entries.get(element)
	}

	/// Raw score of `element` at capture time.
	pub fn score(&self, element: &T) -> Option<N> {
		self.entries.get(element).map(ScoreKey::raw)
	}

	pub fn contains(&self, element: &T) -> bool {
		self.entries.contains_key(element)
	}

	/// Unordered `(element, key)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&T, &ScoreKey<N>)> + '_ {
		self.entries.iter()
	}

	/// Elements in ascending key order.
	pub fn ordered(&self) -> Vec<(&T, &ScoreKey<N>)> {
		let mut out: Vec<_> = self.entries.iter().collect();
		out.sort_unstable_by(|a, b| a.1.cmp(b.1));
		out
	}
}

impl<N: Score, T: std::fmt::Debug> std::fmt::Debug for Snapshot<N, T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Snapshot")
			.field("seq", &self.seq)
			.field("len", &self.entries.len())
			.finish()
	}
}
