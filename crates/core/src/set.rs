//! Thread-safe score-ordered set.
//!
//! # Role
//!
//! [`ScoredSet`] keeps two views of one membership: an [`OrderedStore`] sorted
//! by [`ScoreKey`] and an [`IdentityIndex`] keyed by element. Every public
//! operation goes through here.
//!
//! # Concurrency
//!
//! - **Identity reads** (`contains`, `score`): one shard read lock.
//! - **Ordered reads** (`len`, `range_query`, `min_score`, ...): one read lock on
//!   the ordered store; a single call sees one consistent ordering.
//! - **Mutations**: the element's shard write lock is held across the ordered
//!   update, so concurrent mutations of the same element serialize and can never
//!   orphan an entry in either view.
//! - **Bulk mutations** (`remove_all_less_than`, `clear`): every shard write lock
//!   in index order, then one ordered write section.
//! - The ordered store is a single `RwLock<BTreeMap>`. Identity reads scale with
//!   the shard count, but every mutation and every ordered read passes through
//!   that one lock; writers to different elements contend there.
//! - **Snapshots**: captured from the ordered store under its read lock and
//!   published with a CAS loop that never replaces a newer snapshot with an
//!   older one.
//!
//! # Invariants
//!
//! - For every element `e` with index entry `e -> k`, the ordered store holds
//!   `k -> e` and no other entry for `e`, whenever no mutation of `e` is in flight.
//!   - Enforced in: `ScoredSet::insert`, [`ScoredSet::remove`],
//!     [`ScoredSet::remove_all_less_than`], [`ScoredSet::clear`].
//!   - Tested by: `tests::test_concurrent_same_element_adds_stay_consistent`.
//! - An eviction is visible all at once or not at all.
//!   - Enforced in: [`ScoredSet::remove_all_less_than`].
//!   - Tested by: `tests::test_eviction_is_atomic_to_snapshots`.
//! - Re-adding an element always mints a fresh, larger tie-breaker.
//!   - Enforced in: `ScoredSet::insert`.
//!   - Tested by: `tests::test_readd_moves_to_most_recent_among_peers`.

use std::hash::Hash;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, trace};

use crate::error::ScoreError;
use crate::index::IdentityIndex;
use crate::key::{ScoreKey, TieBreaker};
use crate::options::ScoredSetOptions;
use crate::ordered::OrderedStore;
use crate::score::Score;
use crate::snapshot::Snapshot;

/// A concurrent set of elements ordered by score.
///
/// Equal scores are ordered by insertion recency; re-adding an element moves it
/// behind its same-scored peers.
pub struct ScoredSet<N: Score, T> {
	label: Box<str>,
	tie_breaker: TieBreaker,
	ordered: OrderedStore<N, T>,
	index: IdentityIndex<N, T>,
	snap: ArcSwap<Snapshot<N, T>>,
}

impl<N: Score, T: Eq + Hash + Clone> ScoredSet<N, T> {
	pub fn new() -> Self {
		Self::with_options(ScoredSetOptions::default())
	}

	pub fn with_options(options: ScoredSetOptions) -> Self {
		Self {
			label: options.label.into_boxed_str(),
			tie_breaker: TieBreaker::new(),
			ordered: OrderedStore::new(),
			index: IdentityIndex::new(options.shards),
			snap: ArcSwap::from_pointee(Snapshot::empty()),
		}
	}

	/// Label attached to this set's log events.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Inserts `element` with `score`, replacing any score it already had.
	///
	/// Non-finite scores are accepted: NaN sorts above `+inf`. Use
	/// [`Self::try_add`] to reject them instead.
	pub fn add(&self, score: N, element: T) {
		self.insert(score, element);
	}

	/// Like [`Self::add`] but rejects NaN and infinities.
	///
	/// Returns the element's previous raw score, if it was a member.
	pub fn try_add(&self, score: N, element: T) -> Result<Option<N>, ScoreError> {
		let value = score.to_f64();
		if !value.is_finite() {
			return Err(ScoreError::NonFinite { value });
		}
		Ok(self.insert(score, element))
	}

	fn insert(&self, score: N, element: T) -> Option<N> {
		let mut shard = self.index.write(&element);
		let old = shard.get(&element).copied();
		let key = ScoreKey::new(score, self.tie_breaker.next());

		let retired = self.ordered.replace(old.as_ref(), key, element.clone());
		debug_assert_eq!(
			retired.is_some(),
			old.is_some(),
			"identity index and ordered store disagree on membership"
		);
		shard.insert(element, key);
		drop(shard);

		trace!(
			label = %self.label,
			tie = key.tie_breaker(),
			updated = old.is_some(),
			"scored_set.add"
		);
		old.map(|k| k.raw())
	}

	/// Removes `element`. Returns `false` if it was not a member.
	pub fn remove(&self, element: &T) -> bool {
		let mut shard = self.index.write(element);
		let Some(key) = shard.remove(element) else {
			return false;
		};
		let removed = self.ordered.remove(&key);
		debug_assert!(removed.is_some(), "indexed key missing from ordered store");
		drop(shard);

		trace!(label = %self.label, tie = key.tie_breaker(), "scored_set.remove");
		true
	}

	/// Removes every element scoring strictly below `threshold`.
	///
	/// Elements scoring exactly `threshold` stay. The eviction is one atomic
	/// step: no reader observes part of it. Returns the number evicted.
	pub fn remove_all_less_than(&self, threshold: N) -> usize {
		let boundary = ScoreKey::lower_bound(threshold);
		if self.ordered.first_key().is_none_or(|k| k >= boundary) {
			return 0;
		}

		let mut shards = self.index.write_all();
		let evicted = self.ordered.truncate_below(&boundary);
		for (key, element) in &evicted {
			let removed = shards[self.index.shard_index(element)].remove(element);
			debug_assert_eq!(removed.as_ref(), Some(key), "evicted key not indexed");
		}
		drop(shards);

		debug!(
			label = %self.label,
			threshold = ?threshold,
			evicted = evicted.len(),
			"scored_set.evict_below"
		);
		evicted.len()
	}

	/// Removes every element. The tie-breaker sequence continues.
	pub fn clear(&self) {
		let mut shards = self.index.write_all();
		for shard in &mut shards {
			shard.clear();
		}
		let removed = self.ordered.clear();
		drop(shards);

		debug!(label = %self.label, removed, "scored_set.clear");
	}

	/// O(1) membership test.
	pub fn contains(&self, element: &T) -> bool {
		self.index.contains(element)
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.ordered.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Current raw score of `element`, exactly as supplied.
	pub fn score(&self, element: &T) -> Option<N> {
		self.index.get(element).map(|k| k.raw())
	}

	/// Current key of `element`, including its tie-breaker.
	pub fn score_key(&self, element: &T) -> Option<ScoreKey<N>> {
		self.index.get(element)
	}

	/// Appends every element scoring within `[min, max]` to `out`, ascending.
	///
	/// Both ends are inclusive. `min > max` appends nothing.
	pub fn range_query(&self, min: N, max: N, out: &mut Vec<T>) {
		self.ordered
			.range_into(ScoreKey::lower_bound(min), ScoreKey::upper_bound(max), out);
	}

	/// [`Self::range_query`] into a fresh vector.
	pub fn range(&self, min: N, max: N) -> Vec<T> {
		let mut out = Vec::new();
		self.range_query(min, max, &mut out);
		out
	}

	pub fn min_score(&self) -> Option<N> {
		self.ordered.first_key().map(|k| k.raw())
	}

	pub fn max_score(&self) -> Option<N> {
		self.ordered.last_key().map(|k| k.raw())
	}

	/// Lowest-ordered element and its score.
	pub fn first(&self) -> Option<(T, N)> {
		self.ordered.first()
	}

	/// Highest-ordered element and its score.
	pub fn last(&self) -> Option<(T, N)> {
		self.ordered.last()
	}

	/// Every `(element, score)` pair, ascending.
	pub fn to_vec(&self) -> Vec<(T, N)> {
		self.ordered.to_vec()
	}

	/// Point-in-time copy of the membership.
	///
	/// Returns the cached snapshot when nothing has changed since it was taken.
	pub fn snapshot(&self) -> Arc<Snapshot<N, T>> {
		let cached = self.snap.load_full();
		if cached.seq() == self.ordered.seq() {
			return cached;
		}

		let fresh = Arc::new(self.ordered.read_with(Snapshot::<N, T>::capture));
		debug!(
			label = %self.label,
			seq = fresh.seq(),
			len = fresh.len(),
			"scored_set.snapshot"
		);

		let mut current = cached;
		loop {
			if current.seq() >= fresh.seq() {
				// A concurrent caller published something at least as new.
				return current;
			}
			let prev = self.snap.compare_and_swap(&current, Arc::clone(&fresh));
			if Arc::ptr_eq(&prev, &current) {
				return fresh;
			}
			current = arc_swap::Guard::into_inner(prev);
		}
	}
}

impl<N: Score, T: Eq + Hash + Clone> Default for ScoredSet<N, T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N: Score, T> std::fmt::Debug for ScoredSet<N, T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ScoredSet")
			.field("label", &self.label)
			.field("seq", &self.ordered.seq())
			.field("last_tie", &self.tie_breaker.last())
			.finish_non_exhaustive()
	}
}
