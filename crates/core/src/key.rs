//! Composite ordering keys and the tie-breaker counter that mints them.
//!
//! # Ordering
//!
//! Keys order by their canonical `f64` projection first, then by tie-breaker.
//! Canonicalization gives every raw value exactly one position:
//!
//! - all NaNs collapse to the positive quiet NaN, which sorts above `+inf`;
//! - `-0.0` collapses to `+0.0`;
//! - everything else keeps its IEEE-754 value.
//!
//! Because canonical values compare equal under [`f64::total_cmp`] exactly when
//! their bit patterns match, `Eq` and `Ord` agree.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{self, AtomicU64};

use crate::score::Score;

const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

#[inline]
fn canonicalize(value: f64) -> f64 {
	if value.is_nan() {
		f64::from_bits(CANONICAL_NAN_BITS)
	} else if value == 0.0 {
		0.0
	} else {
		value
	}
}

/// Immutable ordering key for one membership of one element.
///
/// A key is minted per insertion and never mutated. Updating an element's score
/// retires its old key and mints a fresh one.
///
/// Signed zeros share one position, unlike a raw `f64::total_cmp` order that
/// puts `-0.0` below `+0.0`: `range(0.0, 0.0)` includes `-0.0` members and
/// `remove_all_less_than(0.0)` keeps them.
#[derive(Clone, Copy)]
pub struct ScoreKey<N: Score> {
	numeric: f64,
	tie_breaker: u64,
	raw: N,
}

impl<N: Score> ScoreKey<N> {
	pub(crate) fn new(raw: N, tie_breaker: u64) -> Self {
		Self {
			numeric: canonicalize(raw.to_f64()),
			tie_breaker,
			raw,
		}
	}

	/// Key sorting at or before every real key carrying `raw`'s score.
	pub(crate) fn lower_bound(raw: N) -> Self {
		Self::new(raw, TieBreaker::MIN)
	}

	/// Key sorting at or after every real key carrying `raw`'s score.
	pub(crate) fn upper_bound(raw: N) -> Self {
		Self::new(raw, TieBreaker::MAX)
	}

	/// The score exactly as the caller supplied it.
	#[inline]
	pub fn raw(&self) -> N {
		self.raw
	}

	/// The canonical `f64` projection used for ordering.
	#[inline]
	pub fn numeric(&self) -> f64 {
		self.numeric
	}

	/// Insertion sequence number; larger means more recent.
	#[inline]
	pub fn tie_breaker(&self) -> u64 {
		self.tie_breaker
	}
}

impl<N: Score> PartialEq for ScoreKey<N> {
	fn eq(&self, other: &Self) -> bool {
		self.numeric.to_bits() == other.numeric.to_bits() && self.tie_breaker == other.tie_breaker
	}
}

impl<N: Score> Eq for ScoreKey<N> {}

impl<N: Score> Ord for ScoreKey<N> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.numeric
			.total_cmp(&other.numeric)
			.then(self.tie_breaker.cmp(&other.tie_breaker))
	}
}

impl<N: Score> PartialOrd for ScoreKey<N> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<N: Score> Hash for ScoreKey<N> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.numeric.to_bits().hash(state);
		self.tie_breaker.hash(state);
	}
}

impl<N: Score> fmt::Debug for ScoreKey<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ScoreKey")
			.field("raw", &self.raw)
			.field("tie_breaker", &self.tie_breaker)
			.finish()
	}
}

impl<N: Score> fmt::Display for ScoreKey<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:?}, tie={})", self.raw, self.tie_breaker)
	}
}

/// Per-collection source of strictly increasing tie-breakers.
///
/// Starts at zero; the first minted value is `1`. `MIN` and `MAX` are reserved
/// for boundary keys and are never handed out.
#[derive(Debug, Default)]
pub(crate) struct TieBreaker {
	last: AtomicU64,
}

impl TieBreaker {
	pub(crate) const MIN: u64 = u64::MIN;
	pub(crate) const MAX: u64 = u64::MAX;

	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Mints the next value.
	#[inline]
	pub(crate) fn next(&self) -> u64 {
		self.last.fetch_add(1, atomic::Ordering::Relaxed) + 1
	}

	/// Last minted value, or `0` if none.
	pub(crate) fn last(&self) -> u64 {
		self.last.load(atomic::Ordering::Relaxed)
	}
}

#[cfg(test)]
mod tests;
