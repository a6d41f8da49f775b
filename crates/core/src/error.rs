//! Errors surfaced by the fallible [`crate::ScoredSet`] entry points.

/// Score rejected by [`crate::ScoredSet::try_add`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScoreError {
	/// The score projects to NaN or an infinity.
	#[error("score is not finite: {value}")]
	NonFinite { value: f64 },
}
