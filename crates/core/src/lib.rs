#![cfg_attr(test, allow(unused_crate_dependencies))]
#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Concurrent score-ordered set.
//!
//! [`ScoredSet`] keeps elements ordered by a numeric score while still answering
//! membership and score lookups in O(1), range queries in O(log n + k), and
//! evicting everything below a threshold in bulk. All operations take `&self`
//! and may run from any number of threads.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`ScoredSet`] | The collection. |
//! | [`Score`] | Raw numeric score types (all primitive integers and floats). |
//! | [`ScoreKey`] | Immutable `(score, tie-breaker)` ordering key. |
//! | [`Snapshot`] | Sequence-numbered point-in-time membership copy. |
//! | [`ScoredSetOptions`] | Construction options (log label, shard count). |
//!
//! # Ordering
//!
//! Keys order by score, then by tie-breaker. Tie-breakers come from a per-set
//! counter, so among equal scores the most recently added element sorts last.
//! NaN sorts above `+inf`, and `-0.0` shares a position with `+0.0`.
//!
//! ```
//! use tickset_core::ScoredSet;
//!
//! let set = ScoredSet::new();
//! set.add(1_i64, "a");
//! set.add(2_i64, "b");
//! set.add(2_i64, "c");
//! set.add(3_i64, "d");
//!
//! assert_eq!(set.range(2, 3), vec!["b", "c", "d"]);
//! assert_eq!(set.remove_all_less_than(3), 3);
//! assert_eq!(set.score(&"d"), Some(3));
//! ```

mod error;
mod index;
mod key;
mod options;
mod ordered;
mod score;
mod set;
mod snapshot;

pub use error::ScoreError;
pub use key::ScoreKey;
pub use options::{DEFAULT_SHARDS, ScoredSetOptions};
pub use score::Score;
pub use set::ScoredSet;
pub use snapshot::Snapshot;
