//! Construction-time configuration for [`crate::ScoredSet`].

use serde::Deserialize;

/// Default identity shard count.
pub const DEFAULT_SHARDS: usize = 16;

/// Options accepted by [`crate::ScoredSet::with_options`].
///
/// Deserializable so hosts can embed it in their own configuration files.
/// Missing fields fall back to [`ScoredSetOptions::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoredSetOptions {
	/// Name attached to every log event from this set.
	pub label: String,
	/// Identity shard count; rounded up to a power of two, at most 1024.
	pub shards: usize,
}

impl Default for ScoredSetOptions {
	fn default() -> Self {
		Self {
			label: "scored-set".to_string(),
			shards: DEFAULT_SHARDS,
		}
	}
}

impl ScoredSetOptions {
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn shards(mut self, shards: usize) -> Self {
		self.shards = shards;
		self
	}
}
