//! Market tick fixture shared by the integration tests.

#![allow(dead_code)]

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// One trade print. Identity is the row it was read from, so two prints with
/// identical fields are still distinct members.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
	pub row: usize,
	pub time: i64,
	pub price: f32,
	pub volume: u32,
	pub is_ask: bool,
}

impl PartialEq for Tick {
	fn eq(&self, other: &Self) -> bool {
		self.row == other.row
	}
}

impl Eq for Tick {}

impl Hash for Tick {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.row.hash(state);
	}
}

#[derive(Debug, thiserror::Error)]
pub enum TickParseError {
	#[error("line {line}: missing field `{field}`")]
	MissingField { line: usize, field: &'static str },
	#[error("line {line}: invalid `{field}`: {reason}")]
	Invalid {
		line: usize,
		field: &'static str,
		reason: String,
	},
	#[error("reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR"))
		.join("tests")
		.join("fixtures")
		.join(name)
}

/// Parses `timestamp,side,volume,price` rows. Blank lines are skipped.
pub fn parse_ticks(input: &str) -> Result<Vec<Tick>, TickParseError> {
	let mut ticks = Vec::new();
	for (idx, raw) in input.lines().enumerate() {
		let line = idx + 1;
		if raw.trim().is_empty() {
			continue;
		}
		let mut fields = raw.split(',').map(str::trim);
		let mut next = |field: &'static str| {
			fields
				.next()
				.filter(|f| !f.is_empty())
				.ok_or(TickParseError::MissingField { line, field })
		};
		let time = next("timestamp")?;
		let side = next("side")?;
		let volume = next("volume")?;
		let price = next("price")?;

		let invalid = |field: &'static str, reason: String| TickParseError::Invalid {
			line,
			field,
			reason,
		};
		ticks.push(Tick {
			row: ticks.len(),
			time: time
				.parse()
				.map_err(|e: std::num::ParseIntError| invalid("timestamp", e.to_string()))?,
			is_ask: match side {
				"ASK" => true,
				"BID" => false,
				other => return Err(invalid("side", format!("unknown side {other:?}"))),
			},
			volume: volume
				.parse()
				.map_err(|e: std::num::ParseIntError| invalid("volume", e.to_string()))?,
			price: price
				.parse()
				.map_err(|e: std::num::ParseFloatError| invalid("price", e.to_string()))?,
		});
	}
	Ok(ticks)
}

pub fn load_ticks(name: &str) -> Result<Vec<Tick>, TickParseError> {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).map_err(|source| TickParseError::Io {
		path: path.clone(),
		source,
	})?;
	parse_ticks(&text)
}

/// Installs a DEBUG-level test subscriber once per test binary.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}
