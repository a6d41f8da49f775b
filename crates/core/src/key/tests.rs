use std::collections::HashSet;

use super::{ScoreKey, TieBreaker};

#[test]
fn test_orders_by_score_then_tie_breaker() {
	let a = ScoreKey::new(1_i32, 9);
	let b = ScoreKey::new(2_i32, 1);
	let c = ScoreKey::new(2_i32, 2);

	assert!(a < b);
	assert!(b < c);
	assert_ne!(b, c);
}

#[test]
fn test_mixed_precision_projects_to_same_value() {
	assert_eq!(
		ScoreKey::new(3_i32, 1).numeric(),
		ScoreKey::new(3.0_f64, 1).numeric()
	);
	assert_eq!(
		ScoreKey::new(0.5_f32, 1).numeric(),
		ScoreKey::new(0.5_f64, 1).numeric()
	);
}

#[test]
fn test_boundaries_enclose_every_real_key() {
	let lower = ScoreKey::lower_bound(5_u32);
	let upper = ScoreKey::upper_bound(5_u32);
	let real = ScoreKey::new(5_u32, 42);

	assert!(lower < real);
	assert!(real < upper);
	assert!(ScoreKey::upper_bound(4_u32) < lower);
	assert!(upper < ScoreKey::lower_bound(6_u32));
}

#[test]
fn test_nan_sorts_above_infinity() {
	let nan = ScoreKey::new(f64::NAN, 1);
	let neg_nan = ScoreKey::new(-f64::NAN, 1);
	let inf = ScoreKey::new(f64::INFINITY, 2);
	let neg_inf = ScoreKey::new(f64::NEG_INFINITY, 3);

	assert_eq!(nan, neg_nan, "all NaNs share one position");
	assert!(inf < nan);
	assert!(neg_inf < ScoreKey::new(f64::MIN, 0));
}

#[test]
fn test_negative_zero_collapses() {
	let neg = ScoreKey::new(-0.0_f64, 1);
	let pos = ScoreKey::new(0.0_f64, 1);
	assert_eq!(neg, pos);
	assert_eq!(neg.numeric().to_bits(), 0);
	assert!(neg.raw().is_sign_negative(), "raw keeps the caller's value");
}

#[test]
fn test_hash_agrees_with_eq() {
	let mut seen = HashSet::new();
	assert!(seen.insert(ScoreKey::new(-0.0_f64, 7)));
	assert!(!seen.insert(ScoreKey::new(0.0_f64, 7)));
	assert!(seen.insert(ScoreKey::new(0.0_f64, 8)));
}

#[test]
fn test_raw_is_exact_for_wide_integers() {
	let raw: i64 = (1 << 53) + 1;
	let key = ScoreKey::new(raw, 1);
	assert_eq!(key.raw(), raw);
	assert_ne!(key.numeric() as i64, raw);
}

#[test]
fn test_display_shows_raw_and_tie() {
	assert_eq!(ScoreKey::new(10_i32, 3).to_string(), "(10, tie=3)");
}

#[test]
fn test_tie_breaker_starts_after_min() {
	let tb = TieBreaker::new();
	assert_eq!(tb.last(), 0);
	assert_eq!(tb.next(), 1);
	assert_eq!(tb.next(), 2);
	assert_eq!(tb.last(), 2);
	assert!(TieBreaker::MIN < 1);
}

#[test]
fn test_tie_breaker_unique_across_threads() {
	let tb = TieBreaker::new();
	let mut all: Vec<u64> = std::thread::scope(|s| {
		let handles: Vec<_> = (0..4)
			.map(|_| s.spawn(|| (0..1000).map(|_| tb.next()).collect::<Vec<_>>()))
			.collect();
		handles
			.into_iter()
			.flat_map(|h| h.join().unwrap())
			.collect()
	});
	all.sort_unstable();
	all.dedup();
	assert_eq!(all.len(), 4000);
	assert_eq!(all.first(), Some(&1));
	assert_eq!(all.last(), Some(&4000));
}
