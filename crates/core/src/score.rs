//! Raw score types accepted by [`crate::ScoredSet`].

/// A raw numeric score.
///
/// Any score is ordered by its `f64` projection, so mixed precisions compare by
/// value. The raw value itself is kept alongside and handed back unchanged, which
/// matters for wide integers (`i64`, `u64`, timestamps) that `f64` cannot
/// represent exactly.
pub trait Score: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
	/// Projects the raw value onto `f64`. Called once per key construction.
	fn to_f64(self) -> f64;
}

macro_rules! impl_score_lossless {
	($($ty:ty),* $(,)?) => {
		$(
			impl Score for $ty {
				#[inline]
				fn to_f64(self) -> f64 {
					f64::from(self)
				}
			}
		)*
	};
}

macro_rules! impl_score_rounding {
	($($ty:ty),* $(,)?) => {
		$(
			impl Score for $ty {
				#[inline]
				#[allow(clippy::cast_precision_loss)]
				fn to_f64(self) -> f64 {
					self as f64
				}
			}
		)*
	};
}

impl_score_lossless!(i8, i16, i32, u8, u16, u32, f32, f64);
impl_score_rounding!(i64, u64, i128, u128, isize, usize);
