//! Sample type contract
//!
//! Pixel kinds are resolved at compile time: the reduction is generic over any
//! `T: Sample`, so there is no runtime type dispatch inside the core.

use num_traits::Bounded;

/// Floating-point type every sample is accumulated in.
pub type RealType = f64;

/// A value stored at one array position.
///
/// Samples must be ordered (for min/max), bounded (for the initial extrema)
/// and convertible to [`RealType`] (for the sums).
pub trait Sample: Copy + PartialOrd + Bounded + Send + Sync + std::fmt::Debug + 'static {
    /// Widen to the accumulation type.
    fn to_real(self) -> RealType;
}

macro_rules! impl_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_real(self) -> RealType {
                    self as RealType
                }
            }
        )*
    };
}

impl_sample!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
