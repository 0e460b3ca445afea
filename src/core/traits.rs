//! Scalar abstraction for the evaluation core
//!
//! Every algorithm in this crate is generic over [`MathScalar`], a
//! floating-point scalar with IEEE-754-like semantics: finite epsilon,
//! finite maximum value, well-defined infinities and NaN, and the
//! standard transcendentals. `f32` and `f64` satisfy it out of the box;
//! extended-precision types can opt in by implementing the `num-traits`
//! bounds.

use std::fmt::Debug;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use num_traits::{Float, FloatConst, FromPrimitive};

/// Floating-point scalar usable by the evaluation core.
///
/// This is a bound alias: any type satisfying the listed `num-traits`
/// bounds implements it automatically via the blanket impl below.
pub trait MathScalar:
    Float
    + FloatConst
    + FromPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Debug
    + 'static
{
    /// Materialize an `f64` constant in this scalar type.
    ///
    /// # Panics
    /// Panics if the conversion fails; the constants used by this crate
    /// are all representable in `f32` and wider.
    fn constant(value: f64) -> Self {
        Self::from_f64(value).expect("Failed to convert mathematical constant")
    }

    /// Materialize a small non-negative integer (loop counter, series
    /// index) in this scalar type.
    ///
    /// # Panics
    /// Panics if the conversion fails; indices stay far below the
    /// mantissa range of any supported scalar.
    fn from_index(n: u32) -> Self {
        Self::from_u32(n).expect("Failed to convert integer argument")
    }

    /// Materialize a signed integer shift count in this scalar type.
    ///
    /// # Panics
    /// Panics if the conversion fails; shift counts are bounded by the
    /// policy's iteration budget.
    fn from_shift(n: i64) -> Self {
        Self::from_i64(n).expect("Failed to convert integer argument")
    }

    /// Truncate towards zero and return the result as `i64`, saturating
    /// at the `i64` range boundaries for out-of-range values.
    fn itrunc(self) -> i64 {
        self.trunc().to_i64().unwrap_or(if self > Self::zero() {
            i64::MAX
        } else {
            i64::MIN
        })
    }

    /// True when the value is an exact integer.
    fn is_integer(self) -> bool {
        self.is_finite() && self == self.floor()
    }
}

impl<T> MathScalar for T where
    T: Float
        + FloatConst
        + FromPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Debug
        + 'static
{
}
