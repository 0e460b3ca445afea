#![forbid(unsafe_code)]
//! Confluent Hypergeometric Function of the First Kind
//!
//! A focused Rust library for evaluating Kummer's function
//! M(a, b, z) = ₁F₁(a; b; z) over real floating-point arguments to
//! full working precision.
//!
//! The defining power series
//!
//! ```text
//! M(a, b, z) = Σ_{n≥0} (a)_n / (b)_n · zⁿ / n!
//! ```
//!
//! is numerically catastrophic over most of the (a, b, z) cube: terms
//! grow to astronomical magnitudes before cancelling to near-zero.
//! The crate therefore routes every call through a regime dispatcher
//! that selects, from a library of mutually complementary strategies
//! (Taylor, asymptotic, Bessel-form transforms, backward recurrences,
//! Kummer reflection, continued-fraction ratios), the method that is
//! accurate for the given arguments, and carries intermediate results
//! as `mantissa * exp(log_scale)` pairs so they may traverse regions
//! far outside the scalar's exponent range.
//!
//! # Usage
//!
//! ```
//! use kummer::hypergeometric_1f1;
//!
//! // M(a, a, z) = e^z
//! let v: f64 = hypergeometric_1f1(2.5, 2.5, 1.0).unwrap();
//! assert!((v - 1.0_f64.exp()).abs() < 1e-14 * v);
//! ```
//!
//! With an explicit policy (tolerance, iteration budget, overflow
//! behavior):
//!
//! ```
//! use kummer::{hypergeometric_1f1_with, OverflowBehavior, Policy};
//!
//! let policy = Policy::<f64> {
//!     overflow: OverflowBehavior::SaturateToInfinity,
//!     ..Policy::default()
//! };
//! let v = hypergeometric_1f1_with(10.0, 2.0, 800.0, &policy).unwrap();
//! assert!(v.is_infinite());
//! ```

mod core; // Scalar bound, policy, scaled values, errors
mod math; // Evaluation strategies and the dispatcher

#[cfg(test)]
mod tests;

// Re-export key types
pub use crate::core::{EvalError, MathScalar, OverflowBehavior, Policy, Scaled};

use crate::math::dispatch::hypergeometric_1f1_imp;

/// Evaluate M(a, b, z) with the default policy.
///
/// # Errors
/// - [`EvalError::Domain`] when b is a non-positive integer and the
///   series does not terminate as a polynomial
/// - [`EvalError::Overflow`] when the result exceeds the scalar's
///   range (the default policy raises; see [`OverflowBehavior`])
/// - other [`EvalError`] variants when no method can reach target
///   precision for these arguments
///
/// # Example
/// ```
/// use kummer::hypergeometric_1f1;
/// // M(-1, b, z) = 1 - z/b
/// let v: f64 = hypergeometric_1f1(-1.0, 4.0, 3.0).unwrap();
/// assert!((v - 0.25).abs() < 1e-15);
/// ```
pub fn hypergeometric_1f1<T: MathScalar>(a: T, b: T, z: T) -> Result<T, EvalError> {
    hypergeometric_1f1_with(a, b, z, &Policy::default())
}

/// Evaluate M(a, b, z) under an explicit [`Policy`].
///
/// # Errors
/// See [`hypergeometric_1f1`].
pub fn hypergeometric_1f1_with<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
) -> Result<T, EvalError> {
    hypergeometric_1f1_scaled(a, b, z, policy)?.collapse(policy)
}

/// Evaluate M(a, b, z) in the scaled convention: the mathematical
/// value is `mantissa * exp(log_scale)`.
///
/// This is the dispatcher's native return shape; it is exposed so
/// results far outside the scalar's exponent range (and the scale
/// bookkeeping itself) are testable without overflow.
///
/// # Errors
/// See [`hypergeometric_1f1`]; overflow cannot occur here since the
/// scale is never collapsed.
pub fn hypergeometric_1f1_scaled<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
) -> Result<Scaled<T>, EvalError> {
    let mut log_scale = 0i64;
    let mantissa = hypergeometric_1f1_imp(a, b, z, policy, &mut log_scale)?;
    Ok(Scaled::new(mantissa, log_scale))
}
