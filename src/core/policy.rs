//! Numeric evaluation policy and the scaled-value convention
//!
//! Every evaluator in this crate returns its result as a pair
//! `(mantissa, log_scale)` meaning `mantissa * exp(log_scale)`. The
//! scale is carried as an integer exponent so intermediate results can
//! traverse regions far outside the scalar's exponent range without an
//! extended type. [`Policy`] bundles the per-call numeric
//! configuration: target epsilon, the iteration budget, the log of the
//! largest usable scale factor and the behavior on terminal overflow.

use crate::core::error::EvalError;
use crate::core::traits::MathScalar;

/// What to do when the collapsed result `mantissa * exp(log_scale)`
/// exceeds the scalar's finite range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowBehavior {
    /// Surface [`EvalError::Overflow`].
    #[default]
    Raise,
    /// Return infinity with the sign of the mantissa.
    SaturateToInfinity,
    /// Return whatever the multiplication produced.
    Ignore,
}

/// Per-call numeric configuration.
///
/// All core entities are stack-allocated and live only for the duration
/// of a single call; the policy itself is a plain value and can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy<T> {
    /// Relative tolerance at which series summation stops.
    pub epsilon: T,
    /// Budget for series terms and recurrence shifts.
    pub max_series_iterations: u32,
    /// Log of the largest scale factor applied in one renormalization
    /// step, `trunc(ln(T::MAX)) - 2` by default.
    pub log_max_value: i64,
    /// Behavior when the final result overflows the scalar range.
    pub overflow: OverflowBehavior,
}

impl<T: MathScalar> Default for Policy<T> {
    fn default() -> Self {
        Policy {
            epsilon: T::epsilon(),
            max_series_iterations: 1_000_000,
            log_max_value: T::max_value().ln().itrunc() - 2,
            overflow: OverflowBehavior::default(),
        }
    }
}

impl<T: MathScalar> Policy<T> {
    /// The scale factor `exp(log_max_value)` used by every
    /// renormalization step.
    pub(crate) fn scale_factor(&self) -> T {
        T::from_shift(self.log_max_value).exp()
    }
}

/// A value in the crate's scaled convention: `mantissa * exp(log_scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled<T> {
    /// Mantissa; may be anywhere in the scalar's finite range.
    pub mantissa: T,
    /// Integer log-scale.
    pub log_scale: i64,
}

impl<T: MathScalar> Scaled<T> {
    /// Wrap an unscaled value.
    pub fn new(mantissa: T, log_scale: i64) -> Self {
        Scaled {
            mantissa,
            log_scale,
        }
    }

    /// Collapse to a single scalar, multiplying the scale out in steps
    /// of `exp(log_max_value)` and applying the policy's overflow
    /// behavior at the end.
    pub fn collapse(self, policy: &Policy<T>) -> Result<T, EvalError> {
        let max_scaling = policy.log_max_value;
        let max_factor = policy.scale_factor();

        let mut result = self.mantissa;
        let mut log_scale = self.log_scale;
        while log_scale > max_scaling {
            result *= max_factor;
            log_scale -= max_scaling;
            if result.is_infinite() {
                break;
            }
        }
        while log_scale < -max_scaling {
            result /= max_factor;
            log_scale += max_scaling;
            if result == T::zero() {
                break;
            }
        }
        if log_scale != 0 && result.is_finite() && result != T::zero() {
            result = result * T::from_shift(log_scale).exp();
        }

        if result.is_infinite() && self.mantissa.is_finite() {
            return match policy.overflow {
                OverflowBehavior::Raise => Err(EvalError::Overflow),
                OverflowBehavior::SaturateToInfinity => {
                    Ok(T::infinity().copysign(self.mantissa))
                }
                OverflowBehavior::Ignore => Ok(result),
            };
        }
        Ok(result)
    }
}

/// Renormalization bounds shared by the scaled series summers and the
/// recurrence engine: when a running value leaves
/// `[1/sqrt(T::MAX), sqrt(T::MAX)]` it is pulled back by the factor
/// `exp(log_max_value)` and the shift is credited to the log-scale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScaleLimits<T> {
    pub upper: T,
    pub lower: T,
    pub factor: T,
    pub log_factor: i64,
}

impl<T: MathScalar> ScaleLimits<T> {
    pub fn new(policy: &Policy<T>) -> Self {
        let upper = T::max_value().sqrt();
        ScaleLimits {
            upper,
            lower: T::one() / upper,
            factor: policy.scale_factor(),
            log_factor: policy.log_max_value,
        }
    }

    /// Renormalize `primary` (typically a running sum) together with
    /// its companion values, crediting the shift to `log_scale`.
    pub fn renormalize(&self, primary: &mut T, companions: &mut [&mut T], log_scale: &mut i64) {
        if primary.abs() >= self.upper {
            *primary /= self.factor;
            for value in companions.iter_mut() {
                **value /= self.factor;
            }
            *log_scale += self.log_factor;
        } else if primary.abs() < self.lower && *primary != T::zero() {
            *primary *= self.factor;
            for value in companions.iter_mut() {
                **value *= self.factor;
            }
            *log_scale -= self.log_factor;
        }
    }
}

/// Accumulator for sums whose terms arrive with individual log-scales.
///
/// The running sum is kept at one reference scale; incoming terms are
/// rebased onto it, and the reference is raised whenever a term
/// dominates the current scale so the rebasing factor never overflows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScaledSum<T> {
    pub sum: T,
    pub log_scale: i64,
}

impl<T: MathScalar> ScaledSum<T> {
    pub fn new() -> Self {
        ScaledSum {
            sum: T::zero(),
            log_scale: 0,
        }
    }

    /// Add `mantissa * exp(log_scale)`; returns the added term rebased
    /// onto the accumulator's scale (zero when it underflows it).
    pub fn add(&mut self, mantissa: T, log_scale: i64) -> T {
        if mantissa == T::zero() {
            return T::zero();
        }
        if self.sum == T::zero() {
            self.sum = mantissa;
            self.log_scale = log_scale;
            return mantissa;
        }
        let delta = log_scale - self.log_scale;
        // A term more than ~600 e-folds below the sum cannot move it.
        if delta < -600 {
            return T::zero();
        }
        if delta > 600 {
            // Term dominates: rebase the accumulated sum instead.
            self.sum = self.sum * T::from_shift(-delta).exp() + mantissa;
            self.log_scale = log_scale;
            return mantissa;
        }
        let rebased = mantissa * T::from_shift(delta).exp();
        self.sum += rebased;
        rebased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_plain_value() {
        let policy = Policy::<f64>::default();
        let v = Scaled::new(2.5, 0).collapse(&policy).unwrap();
        assert_eq!(v, 2.5);
    }

    #[test]
    fn collapse_recombines_scale() {
        let policy = Policy::<f64>::default();
        let v = Scaled::new(1.0, 100).collapse(&policy).unwrap();
        assert!((v / 100.0_f64.exp() - 1.0).abs() < 1e-14);
        let v = Scaled::new(1.0, -100).collapse(&policy).unwrap();
        assert!((v * 100.0_f64.exp() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn collapse_overflow_behaviors() {
        let mut policy = Policy::<f64>::default();
        let huge = Scaled::new(-1.5, 10_000);

        policy.overflow = OverflowBehavior::Raise;
        assert_eq!(huge.collapse(&policy), Err(EvalError::Overflow));

        policy.overflow = OverflowBehavior::SaturateToInfinity;
        assert_eq!(huge.collapse(&policy), Ok(f64::NEG_INFINITY));

        policy.overflow = OverflowBehavior::Ignore;
        assert!(huge.collapse(&policy).unwrap().is_infinite());
    }

    #[test]
    fn collapse_underflows_to_zero() {
        let policy = Policy::<f64>::default();
        let v = Scaled::new(1.0, -10_000).collapse(&policy).unwrap();
        assert_eq!(v, 0.0);
    }

    #[test]
    fn scaled_sum_mixed_scales() {
        let mut acc = ScaledSum::<f64>::new();
        acc.add(1.0, 10);
        acc.add(1.0, 10);
        assert_eq!(acc.log_scale, 10);
        assert!((acc.sum - 2.0).abs() < 1e-15);
        // A vastly smaller term is absorbed as zero.
        acc.add(1.0, -1000);
        assert!((acc.sum - 2.0).abs() < 1e-15);
        // A dominating term rebases the accumulator.
        acc.add(3.0, 700);
        assert_eq!(acc.log_scale, 700);
        assert!((acc.sum - 3.0).abs() < 1e-12);
    }

    #[test]
    fn renormalization_credits_scale() {
        let policy = Policy::<f64>::default();
        let limits = ScaleLimits::new(&policy);
        let mut sum = f64::MAX.sqrt() * 2.0;
        let mut term = 1.0;
        let mut scale = 0i64;
        limits.renormalize(&mut sum, &mut [&mut term], &mut scale);
        assert_eq!(scale, policy.log_max_value);
        assert!(sum < 1.0);
        assert!(term < 1.0);
    }
}
