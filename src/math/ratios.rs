//! Ratio methods for negative b
//!
//! For b < 0 the Taylor series is ruined by the sign change of the
//! `(b)_n` denominators, but the three-term relation in the b
//! direction still connects `M(a, b, z)` to the healthy region
//! b > max(z, 1). `M(a, b+i, z)` is the minimal solution of that
//! relation as i → +∞ (the companion solution grows like Γ(b+i)), so:
//!
//! - walking **down** in b, ratios unwound from an anchor pair above
//!   the turning point are self-correcting (Pincherle/Gautschi), and
//!   the target value is the anchor times the ratio product;
//! - walking **up** in b is stable only while `b + i < z`, where the
//!   dominance flips; the forwards variant exploits that with an
//!   anchor pair far below b, where the series is a small perturbation
//!   of 1.
//!
//! Reference: Gautschi (1967) "Computational Aspects of Three-Term
//! Recurrence Relations", SIAM Review 9; Numerical Recipes §5.5 for
//! the ratio unwinding discipline.

use crate::core::error::EvalError;
use crate::core::policy::{Policy, ScaleLimits};
use crate::core::traits::MathScalar;
use crate::math::dispatch::hypergeometric_1f1_imp;
use crate::math::recurrence::{
    apply_forward, equalize_scales, RecurrenceCoefficients, RecurrenceOnB,
};
use crate::math::series::hypergeometric_1f1_series_scaled;

/// Largest (closest to zero) b for which the small-a ratio walk keeps
/// full precision at this z. Beyond |z| = 30 the companion solution's
/// growth across the walk window swamps the working precision, so the
/// returned bound collapses the window to empty.
pub(crate) fn max_b_for_small_a_negative_b_by_ratio<T: MathScalar>(z: T) -> T {
    if z.abs() > T::constant(30.0) {
        -T::one()
    } else {
        -(z.abs() / T::constant(4.0) + T::constant(8.0))
    }
}

/// Region where the downward ratio walk applies for a >= 0, b < 0.
///
/// `z < -b/4` is the stability boundary: with |b| > 4z the companion
/// solution measured at the target has shrunk below its anchor value,
/// so contamination introduced anywhere along the walk arrives damped.
pub(crate) fn is_in_ratio_negative_b_region<T: MathScalar>(a: T, b: T, z: T) -> bool {
    let quarter = -b / T::constant(4.0);
    z > T::zero() && b < -T::one() && z < quarter && a < quarter
}

/// Region where the forwards (upward in b) walk applies for a >= 0,
/// b < 0: z dominates |b|, so the function is the growing solution
/// over the whole walk, and a is small enough that the far anchor
/// series cancels only mildly.
pub(crate) fn is_in_forwards_recurrence_region<T: MathScalar>(a: T, b: T, z: T) -> bool {
    z > -T::constant(2.0) * b && a < T::constant(4.0)
}

/// Number of upward steps from b to the anchor region b + N > max(z, 1) + 1.
fn steps_to_anchor<T: MathScalar>(b: T, z: T, policy: &Policy<T>) -> Result<i64, EvalError> {
    let target = z.max(T::one()) + T::one();
    let steps = (target - b).itrunc() + 1;
    if steps <= 0 {
        return Err(EvalError::out_of_range("ratio walk needs b below the anchor"));
    }
    if steps > i64::from(policy.max_series_iterations) {
        return Err(EvalError::out_of_range(format!(
            "ratio walk of {steps} steps exceeds the iteration budget"
        )));
    }
    Ok(steps)
}

/// Shared downward unwind: given the anchor pair
/// `(M(a, b+n, z), M(a, b+n+1, z))` in one scale, unwind the ratio
/// chain down to b and return `M(a, b, z)` scaled.
fn unwind_ratios<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    steps: i64,
    anchor: T,
    anchor_above: T,
    anchor_scale: i64,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    if anchor_above == T::zero() {
        return Err(EvalError::NoMethodAvailable);
    }
    let coefficients = RecurrenceOnB::new(a, b, z);
    let limits = ScaleLimits::new(policy);

    // rho_i = y_i / y_{i+1}; seeded exactly from the anchors, then
    // unwound through the relation centered on y_{i+1}:
    // rho_i = -(B_{i+1} + C_{i+1} / rho_{i+1}) / A_{i+1}.
    let mut rho = anchor / anchor_above;
    let mut product = T::one();
    let mut product_scale = 0i64;
    let mut no_companions: [&mut T; 0] = [];
    for i in (0..steps).rev() {
        let (big_a, big_b, big_c) = coefficients.at(i + 1);
        rho = -(big_b + big_c / rho) / big_a;
        if rho == T::zero() || !rho.is_finite() {
            return Err(EvalError::NoMethodAvailable);
        }
        product *= rho;
        limits.renormalize(&mut product, &mut no_companions, &mut product_scale);
    }

    *log_scale += anchor_scale + product_scale;
    Ok(anchor * product)
}

/// Downward ratio walk with series anchors; a >= 0 (or |a| small), b < 0.
pub(crate) fn hypergeometric_1f1_from_ratio_negative_b<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let steps = steps_to_anchor(b, z, policy)?;
    let shifted = b + T::from_shift(steps);

    let mut scale_anchor = 0i64;
    let anchor = hypergeometric_1f1_series_scaled(a, shifted, z, policy, &mut scale_anchor)?;
    let mut scale_above = 0i64;
    let anchor_above =
        hypergeometric_1f1_series_scaled(a, shifted + T::one(), z, policy, &mut scale_above)?;
    let anchor_above = equalize_scales(anchor_above, scale_above, scale_anchor);

    unwind_ratios(
        a,
        b,
        z,
        steps,
        anchor,
        anchor_above,
        scale_anchor,
        policy,
        log_scale,
    )
}

/// Small-|a| wedge entry point (z < 0, b in the ratio window): the
/// same downward walk; the anchors there are small perturbations of 1.
pub(crate) fn hypergeometric_1f1_small_a_negative_b_by_ratio<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    hypergeometric_1f1_from_ratio_negative_b(a, b, z, policy, log_scale)
}

/// Downward ratio walk for a < 0, b < 0 (a > 5b): anchors cannot come
/// from the direct series, so they are obtained by recursive dispatch
/// at (a, b + n, z) with bounded depth.
pub(crate) fn hypergeometric_1f1_from_ratio_negative_ab<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let steps = steps_to_anchor(b, z, policy)?;
    let shifted = b + T::from_shift(steps);

    let mut scale_anchor = 0i64;
    let anchor = hypergeometric_1f1_imp(a, shifted, z, policy, &mut scale_anchor)?;
    let mut scale_above = 0i64;
    let anchor_above =
        hypergeometric_1f1_imp(a, shifted + T::one(), z, policy, &mut scale_above)?;
    let anchor_above = equalize_scales(anchor_above, scale_above, scale_anchor);

    unwind_ratios(
        a,
        b,
        z,
        steps,
        anchor,
        anchor_above,
        scale_anchor,
        policy,
        log_scale,
    )
}

/// Forwards walk for a >= 0, b < 0 with z >> |b|: seed far below b
/// where the series is a small perturbation of 1, then recurse upward
/// while the dominance ordering holds (b + i < z throughout).
pub(crate) fn hypergeometric_1f1_from_ratio_negative_b_forwards<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    // Anchor at b - n ~ -(z + 10): just past the turning point, where
    // the anchor series converges and the stretch of the walk on which
    // the companion solution still grows is only a few steps wide.
    let steps = (z + T::constant(10.0) + b).itrunc().max(1);
    if steps > i64::from(policy.max_series_iterations) {
        return Err(EvalError::out_of_range(format!(
            "forwards walk of {steps} steps exceeds the iteration budget"
        )));
    }
    let base = b - T::from_shift(steps);

    let mut scale_first = 0i64;
    let first = hypergeometric_1f1_series_scaled(a, base, z, policy, &mut scale_first)?;
    let mut scale_second = 0i64;
    let second =
        hypergeometric_1f1_series_scaled(a, base + T::one(), z, policy, &mut scale_second)?;
    let second = equalize_scales(second, scale_second, scale_first);
    *log_scale += scale_first;

    // first = y(base), second = y(base + 1); walk steps - 1 up to b.
    let coefficients = RecurrenceOnB::new(a, base + T::one(), z);
    Ok(apply_forward(
        &coefficients,
        (steps - 1) as u64,
        first,
        second,
        policy,
        log_scale,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::Scaled;
    use crate::math::series::{sum_series, Series1F1};

    fn policy() -> Policy<f64> {
        Policy::default()
    }

    fn collapse(mantissa: f64, scale: i64) -> f64 {
        Scaled::new(mantissa, scale).collapse(&policy()).unwrap()
    }

    #[test]
    fn thresholds_and_regions() {
        assert!(max_b_for_small_a_negative_b_by_ratio(-6.75_f64) < -8.0);
        assert!(is_in_ratio_negative_b_region(0.5, -100.0, 3.0));
        assert!(!is_in_ratio_negative_b_region(0.5, -100.0, 60.0));
        assert!(!is_in_ratio_negative_b_region(50.0, -100.0, 3.0));
        assert!(is_in_forwards_recurrence_region(0.5, -20.0, 100.0));
        assert!(!is_in_forwards_recurrence_region(0.5, -20.0, 30.0));
        assert!(!is_in_forwards_recurrence_region(30.0, -20.0, 100.0));
    }

    #[test]
    fn downward_walk_small_negative_z() {
        // Small-a wedge: M(0.5, -1205.5, -6.75) = 1.00281149043026925...
        let mut scale = 0i64;
        let mantissa = hypergeometric_1f1_small_a_negative_b_by_ratio(
            0.5,
            -1205.5,
            -6.75,
            &policy(),
            &mut scale,
        )
        .unwrap();
        let result = collapse(mantissa, scale);
        let expected = 1.002_811_490_430_269_2;
        assert!(
            (result - expected).abs() < 1e-12 * expected,
            "{result} vs {expected}"
        );
    }

    #[test]
    fn downward_walk_positive_z_matches_series_region() {
        // Pick a point where the direct series is also still usable so
        // the walk can be validated independently: small z against |b|.
        let (a, b, z) = (1.5, -15.5, 0.5);
        let mut scale = 0i64;
        let mantissa =
            hypergeometric_1f1_from_ratio_negative_b(a, b, z, &policy(), &mut scale).unwrap();
        let result = collapse(mantissa, scale);
        let expected = sum_series(Series1F1::new(a, b, z), &policy()).unwrap();
        assert!(
            (result - expected).abs() < 1e-10 * expected.abs(),
            "{result} vs {expected}"
        );
    }

    #[test]
    fn forwards_walk_matches_kummer_reflection() {
        // z >> |b|: validate against e^z M(b-a, b, -z), whose series
        // converges fast for these arguments.
        let (a, b, z) = (0.5, -4.5, 40.0);
        let mut scale = 0i64;
        let mantissa =
            hypergeometric_1f1_from_ratio_negative_b_forwards(a, b, z, &policy(), &mut scale)
                .unwrap();
        let result = collapse(mantissa, scale);

        let reflected = sum_series(Series1F1::new(b - a, b, -z), &policy()).unwrap();
        let expected = reflected * z.exp();
        assert!(
            (result - expected).abs() < 1e-9 * expected.abs(),
            "{result} vs {expected}"
        );
    }

    #[test]
    fn oversized_walks_are_rejected() {
        let tight = Policy {
            max_series_iterations: 50,
            ..policy()
        };
        let mut scale = 0i64;
        let err =
            hypergeometric_1f1_from_ratio_negative_b(0.5, -500.0, 1.0, &tight, &mut scale)
                .unwrap_err();
        assert!(matches!(err, EvalError::OutOfRange { .. }));
    }
}
