//! Bessel-form evaluations of 1F1 (A&S 13.3.6 / 13.3.7)
//!
//! Two expansions connect 1F1 to Bessel functions:
//!
//! - **A&S 13.3.7 (Tricomi)**: with κ = b/2 - a,
//!   `M(a,b,z) = Γ(b) e^(z/2) Σ A_n (z/2)^n (κz)^(-(b-1+n)/2)
//!   J_{b-1+n}(2 sqrt(κz))`, coefficients per A&S 13.3.8:
//!   `A_0 = 1, A_1 = 0, A_2 = b/2,
//!   (n+1) A_{n+1} = (n+b-1) A_{n-1} + (2a-b) A_{n-2}`.
//!   Through `J_ν(2 sqrt(w)) w^(-ν/2) = 0F1(; ν+1; -w)/Γ(ν+1)` the
//!   same series reads
//!   `M(a,b,z) = e^(z/2) Σ A_n (z/2)^n 0F1(; b+n; -κz) / (b)_n`,
//!   which is the cancellation-free form used when the Bessel argument
//!   is small or imaginary (κz ≤ 4, the modified-Bessel side). For
//!   κz > 4 the oscillatory J values come from the descending ladder.
//!
//! - **A&S 13.3.6**: the wedge where `a` is tiny against `b` and
//!   z < 0. The dispatcher folds through Kummer's relation first, so
//!   this evaluator sees arguments `(b-a, b, -z)` whose Taylor terms
//!   are single-signed; it is the scaled series with the 13.3.6
//!   region/scale contract (the caller credits ⌊z⌋ and multiplies by
//!   `e^(z-⌊z⌋)`).

use crate::core::error::EvalError;
use crate::core::policy::{Policy, ScaledSum, ScaleLimits};
use crate::core::traits::MathScalar;
use crate::math::bessel::BesselJLadder;
use crate::math::gamma::ln_gamma_with_sign;
use crate::math::series::{
    hypergeometric_0f1_series_scaled, hypergeometric_1f1_series_scaled,
};

/// Staircase estimate of how fast successive modified-Bessel terms of
/// the 13.3.6 expansion shrink (approximately
/// `I_{10.5}(z/2) / I_{9.5}(z/2)`).
pub(crate) fn cyl_bessel_i_shrinkage_rate<T: MathScalar>(z: T) -> T {
    if z < T::constant(160.0) {
        return T::one();
    }
    if z < T::constant(40.0) {
        return T::constant(0.75);
    }
    if z < T::constant(20.0) {
        return T::constant(0.5);
    }
    if z < T::constant(7.0) {
        return T::constant(0.25);
    }
    if z < T::constant(2.0) {
        return T::constant(0.1);
    }
    T::constant(0.05)
}

/// True when (a, b, z) sits in the A&S 13.3.6 wedge: z < 0, a tiny
/// against b, the leading expansion term tame and the tenth term
/// convergent.
pub(crate) fn is_13_3_6_region<T: MathScalar>(a: T, b: T, z: T) -> bool {
    let two = T::constant(2.0);
    let ten = T::constant(10.0);
    if a.abs() == T::constant(0.5) {
        return false;
    }
    if z < T::zero() && (ten * a / b).abs() < T::one() && a.abs() < T::constant(50.0) {
        let shrinkage = cyl_bessel_i_shrinkage_rate(z);
        let first = ((two * a - T::one()) * (two * a - b) / b).abs();
        let tenth = (shrinkage * (two * a + T::constant(9.0)) * (two * a - b + ten)
            / (ten * (b + ten)))
            .abs();
        return first < two && tenth < T::constant(0.75);
    }
    false
}

/// Viability of the Tricomi expansion for b > 0 (the dispatcher has
/// already checked `z < |(2a-b)/sqrt(|a|)|`).
pub(crate) fn is_tricomi_viable_positive_b<T: MathScalar>(a: T, b: T, z: T) -> bool {
    // The backward recurrence on a is cheaper and water-tight here;
    // for z < 0 there is no recurrence alternative, so fall through to
    // the coefficient check.
    if z > T::zero() && z < b && a > T::constant(-50.0) {
        return false;
    }
    // First nonzero correction term must not swamp the leading one:
    // A_3 (z/2)^3/(b)_3 = (2a/3)(z/2)^3/(b (b+1) (b+2)).
    let half_z = z / T::constant(2.0);
    let third_term = T::constant(2.0 / 3.0) * a * half_z * half_z * half_z
        / (b * (b + T::one()) * (b + T::constant(2.0)));
    third_term.abs() < T::constant(10.0)
}

/// A&S 13.3.6 evaluation of `M(first, b, y)` for the folded wedge
/// arguments (`first ≈ b`, y > 0). In this wedge the Taylor terms are
/// single-signed, so the renormalizing series is exact; the caller
/// applies the `e^(z - ⌊z⌋)` fold and the ⌊z⌋ scale credit.
pub(crate) fn hypergeometric_1f1_as_13_3_6<T: MathScalar>(
    first: T,
    b: T,
    y: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    hypergeometric_1f1_series_scaled(first, b, y, policy, log_scale)
}

/// A&S 13.3.7 (Tricomi) evaluation.
pub(crate) fn hypergeometric_1f1_as_13_3_7_tricomi<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let bessel_arg = (b / T::constant(2.0) - a) * z;
    if bessel_arg > T::constant(4.0) {
        tricomi_oscillatory(a, b, z, bessel_arg, policy, log_scale)
    } else {
        tricomi_modified(a, b, z, bessel_arg, policy, log_scale)
    }
}

/// Advance the A&S 13.3.8 coefficient recurrence expressed on the
/// premultiplied values `P_n = A_n q^n / d_n`, where consecutive
/// denominator ratios are supplied by the caller.
struct TricomiCoefficients<T> {
    p_prev2: T, // P_{n-2}
    p_prev: T,  // P_{n-1}
    p: T,       // P_n
    log_scale: i64,
    n: u32,
}

impl<T: MathScalar> TricomiCoefficients<T> {
    fn new(p0: T, p1: T, p2: T) -> Self {
        TricomiCoefficients {
            p_prev2: p0,
            p_prev: p1,
            p: p2,
            log_scale: 0,
            n: 2,
        }
    }

    /// Step to n+1 with `P_{n+1} = ((n+b-1) f1 P_{n-1} + (2a-b) f2 P_{n-2})/(n+1)`.
    fn step(&mut self, b: T, two_a_minus_b: T, f1: T, f2: T, limits: &ScaleLimits<T>) {
        let n = T::from_index(self.n);
        let next = ((n + b - T::one()) * f1 * self.p_prev
            + two_a_minus_b * f2 * self.p_prev2)
            / (n + T::one());
        self.p_prev2 = self.p_prev;
        self.p_prev = self.p;
        self.p = next;
        self.n += 1;
        let mut primary = self.p;
        {
            let mut companions = [&mut self.p_prev, &mut self.p_prev2];
            limits.renormalize(&mut primary, &mut companions, &mut self.log_scale);
        }
        self.p = primary;
    }
}

/// Modified-Bessel side (κz ≤ 4): per-term 0F1, no cancellation in the
/// auxiliary series.
fn tricomi_modified<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    bessel_arg: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let one = T::one();
    let two = T::constant(2.0);
    let half_z = z / two;
    let w = -bessel_arg; // 0F1 argument
    let two_a_minus_b = two * a - b;
    let limits = ScaleLimits::new(policy);

    // P_n = A_n (z/2)^n / (b)_n.
    let p0 = one;
    let p1 = T::zero();
    let p2 = half_z * half_z / (two * (b + one)); // (b/2)(z/2)^2/(b(b+1))
    let mut coefficients = TricomiCoefficients::new(p0, p1, p2);

    let mut accumulator = ScaledSum::new();
    let mut small_streak = 0u32;
    let mut n: u32 = 0;
    loop {
        let p_n = match n {
            0 => p0,
            1 => p1,
            _ => coefficients.p,
        };
        let p_scale = if n < 2 { 0 } else { coefficients.log_scale };
        if p_n != T::zero() {
            let mut term_scale = p_scale;
            let auxiliary = hypergeometric_0f1_series_scaled(
                b + T::from_index(n),
                w,
                policy,
                &mut term_scale,
            )?;
            let rebased = accumulator.add(p_n * auxiliary, term_scale);
            if n >= 2 && rebased.abs() <= policy.epsilon * accumulator.sum.abs() {
                small_streak += 1;
                if small_streak >= 2 {
                    break;
                }
            } else {
                small_streak = 0;
            }
        }
        if n > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations: n });
        }
        if n >= 2 {
            let b_n = b + T::from_index(n);
            let f1 = half_z * half_z / ((b_n - one) * b_n);
            let f2 = half_z * half_z * half_z / ((b_n - two) * (b_n - one) * b_n);
            coefficients.step(b, two_a_minus_b, f1, f2, &limits);
        }
        n += 1;
    }

    // Fold in e^(z/2) with its integer part credited to the scale.
    let credit = half_z.itrunc();
    *log_scale += accumulator.log_scale + credit;
    Ok(accumulator.sum * (half_z - T::from_shift(credit)).exp())
}

/// Oscillatory side (κz > 4): streamed `J_{b-1+n}` from the ladder.
fn tricomi_oscillatory<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    bessel_arg: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let one = T::one();
    let two = T::constant(2.0);
    let half_z = z / two;
    let two_a_minus_b = two * a - b;
    let x = two * bessel_arg.sqrt();
    let r = half_z / bessel_arg.sqrt();
    let limits = ScaleLimits::new(policy);

    let Some((ln_gamma_b, gamma_sign)) = ln_gamma_with_sign(b) else {
        return Err(EvalError::domain("gamma pole at b"));
    };
    let ln_prefix = ln_gamma_b - (b - one) / two * bessel_arg.ln() + half_z;

    let mut ladder = BesselJLadder::new(b - one, x);

    // P_n = A_n r^n.
    let p0 = one;
    let p1 = T::zero();
    let p2 = b / two * r * r;
    let mut coefficients = TricomiCoefficients::new(p0, p1, p2);

    let mut accumulator = ScaledSum::new();
    let mut small_streak = 0u32;
    let mut n: u32 = 0;
    loop {
        let p_n = match n {
            0 => p0,
            1 => p1,
            _ => coefficients.p,
        };
        let p_scale = if n < 2 { 0 } else { coefficients.log_scale };
        if p_n != T::zero() {
            let (j_mantissa, j_scale) = ladder.get(i64::from(n), policy)?;
            let rebased = accumulator.add(p_n * j_mantissa, p_scale + j_scale);
            if n >= 2 && rebased.abs() <= policy.epsilon * accumulator.sum.abs() {
                small_streak += 1;
                if small_streak >= 2 {
                    break;
                }
            } else {
                small_streak = 0;
            }
        }
        if n > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations: n });
        }
        if n >= 2 {
            coefficients.step(b, two_a_minus_b, r * r, r * r * r, &limits);
        }
        n += 1;
    }

    let credit = ln_prefix.itrunc();
    *log_scale += accumulator.log_scale + credit;
    Ok(gamma_sign * accumulator.sum * (ln_prefix - T::from_shift(credit)).exp())
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
    fn shrinkage_staircase_shape() {
        // Every negative argument lands in the first band.
        assert_eq!(cyl_bessel_i_shrinkage_rate(-2539.6_f64), 1.0);
        assert_eq!(cyl_bessel_i_shrinkage_rate(-0.5_f64), 1.0);
        assert_eq!(cyl_bessel_i_shrinkage_rate(1000.0_f64), 0.05);
    }

    #[test]
    fn region_13_3_6_membership() {
        // The degenerate spot (1.29e-17, 1, -2539.6) belongs to the wedge.
        assert!(is_13_3_6_region(1.2860067365774887e-17, 1.0, -2539.60133934021));
        // Half-integer a is excluded outright.
        assert!(!is_13_3_6_region(0.5, 10.0, -5.0));
        // Positive z is never in the wedge.
        assert!(!is_13_3_6_region(1e-10, 1.0, 5.0));
        // a not tiny against b.
        assert!(!is_13_3_6_region(3.0, 4.0, -5.0));
    }

    #[test]
    fn tricomi_viability_prefers_recurrence() {
        assert!(!is_tricomi_viable_positive_b(-5.0, 10.0, 3.0));
        // Tiny b blows up the third coefficient term.
        assert!(!is_tricomi_viable_positive_b(-17955.0, 9.7e-9, 82.4));
    }

    #[test]
    fn tricomi_modified_matches_series() {
        // Convergent spot where the plain series is still healthy:
        // bessel_arg = (b/2 - a) z < 0 exercises the modified side.
        let (a, b, z) = (3.0, 4.0, 2.5);
        let mut scale = 0i64;
        let mantissa =
            hypergeometric_1f1_as_13_3_7_tricomi(a, b, z, &policy(), &mut scale).unwrap();
        let result = collapse(mantissa, scale);
        let expected = sum_series(Series1F1::new(a, b, z), &policy()).unwrap();
        assert!(
            (result - expected).abs() < 1e-11 * expected.abs(),
            "{result} vs {expected}"
        );
    }

    #[test]
    fn tricomi_oscillatory_matches_series() {
        // bessel_arg = (b/2 - a) z = 45.5: oscillatory side, while the
        // direct series is still sane enough to compare against.
        let (a, b, z) = (-1.5, 4.0, 13.0);
        let mut scale = 0i64;
        let mantissa =
            hypergeometric_1f1_as_13_3_7_tricomi(a, b, z, &policy(), &mut scale).unwrap();
        let result = collapse(mantissa, scale);
        let expected = sum_series(Series1F1::new(a, b, z), &policy()).unwrap();
        assert!(
            (result - expected).abs() < 1e-9 * expected.abs().max(1.0),
            "{result} vs {expected}"
        );
    }

    #[test]
    fn tricomi_degenerate_kappa_zero() {
        // b = 2a makes κ = 0; the expansion collapses to the modified
        // side and must still reproduce M(a, 2a, z).
        let (a, z) = (2.25, 3.0);
        let mut scale = 0i64;
        let mantissa =
            hypergeometric_1f1_as_13_3_7_tricomi(a, 2.0 * a, z, &policy(), &mut scale).unwrap();
        let result = collapse(mantissa, scale);
        let expected = sum_series(Series1F1::new(a, 2.0 * a, z), &policy()).unwrap();
        assert!((result - expected).abs() < 1e-12 * expected.abs());
    }

    #[test]
    fn wedge_evaluator_is_single_signed_series() {
        // Folded arguments: first ≈ b, y > 0; all terms positive.
        let mut scale = 0i64;
        let value =
            hypergeometric_1f1_as_13_3_6(0.999_999_9, 1.0, 30.0, &policy(), &mut scale)
                .unwrap();
        let result = collapse(value, scale);
        let expected = sum_series(Series1F1::new(0.999_999_9, 1.0, 30.0), &policy()).unwrap();
        assert!((result - expected).abs() < 1e-12 * expected);
    }
}
