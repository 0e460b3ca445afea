//! Asymptotic large-|z| evaluation
//!
//! For |z| large relative to the parameters, 1F1 is governed by its
//! exponential asymptotics (DLMF §13.7.2):
//!
//! - z → +∞: `M(a,b,z) ~ Γ(b)/Γ(a) e^z z^(a-b) 2F0(b-a, 1-a; ; 1/z)`
//! - z → -∞: `M(a,b,z) ~ Γ(b)/Γ(b-a) (-z)^(-a) 2F0(a, a-b+1; ; -1/z)`
//!
//! The 2F0 series is divergent; summation succeeds only while the
//! terms decrease, which the divergent-series driver enforces. Failure
//! here is soft: the dispatcher restores its saved log-scale and moves
//! on to the next candidate method.

use crate::core::error::EvalError;
use crate::core::policy::Policy;
use crate::core::traits::MathScalar;
use crate::math::gamma::ln_gamma_with_sign;
use crate::math::series::{sum_divergent_series, Series2F0};

/// True when (a, b, z) sits where the asymptotic expansion can reach
/// full precision: |a| and |b| small relative to |z|, and |z| deep
/// enough that the superasymptotic minimum term is below epsilon.
pub(crate) fn asym_region<T: MathScalar>(a: T, b: T, z: T, policy: &Policy<T>) -> bool {
    let absa = a.abs();
    let absb = b.abs();
    let absz = z.abs();

    let in_region = (absa < T::constant(0.001) * absz && absb < T::constant(0.001) * absz)
        || (absa < T::constant(0.01) * absz
            && absb < T::constant(0.01) * absz
            && absz > T::constant(100.0))
        || (absa < T::constant(0.1) * absz
            && absb < T::constant(0.1) * absz
            && absz > T::constant(1000.0));

    // The smallest 2F0 term is ~e^(-|z|); it must undercut epsilon.
    in_region && absz > -policy.epsilon.ln() + T::constant(10.0)
}

/// Asymptotic large-|z| series with the scale credited to `log_scale`.
///
/// Fails (softly) with [`EvalError::DidNotConverge`] when the
/// asymptotic terms cease to decrease before reaching epsilon, and when
/// a gamma pole makes the leading term degenerate.
pub(crate) fn hypergeometric_1f1_asym_large_z<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let one = T::one();

    let (ln_prefix, sign, series) = if z > T::zero() {
        let Some((ln_gamma_b, sign_b)) = ln_gamma_with_sign(b) else {
            return Err(EvalError::DidNotConverge { iterations: 0 });
        };
        let Some((ln_gamma_a, sign_a)) = ln_gamma_with_sign(a) else {
            // 1/Γ(a) = 0: the dominant term vanishes and this
            // expansion says nothing useful; let another method run.
            return Err(EvalError::DidNotConverge { iterations: 0 });
        };
        (
            ln_gamma_b - ln_gamma_a + z + (a - b) * z.ln(),
            sign_b * sign_a,
            Series2F0::new(b - a, one - a, one / z),
        )
    } else {
        let Some((ln_gamma_b, sign_b)) = ln_gamma_with_sign(b) else {
            return Err(EvalError::DidNotConverge { iterations: 0 });
        };
        let Some((ln_gamma_ba, sign_ba)) = ln_gamma_with_sign(b - a) else {
            return Err(EvalError::DidNotConverge { iterations: 0 });
        };
        (
            ln_gamma_b - ln_gamma_ba - a * (-z).ln(),
            sign_b * sign_ba,
            Series2F0::new(a, a - b + one, -one / z),
        )
    };

    let series_sum = sum_divergent_series(series, policy)?;

    let credit = ln_prefix.itrunc();
    *log_scale += credit;
    Ok(sign * (ln_prefix - T::from_shift(credit)).exp() * series_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::Scaled;

    fn policy() -> Policy<f64> {
        Policy::default()
    }

    #[test]
    fn region_bands() {
        let p = policy();
        assert!(asym_region(0.01, 0.02, 60.0, &p));
        assert!(asym_region(0.5, 0.9, 150.0, &p));
        assert!(asym_region(50.0, 80.0, 2000.0, &p));
        // Parameters too large for the band.
        assert!(!asym_region(30.0, 2.0, 150.0, &p));
        // |z| too shallow for the superasymptotic minimum.
        assert!(!asym_region(0.001, 0.001, 20.0, &p));
    }

    #[test]
    fn positive_z_matches_closed_form() {
        // M(1, 2, z) = (e^z - 1)/z ~ e^z / z for large z.
        let p = policy();
        let mut scale = 0i64;
        let value = hypergeometric_1f1_asym_large_z(1.0, 2.0, 200.0, &p, &mut scale).unwrap();
        let result = Scaled::new(value, scale)
            .collapse(&Policy {
                overflow: crate::core::policy::OverflowBehavior::Ignore,
                ..p
            })
            .unwrap();
        let expected = (200.0_f64.exp() - 1.0) / 200.0;
        assert!((result - expected).abs() < 1e-12 * expected);
    }

    #[test]
    fn negative_z_matches_closed_form() {
        // M(1, 2, z) = (e^z - 1)/z -> -1/z as z -> -inf.
        let p = policy();
        let mut scale = 0i64;
        let value = hypergeometric_1f1_asym_large_z(1.0, 2.0, -500.0, &p, &mut scale).unwrap();
        let result = Scaled::new(value, scale).collapse(&p).unwrap();
        let expected = (f64::exp(-500.0) - 1.0) / -500.0;
        assert!((result - expected).abs() < 1e-13 * expected);
    }

    #[test]
    fn negative_z_bessel_identity() {
        // M(1/2, 1, z) = e^(z/2) I_0(z/2); at z = -400 the Hankel
        // expansion of I_0 provides an independent reference.
        let p = policy();
        let mut scale = 0i64;
        let value = hypergeometric_1f1_asym_large_z(0.5, 1.0, -400.0, &p, &mut scale).unwrap();
        let result = Scaled::new(value, scale).collapse(&p).unwrap();
        let y = 200.0_f64;
        let reference = (1.0 / (2.0 * std::f64::consts::PI * y).sqrt())
            * (1.0 + 1.0 / (8.0 * y) + 9.0 / (128.0 * y * y));
        assert!((result - reference).abs() < 5e-8 * reference);
    }

    #[test]
    fn shallow_z_soft_fails() {
        // Terms stop shrinking long before epsilon at |z| = 6 (with
        // b - a chosen non-integer so the 2F0 does not terminate).
        let p = policy();
        let mut scale = 0i64;
        let err = hypergeometric_1f1_asym_large_z(2.5, 1.7, 6.0, &p, &mut scale).unwrap_err();
        assert!(err.is_soft());
    }
}
