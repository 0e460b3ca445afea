//! Peak-started summation for positive parameters with large a·z
//!
//! For a > 0, b > 0, z > 0 every Taylor term is positive, so there is
//! no cancellation, but when a·z is large the series only converges
//! after thousands of terms and the biggest of them can be far outside
//! the scalar's range. Instead of marching from n = 0 this evaluator
//! locates the peak term index n₀ (the root of
//! `(a+n) z = (b+n)(n+1)`), computes `ln t_{n₀}` directly from
//! log-gamma, credits its integer part to the log-scale, and sums the
//! ratio-linked terms outward in both directions. The rounding
//! accumulation is then bounded by the width of the peak rather than
//! by n₀.

use crate::core::error::EvalError;
use crate::core::policy::Policy;
use crate::core::traits::MathScalar;
use crate::math::gamma::ln_gamma_with_sign;
use crate::math::series::hypergeometric_1f1_series_scaled;

/// Series evaluation from the peak term outward; requires a > 0,
/// b > 0, z > 0.
pub(crate) fn hypergeometric_1f1_large_abz<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let one = T::one();

    // Peak of t_n: (a+n) z = (b+n)(n+1), the positive root of
    // n^2 + n (b + 1 - z) - (a z - b) = 0.
    let c1 = z - b - one;
    let discriminant = c1 * c1 + T::constant(4.0) * (a * z - b);
    let peak = if discriminant > T::zero() {
        ((c1 + discriminant.sqrt()) / T::constant(2.0)).floor()
    } else {
        T::zero()
    };
    if peak < one {
        // Terms decrease from the start; the plain scaled series is
        // already optimal.
        return hypergeometric_1f1_series_scaled(a, b, z, policy, log_scale);
    }
    let n0 = peak.itrunc() as u64;

    // ln t_{n0}; every gamma argument is positive here.
    let (ln_num_a, _) = ln_gamma_with_sign(a + peak).ok_or(EvalError::NoMethodAvailable)?;
    let (ln_den_a, _) = ln_gamma_with_sign(a).ok_or(EvalError::NoMethodAvailable)?;
    let (ln_num_b, _) = ln_gamma_with_sign(b).ok_or(EvalError::NoMethodAvailable)?;
    let (ln_den_b, _) = ln_gamma_with_sign(b + peak).ok_or(EvalError::NoMethodAvailable)?;
    let (ln_factorial, _) =
        ln_gamma_with_sign(peak + one).ok_or(EvalError::NoMethodAvailable)?;
    let ln_peak_term =
        ln_num_a - ln_den_a + ln_num_b - ln_den_b + peak * z.ln() - ln_factorial;

    let credit = ln_peak_term.itrunc();
    let peak_term = (ln_peak_term - T::from_shift(credit)).exp();

    // Forward from the peak.
    let mut sum = peak_term;
    let mut term = peak_term;
    let mut iterations: u32 = 0;
    let mut n = peak;
    loop {
        term = term * (a + n) * z / ((b + n) * (n + one));
        n += one;
        sum += term;
        if term <= policy.epsilon * sum {
            break;
        }
        iterations += 1;
        if iterations > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations });
        }
    }

    // Backward from the peak down to n = 0.
    term = peak_term;
    let mut k = n0;
    let mut m = peak;
    while k > 0 {
        m -= one;
        term = term * (b + m) * (m + one) / ((a + m) * z);
        sum += term;
        k -= 1;
        if term <= policy.epsilon * sum {
            break;
        }
    }

    *log_scale += credit;
    Ok(sum)
}
