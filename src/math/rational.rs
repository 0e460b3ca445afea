//! Rational-function evaluation for small arguments
//!
//! Two continued-fraction rational forms, both evaluated by modified
//! Lentz so every convergent is a rational function of `z`:
//!
//! - [`hypergeometric_1f1_rational`]: the Euler transform of the 1F1
//!   Taylor series, used where `|a z / b| < 3.5` and `|z|` is tiny
//!   relative to `|b|`; the fraction absorbs the mild alternation that
//!   plain summation would pay for in cancelled digits.
//! - [`hypergeometric_1f1_pade`]: the `a = 1` branch. `M(1, b, z)`
//!   satisfies the ladder `M(1, b, z) = 1 + (z/b) M(1, b+1, z)`, whose
//!   unwinding is a Padé-type fraction in `z`.
//!
//! The Euler transform of `1 + Σ_{k≥1} Π_{j≤k} r_j` used here is
//! `1/(1 - r_1/(1 + r_1 - r_2/(1 + r_2 - r_3/(...))))`.

use crate::core::error::EvalError;
use crate::core::policy::{Policy, ScaleLimits};
use crate::core::traits::MathScalar;

/// Modified Lentz evaluation of the Euler fraction built from the
/// term ratios `ratio(j) = t_j / t_{j-1}`, `j >= 1`.
fn euler_fraction<T, F>(mut ratio: F, policy: &Policy<T>) -> Result<T, EvalError>
where
    T: MathScalar,
    F: FnMut(u32) -> T,
{
    let tiny = T::min_positive_value() / T::epsilon();
    let one = T::one();

    // Fraction terms: a_1 = 1, b_1 = 1, a_{j+1} = -r_j, b_{j+1} = 1 + r_j.
    let mut f = tiny;
    let mut c = f;
    let mut d = T::zero();
    let mut previous_ratio = T::zero();

    for j in 1..=policy.max_series_iterations {
        let (aj, bj) = if j == 1 {
            (one, one)
        } else {
            (-previous_ratio, one + previous_ratio)
        };
        d = bj + aj * d;
        if d == T::zero() {
            d = tiny;
        }
        c = bj + aj / c;
        if c == T::zero() {
            c = tiny;
        }
        d = one / d;
        let delta = c * d;
        f = f * delta;
        if (delta - one).abs() < policy.epsilon {
            return Ok(f);
        }
        previous_ratio = ratio(j);
        // A zero ratio means the series terminates exactly here.
        if previous_ratio == T::zero() {
            return Ok(f);
        }
    }
    Err(EvalError::DidNotConverge {
        iterations: policy.max_series_iterations,
    })
}

/// Rational (continued-fraction) evaluation of `M(a, b, z)` for the
/// small-argument region `|a z / b| < 3.5` and `|100 z| < |b|`.
pub(crate) fn hypergeometric_1f1_rational<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
) -> Result<T, EvalError> {
    euler_fraction(
        |j| {
            let jf = T::from_index(j);
            (a + jf - T::one()) / ((b + jf - T::one()) * jf) * z
        },
        policy,
    )
}

/// Rational evaluation of `M(1, b, z)`, the `a = 1` Kummer branch.
///
/// Through the lower incomplete gamma function
/// (`γ(s, x) = s⁻¹ xˢ e⁻ˣ M(1, 1+s, x)`, DLMF 8.5.1) the branch has
/// the real, cancellation-free form
///
/// ```text
/// M(1, b, z) = (b - 1) e^z Σ_{n≥0} (-z)^n / (n! (b - 1 + n))
/// ```
///
/// whose terms are single-signed for z < 0 and b > 1 (the branch's
/// home region). The sum grows like `e^|z|` against the `e^z` prefix,
/// so it runs under the renormalizing discipline with the net scale
/// credited to `log_scale`.
pub(crate) fn hypergeometric_1f1_pade<T: MathScalar>(
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let one = T::one();
    let w = -z;
    let limits = ScaleLimits::new(policy);

    let mut inner_scale = 0i64;
    let mut sum = T::zero();
    let mut term = one / (b - one);
    let mut n: u32 = 0;
    loop {
        sum += term;
        limits.renormalize(&mut sum, &mut [&mut term], &mut inner_scale);
        let nf = T::from_index(n);
        term = term * w * (b - one + nf) / ((nf + one) * (b + nf));
        if n > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations: n });
        }
        n += 1;
        if term.abs() <= policy.epsilon * sum.abs() {
            break;
        }
    }

    let credit = z.itrunc();
    *log_scale += inner_scale + credit;
    Ok((b - one) * sum * (z - T::from_shift(credit)).exp())
}
