//! Real-order cylinder Bessel J values for the Tricomi expansion
//!
//! The 13.3.7 evaluator consumes `J_{b-1+n}(x)` for n = 0, 1, 2, … at
//! a fixed real argument. Ascending-order recurrence is unstable for J,
//! so values are produced by a descending ladder seeded at an order at
//! or above the largest one needed:
//!
//! - seeds: Steed's method (CF1 for `J'/J`, complex CF2 for
//!   `(J' + iY')/(J + iY)`, combined through the Wronskian) for
//!   x ≥ 2, the defining 0F1 series below that,
//! - ladder: `J_{μ-1} = (2μ/x) J_μ - J_{μ+1}` downward with log-scale
//!   renormalization, block-cached so the series can stream orders
//!   without rebuilding the ladder per term.
//!
//! Reference: Numerical Recipes §6.7 (Steed's method), DLMF §10.6
//! <https://dlmf.nist.gov/10.6> for the recurrence.

use crate::core::error::EvalError;
use crate::core::policy::{Policy, ScaleLimits};
use crate::core::traits::MathScalar;
use crate::math::gamma::ln_gamma_with_sign;
use crate::math::series::{sum_series, Series0F1};

/// `(J_nu(x), J_{nu+1}(x))` as mantissas sharing one log-scale.
///
/// Requires `nu >= 0` and `x > 0`.
pub(crate) fn bessel_j_pair_scaled<T: MathScalar>(
    nu: T,
    x: T,
    policy: &Policy<T>,
) -> Result<(T, T, i64), EvalError> {
    if x <= T::zero() || nu < T::zero() {
        return Err(EvalError::domain("cylinder Bessel J needs x > 0, nu >= 0"));
    }
    if x < T::constant(2.0) {
        bessel_j_pair_small_x(nu, x, policy)
    } else {
        bessel_j_pair_steed(nu, x, policy)
    }
}

/// Series evaluation: `J_nu(x) = (x/2)^nu / Γ(nu+1) 0F1(; nu+1; -x²/4)`.
///
/// Below x = 2 the alternation is mild and the series holds full
/// precision; the power/gamma prefix is carried in log form so large
/// orders do not underflow.
fn bessel_j_pair_small_x<T: MathScalar>(
    nu: T,
    x: T,
    policy: &Policy<T>,
) -> Result<(T, T, i64), EvalError> {
    let one = T::one();
    let two = T::constant(2.0);
    let half_x = x / two;
    let w = -half_x * half_x;

    let (ln_gamma_1, _) =
        ln_gamma_with_sign(nu + one).ok_or_else(|| EvalError::domain("gamma pole"))?;
    let (ln_gamma_2, _) =
        ln_gamma_with_sign(nu + two).ok_or_else(|| EvalError::domain("gamma pole"))?;

    let ln_prefix_0 = nu * half_x.ln() - ln_gamma_1;
    let ln_prefix_1 = (nu + one) * half_x.ln() - ln_gamma_2;

    let sum_0 = sum_series(Series0F1::new(nu + one, w), policy)?;
    let sum_1 = sum_series(Series0F1::new(nu + two, w), policy)?;

    let scale = ln_prefix_0.itrunc();
    let j0 = (ln_prefix_0 - T::from_shift(scale)).exp() * sum_0;
    let j1 = (ln_prefix_1 - T::from_shift(scale)).exp() * sum_1;
    Ok((j0, j1, scale))
}

/// Steed's method for x >= 2.
fn bessel_j_pair_steed<T: MathScalar>(
    nu: T,
    x: T,
    policy: &Policy<T>,
) -> Result<(T, T, i64), EvalError> {
    let one = T::one();
    let two = T::constant(2.0);
    let fpmin = T::min_positive_value() / T::epsilon();
    let xi = one / x;
    let xi2 = two * xi;

    // CF1: h = J'_nu / J_nu, tracking the sign of J_nu.
    let mut isign = one;
    let mut h = nu * xi;
    if h < fpmin {
        h = fpmin;
    }
    let mut b = xi2 * nu;
    let mut d = T::zero();
    let mut c = h;
    let mut converged = false;
    for _ in 0..policy.max_series_iterations {
        b += xi2;
        d = b - d;
        if d.abs() < fpmin {
            d = fpmin;
        }
        c = b - one / c;
        if c.abs() < fpmin {
            c = fpmin;
        }
        d = one / d;
        let del = c * d;
        h = h * del;
        if d < T::zero() {
            isign = -isign;
        }
        if (del - one).abs() < policy.epsilon {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(EvalError::DidNotConverge {
            iterations: policy.max_series_iterations,
        });
    }

    // Walk the order down to xmu in (nu - x - 1/2, nu] where CF2 holds.
    let nl = (nu - x + T::constant(1.5)).itrunc().max(0);
    let xmu = nu - T::from_shift(nl);

    let limits = ScaleLimits::new(policy);
    let mut ladder_scale: i64 = 0;
    let mut rjl = isign * fpmin;
    let mut rjpl = h * rjl;
    let rjl1 = rjl;
    let rjp1 = rjpl;
    let mut fact = nu * xi;
    for _ in 0..nl {
        let rjtemp = fact * rjl + rjpl;
        fact -= xi;
        rjpl = fact * rjtemp - rjl;
        rjl = rjtemp;
        limits.renormalize(&mut rjl, &mut [&mut rjpl], &mut ladder_scale);
    }
    if rjl == T::zero() {
        rjl = policy.epsilon;
    }
    let f = rjpl / rjl;

    // CF2: p + iq = (J'_xmu + iY'_xmu)/(J_xmu + iY_xmu), complex Lentz.
    let mut a0 = T::constant(0.25) - xmu * xmu;
    let mut p = -T::constant(0.5) * xi;
    let mut q = one;
    let br = two * x;
    let mut bi = two;
    let mut fact2 = a0 * xi / (p * p + q * q);
    let mut cr = br + q * fact2;
    let mut ci = bi + p * fact2;
    let mut den = br * br + bi * bi;
    let mut dr = br / den;
    let mut di = -bi / den;
    let dlr = cr * dr - ci * di;
    let dli = cr * di + ci * dr;
    let temp = p * dlr - q * dli;
    q = p * dli + q * dlr;
    p = temp;
    let mut converged = false;
    let mut i = one;
    for _ in 2..policy.max_series_iterations.max(3) {
        a0 += two * i;
        i += one;
        bi += two;
        dr = a0 * dr + br;
        di = a0 * di + bi;
        if dr.abs() + di.abs() < fpmin {
            dr = fpmin;
        }
        fact2 = a0 / (cr * cr + ci * ci);
        cr = br + cr * fact2;
        ci = bi - ci * fact2;
        if cr.abs() + ci.abs() < fpmin {
            cr = fpmin;
        }
        den = dr * dr + di * di;
        dr = dr / den;
        di = -di / den;
        let dlr = cr * dr - ci * di;
        let dli = cr * di + ci * dr;
        let temp = p * dlr - q * dli;
        q = p * dli + q * dlr;
        p = temp;
        if (dlr - one).abs() + dli.abs() < policy.epsilon {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(EvalError::DidNotConverge {
            iterations: policy.max_series_iterations,
        });
    }

    // Wronskian W = J Y' - Y J' = 2/(πx).
    let w = xi2 / T::PI();
    let gam = (p - f) / q;
    let rjmu = (w / ((p - f) * gam + q)).sqrt().copysign(rjl);

    // Scale back up to order nu.
    let jnu = rjl1 * (rjmu / rjl);
    let jnup1 = ((nu * xi) * rjl1 - rjp1) * (rjmu / rjl);
    Ok((jnu, jnup1, -ladder_scale))
}

const LADDER_BLOCK: usize = 64;

/// Streaming source of `J_{nu0 + n}(x)` for ascending n, backed by a
/// descending-ladder block cache.
pub(crate) struct BesselJLadder<T> {
    nu0: T,
    x: T,
    values: [(T, i64); LADDER_BLOCK],
    lo: i64,
    hi: i64,
}

impl<T: MathScalar> BesselJLadder<T> {
    pub fn new(nu0: T, x: T) -> Self {
        BesselJLadder {
            nu0,
            x,
            values: [(T::zero(), 0); LADDER_BLOCK],
            lo: 0,
            hi: -1,
        }
    }

    /// `J_{nu0 + n}(x)` as `(mantissa, log_scale)`.
    ///
    /// Orders are consumed in ascending blocks; each new block reseeds
    /// the ladder at a non-negative order at or above its top, so
    /// negative base orders are reached only by the stable downward
    /// walk.
    pub fn get(&mut self, n: i64, policy: &Policy<T>) -> Result<(T, i64), EvalError> {
        if n < self.lo {
            return Err(EvalError::out_of_range(
                "Bessel ladder consumed below its cached block",
            ));
        }
        if n > self.hi {
            self.fill_block(n, policy)?;
        }
        let (mantissa, scale) = self.values[(n - self.lo) as usize];
        Ok((mantissa, scale))
    }

    fn fill_block(&mut self, lo: i64, policy: &Policy<T>) -> Result<(), EvalError> {
        let hi = lo + LADDER_BLOCK as i64 - 1;
        let top = (-self.nu0).ceil().itrunc().max(hi);
        let nu_top = self.nu0 + T::from_shift(top);

        let (j_top, j_top_plus_1, seed_scale) = bessel_j_pair_scaled(nu_top, self.x, policy)?;

        let limits = ScaleLimits::new(policy);
        let mut upper = j_top_plus_1; // J_{mu+1}
        let mut current = j_top; // J_mu
        let mut scale = seed_scale;
        let mut mu = nu_top;
        let two = T::constant(2.0);

        let mut index = top;
        loop {
            if index <= hi {
                self.values[(index - lo) as usize] = (current, scale);
            }
            if index == lo {
                break;
            }
            // J_{mu-1} = (2 mu / x) J_mu - J_{mu+1}
            let lower = (two * mu / self.x) * current - upper;
            upper = current;
            current = lower;
            limits.renormalize(&mut current, &mut [&mut upper], &mut scale);
            mu -= T::one();
            index -= 1;
        }

        self.lo = lo;
        self.hi = hi;
        Ok(())
    }
}
