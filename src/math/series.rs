//! Generalized hypergeometric series terms and summation drivers
//!
//! The pFq Taylor terms are produced by small stateful generators that
//! advance by a rational multiplicative update, so no factorials or
//! rising factorials are ever materialized. Three summation drivers sit
//! on top:
//!
//! - [`sum_series`]: plain epsilon-terminated accumulation, for regimes
//!   where the terms stay inside the scalar's range,
//! - [`hypergeometric_1f1_series_scaled`] /
//!   [`hypergeometric_0f1_series_scaled`]: accumulation with the
//!   log-scale renormalization discipline, for regimes where the sum
//!   travels outside the representable range,
//! - [`hypergeometric_1f1_checked_series`]: the scaled 1F1 driver plus
//!   a cancellation monitor that refuses to return a sum whose largest
//!   partial sum dwarfs the final value.
//!
//! Reference: DLMF §16.2 <https://dlmf.nist.gov/16.2> for the series
//! definitions.

use crate::core::error::EvalError;
use crate::core::policy::{Policy, ScaleLimits};
use crate::core::traits::MathScalar;

/// Terms of 0F1(; b; z).
#[derive(Debug, Clone)]
pub(crate) struct Series0F1<T> {
    n: u32,
    term: T,
    b: T,
    z: T,
}

impl<T: MathScalar> Series0F1<T> {
    pub fn new(b: T, z: T) -> Self {
        Series0F1 {
            n: 0,
            term: T::one(),
            b,
            z,
        }
    }
}

impl<T: MathScalar> Iterator for Series0F1<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let r = self.term;
        let n = T::from_index(self.n);
        self.term = self.term * self.z / ((self.b + n) * (n + T::one()));
        self.n += 1;
        Some(r)
    }
}

/// Terms of 1F0(a; ; z).
#[derive(Debug, Clone)]
pub(crate) struct Series1F0<T> {
    n: u32,
    term: T,
    a: T,
    z: T,
}

impl<T: MathScalar> Series1F0<T> {
    pub fn new(a: T, z: T) -> Self {
        Series1F0 {
            n: 0,
            term: T::one(),
            a,
            z,
        }
    }
}

impl<T: MathScalar> Iterator for Series1F0<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let r = self.term;
        let n = T::from_index(self.n);
        self.term = self.term * ((self.a + n) / (n + T::one())) * self.z;
        self.n += 1;
        Some(r)
    }
}

/// Terms of 1F1(a; b; z).
#[derive(Debug, Clone)]
pub(crate) struct Series1F1<T> {
    n: u32,
    term: T,
    a: T,
    b: T,
    z: T,
}

impl<T: MathScalar> Series1F1<T> {
    pub fn new(a: T, b: T, z: T) -> Self {
        Series1F1 {
            n: 0,
            term: T::one(),
            a,
            b,
            z,
        }
    }
}

impl<T: MathScalar> Iterator for Series1F1<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let r = self.term;
        let n = T::from_index(self.n);
        self.term = self.term * ((self.a + n) / ((self.b + n) * (n + T::one()))) * self.z;
        self.n += 1;
        Some(r)
    }
}

/// Terms of 1F2(a; b1, b2; z).
#[derive(Debug, Clone)]
pub(crate) struct Series1F2<T> {
    n: u32,
    term: T,
    a: T,
    b1: T,
    b2: T,
    z: T,
}

impl<T: MathScalar> Series1F2<T> {
    pub fn new(a: T, b1: T, b2: T, z: T) -> Self {
        Series1F2 {
            n: 0,
            term: T::one(),
            a,
            b1,
            b2,
            z,
        }
    }
}

impl<T: MathScalar> Iterator for Series1F2<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let r = self.term;
        let n = T::from_index(self.n);
        self.term = self.term
            * ((self.a + n) / ((self.b1 + n) * (self.b2 + n) * (n + T::one())))
            * self.z;
        self.n += 1;
        Some(r)
    }
}

/// Terms of 2F0(a1, a2; ; z); the divergent asymptotic building block.
#[derive(Debug, Clone)]
pub(crate) struct Series2F0<T> {
    n: u32,
    term: T,
    a1: T,
    a2: T,
    z: T,
}

impl<T: MathScalar> Series2F0<T> {
    pub fn new(a1: T, a2: T, z: T) -> Self {
        Series2F0 {
            n: 0,
            term: T::one(),
            a1,
            a2,
            z,
        }
    }
}

impl<T: MathScalar> Iterator for Series2F0<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let r = self.term;
        let n = T::from_index(self.n);
        self.term = self.term * ((self.a1 + n) * (self.a2 + n) / (n + T::one())) * self.z;
        self.n += 1;
        Some(r)
    }
}

/// Terms of 2F1(a1, a2; b; z).
#[derive(Debug, Clone)]
pub(crate) struct Series2F1<T> {
    n: u32,
    term: T,
    a1: T,
    a2: T,
    b: T,
    z: T,
}

impl<T: MathScalar> Series2F1<T> {
    pub fn new(a1: T, a2: T, b: T, z: T) -> Self {
        Series2F1 {
            n: 0,
            term: T::one(),
            a1,
            a2,
            b,
            z,
        }
    }
}

impl<T: MathScalar> Iterator for Series2F1<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let r = self.term;
        let n = T::from_index(self.n);
        self.term = self.term
            * ((self.a1 + n) * (self.a2 + n) / ((self.b + n) * (n + T::one())))
            * self.z;
        self.n += 1;
        Some(r)
    }
}

/// Accumulate a series until the relative increment drops below the
/// policy epsilon.
///
/// Terminating series (negative-integer numerator parameters) stop
/// naturally when the term reaches zero. Fails with
/// [`EvalError::DidNotConverge`] when the iteration budget runs out.
pub(crate) fn sum_series<T, I>(series: I, policy: &Policy<T>) -> Result<T, EvalError>
where
    T: MathScalar,
    I: IntoIterator<Item = T>,
{
    let mut sum = T::zero();
    let mut iterations: u32 = 0;
    for term in series {
        sum += term;
        if term.abs() <= policy.epsilon * sum.abs() {
            return Ok(sum);
        }
        iterations += 1;
        if iterations > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations });
        }
    }
    Ok(sum)
}

/// Accumulate a divergent (asymptotic) series: succeeds when the
/// relative increment reaches epsilon, fails softly as soon as the
/// terms stop decreasing before that.
pub(crate) fn sum_divergent_series<T, I>(series: I, policy: &Policy<T>) -> Result<T, EvalError>
where
    T: MathScalar,
    I: IntoIterator<Item = T>,
{
    let mut sum = T::zero();
    let mut last_term = T::max_value();
    let mut iterations: u32 = 0;
    for term in series {
        if term.abs() >= last_term.abs() {
            return Err(EvalError::DidNotConverge { iterations });
        }
        last_term = term;
        sum += term;
        if term.abs() <= policy.epsilon * sum.abs() {
            return Ok(sum);
        }
        iterations += 1;
        if iterations > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations });
        }
    }
    Ok(sum)
}

/// 1F0(a; ; z) by the generic driver.
#[allow(dead_code, reason = "completes the pFq generator family the strategies draw on")]
pub(crate) fn hypergeometric_1f0_series<T: MathScalar>(
    a: T,
    z: T,
    policy: &Policy<T>,
) -> Result<T, EvalError> {
    sum_series(Series1F0::new(a, z), policy)
}

/// 1F2(a; b1, b2; z) by the generic driver.
#[allow(dead_code, reason = "completes the pFq generator family the strategies draw on")]
pub(crate) fn hypergeometric_1f2_series<T: MathScalar>(
    a: T,
    b1: T,
    b2: T,
    z: T,
    policy: &Policy<T>,
) -> Result<T, EvalError> {
    sum_series(Series1F2::new(a, b1, b2, z), policy)
}

/// 2F1(a1, a2; b; z) by the generic driver; |z| < 1 territory only.
#[allow(dead_code, reason = "completes the pFq generator family the strategies draw on")]
pub(crate) fn hypergeometric_2f1_series<T: MathScalar>(
    a1: T,
    a2: T,
    b: T,
    z: T,
    policy: &Policy<T>,
) -> Result<T, EvalError> {
    sum_series(Series2F1::new(a1, a2, b, z), policy)
}

/// Direct 1F1 Taylor summation with log-scale renormalization.
///
/// The running sum and term are pulled back into
/// `[1/sqrt(T::MAX), sqrt(T::MAX)]` whenever they leave it, crediting
/// the shift to `log_scale`, so the sum may represent values far
/// outside the scalar's exponent range. Input scale is added to, never
/// replaced.
pub(crate) fn hypergeometric_1f1_series_scaled<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let limits = ScaleLimits::new(policy);
    let mut sum = T::zero();
    let mut term = T::one();
    let mut n: u32 = 0;

    loop {
        sum += term;
        limits.renormalize(&mut sum, &mut [&mut term], log_scale);
        let nf = T::from_index(n);
        term = term * ((a + nf) / ((b + nf) * (nf + T::one()))) * z;
        if n > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations: n });
        }
        n += 1;
        if term.abs() <= policy.epsilon * sum.abs() {
            break;
        }
    }
    Ok(sum)
}

/// 0F1 Taylor summation with log-scale renormalization; used by the
/// Bessel-form evaluators where the auxiliary series itself can leave
/// the representable range.
pub(crate) fn hypergeometric_0f1_series_scaled<T: MathScalar>(
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let limits = ScaleLimits::new(policy);
    let mut sum = T::zero();
    let mut term = T::one();
    let mut n: u32 = 0;

    loop {
        sum += term;
        limits.renormalize(&mut sum, &mut [&mut term], log_scale);
        let nf = T::from_index(n);
        term = term * recip_checked((b + nf) * (nf + T::one()))? * z;
        if n > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations: n });
        }
        n += 1;
        if term.abs() <= policy.epsilon * sum.abs() {
            break;
        }
    }
    Ok(sum)
}

fn recip_checked<T: MathScalar>(denominator: T) -> Result<T, EvalError> {
    if denominator == T::zero() {
        return Err(EvalError::domain(
            "series denominator parameter hit a non-positive integer",
        ));
    }
    Ok(T::one() / denominator)
}

/// Scaled 1F1 Taylor summation with a cancellation monitor.
///
/// Tracks the largest partial sum (in the running scale); if it exceeds
/// the final sum by more than `1/epsilon` the digits of the result are
/// pure noise and the driver fails with
/// [`EvalError::CancellationLoss`] instead of returning them.
pub(crate) fn hypergeometric_1f1_checked_series<T: MathScalar>(
    a: T,
    b: T,
    z: T,
    policy: &Policy<T>,
    log_scale: &mut i64,
) -> Result<T, EvalError> {
    let limits = ScaleLimits::new(policy);
    let mut sum = T::zero();
    let mut term = T::one();
    let mut largest = T::zero();
    let mut n: u32 = 0;

    loop {
        sum += term;
        if sum.abs() > largest {
            largest = sum.abs();
        }
        {
            let mut values = [&mut term, &mut largest];
            limits.renormalize(&mut sum, &mut values, log_scale);
        }
        let nf = T::from_index(n);
        term = term * ((a + nf) / ((b + nf) * (nf + T::one()))) * z;
        if n > policy.max_series_iterations {
            return Err(EvalError::DidNotConverge { iterations: n });
        }
        n += 1;
        if term.abs() <= policy.epsilon * sum.abs() {
            break;
        }
    }

    if sum == T::zero() || largest * policy.epsilon > sum.abs() {
        let loss_ratio = if sum == T::zero() {
            f64::INFINITY
        } else {
            (largest / sum.abs()).to_f64().unwrap_or(f64::INFINITY)
        };
        return Err(EvalError::CancellationLoss { loss_ratio });
    }
    Ok(sum)
}
