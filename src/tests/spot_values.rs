//! Spot checks against independently computed reference values
//!
//! Reference values carry 20+ digits and were cross-checked against a
//! high-precision oracle; relative tolerances are multiples of the
//! 200-epsilon target, widened where a method chain is long (deep
//! recurrences, folded series in the thousands of terms).

use super::assert_close;
use super::TOL;
use crate::{hypergeometric_1f1, hypergeometric_1f1_with, EvalError, OverflowBehavior, Policy};

#[test]
fn b_equals_two_a() {
    // M(a, 2a, z) pairs sit right on the Bessel closed form.
    assert_close!(
        hypergeometric_1f1(12.25_f64, 24.5, 6.75).unwrap(),
        36.472_819_642_293_006_1
    );
    assert_close!(
        hypergeometric_1f1(-12.25_f64, -24.5, 6.75).unwrap(),
        22.995_348_157_760_091_17
    );
}

#[test]
fn terminating_polynomials() {
    assert_close!(
        hypergeometric_1f1(-11.0_f64, -12.0, 6.75).unwrap(),
        376.316_642_624_645_965_6
    );
    assert_close!(
        hypergeometric_1f1(-2.0_f64, -12.0, 6.75).unwrap(),
        2.470_170_454_545_454_545
    );
    assert_close!(
        hypergeometric_1f1(-224.0_f64, -1205.0, 6.75).unwrap(),
        3.497_033_449_657_595_724_6,
        3.0 * TOL
    );
}

#[test]
fn small_a_huge_negative_b() {
    assert_close!(
        hypergeometric_1f1(0.5_f64, -1205.5, -6.75).unwrap(),
        1.002_811_490_430_269_251_55
    );
    assert_close!(
        hypergeometric_1f1(-0.5_f64, -1205.5, -6.75).unwrap(),
        0.997_196_398_449_656_445_9
    );
}

#[test]
fn closed_form_neighborhood() {
    let z = 36.25_f64;
    assert_close!(hypergeometric_1f1(3.5_f64, 3.5, z).unwrap(), z.exp());
    assert_close!(hypergeometric_1f1(-3.5_f64, -3.5, z).unwrap(), z.exp());
    assert_close!(
        hypergeometric_1f1(1.0_f64, 2.0, z).unwrap(),
        z.exp_m1() / z
    );
    assert_close!(
        hypergeometric_1f1(10.25_f64, 9.25, z).unwrap(),
        z.exp() * (9.25 + z) / 9.25
    );
    assert_close!(
        hypergeometric_1f1(-10.25_f64, -11.25, z).unwrap(),
        z.exp() * (-11.25 + z) / -11.25
    );
    assert_close!(
        hypergeometric_1f1(-10.25_f64, -11.25, -z).unwrap(),
        (-z).exp() * (-11.25 - z) / -11.25
    );
}

#[test]
fn large_parameter_scenarios() {
    // Huge positive a with b nearly at its pole, z < 0: Kummer fold
    // into a seventeen-thousand step backward recurrence.
    assert_close!(
        hypergeometric_1f1(17955.561660766602_f64, 9.6968994205831605e-9, -82.406154185533524)
            .unwrap(),
        6.980_560_083_787_367_140_9e-11,
        5.0 * TOL
    );
    // Negative integer a with very large z.
    assert_close!(
        hypergeometric_1f1(-12.0_f64, 16.25, 1043.75).unwrap(),
        1.265_276_735_054_776_783_1e20,
        3.0 * TOL
    );
}

#[test]
fn degenerate_near_integer_b() {
    assert_close!(
        hypergeometric_1f1(6.7191087900739423e-13_f64, -0.99999999999932809, 0.0011913633891253994)
            .unwrap(),
        0.999_999_289_758_605_006_76
    );
    assert_close!(
        hypergeometric_1f1(6.7191087900739423e-13_f64, -0.99999999999932809, -0.0011913633891253994)
            .unwrap(),
        0.999_999_290_885_918_468_33
    );
    assert_close!(
        hypergeometric_1f1(-6.7191087900739423e-13_f64, -1.0000000000006719, 0.0011913633891253994)
            .unwrap(),
        0.999_999_289_758_606_609_65
    );
}

#[test]
fn tiny_a_deep_negative_z() {
    assert_close!(
        hypergeometric_1f1(1.2860067365774887e-17_f64, 1.0, -2539.60133934021).unwrap(),
        0.999_999_999_999_999_891_76
    );
    assert_close!(
        hypergeometric_1f1(-1.2860067365774887e-17_f64, 1.0, -2539.60133934021).unwrap(),
        1.000_000_000_000_000_108_24
    );
    assert_close!(
        hypergeometric_1f1(1.2860067365774887e-17_f64, 0.5, -2539.60133934021).unwrap(),
        0.999_999_999_999_999_873_93
    );
}

#[test]
fn oversized_result_follows_overflow_policy() {
    // M(7.824e-5, -5485.32, 1896.06) ~ 4.33e668: beyond f64.
    let (a, b, z) = (7.8238229420435346e-5_f64, -5485.3222503662109, 1896.0561106204987);

    let raise = Policy::<f64>::default();
    assert_eq!(
        hypergeometric_1f1_with(a, b, z, &raise).unwrap_err(),
        EvalError::Overflow
    );

    let saturate = Policy::<f64> {
        overflow: OverflowBehavior::SaturateToInfinity,
        ..Policy::default()
    };
    assert_eq!(
        hypergeometric_1f1_with(a, b, z, &saturate).unwrap(),
        f64::INFINITY
    );
    // Mirror case is negative.
    assert_eq!(
        hypergeometric_1f1_with(-a, b, z, &saturate).unwrap(),
        f64::NEG_INFINITY
    );
}

#[test]
fn oversized_result_is_exact_in_scaled_form() {
    // The same point through the scaled API: ln(4.331298009e668).
    let (a, b, z) = (7.8238229420435346e-5_f64, -5485.3222503662109, 1896.0561106204987);
    let scaled = crate::hypergeometric_1f1_scaled(a, b, z, &Policy::default()).unwrap();
    let log_value = scaled.mantissa.ln() + scaled.log_scale as f64;
    // ln(4.3312980090147879e668) = 668 ln 10 + ln 4.3312980090147879
    let expected_log = 668.0 * std::f64::consts::LN_10 + 4.331_298_009_014_787_9_f64.ln();
    assert!((log_value - expected_log).abs() < 1e-11 * expected_log.abs());
}

#[test]
fn domain_errors_surface_immediately() {
    assert!(matches!(
        hypergeometric_1f1(1.5_f64, -4.0, 2.0),
        Err(EvalError::Domain { .. })
    ));
    // b = 0 exactly is a domain error, no limiting behavior.
    assert!(matches!(
        hypergeometric_1f1(2.0_f64, 0.0, 1.0),
        Err(EvalError::Domain { .. })
    ));
    // Polynomial escape: a non-positive integer with a >= b is fine.
    assert!(hypergeometric_1f1(-3.0_f64, -7.0, 2.0).is_ok());
}

#[test]
fn idempotence_is_bitwise() {
    let (a, b, z) = (-12.25_f64, -24.5, 6.75);
    let first = hypergeometric_1f1(a, b, z).unwrap();
    let second = hypergeometric_1f1(a, b, z).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}
