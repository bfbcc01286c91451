//! End-to-end checks of the documented propagation examples.

use sg_core::numeric::{Tolerances, nearly_equal, round_to_sig_figs};
use sg_values::{
    Angle, AngleConfig, AngleRange, AngleUnit, PositionValue2D, SgError, UncertainValue, stats,
};

fn tol() -> Tolerances {
    Tolerances {
        abs: 1e-12,
        rel: 1e-9,
    }
}

#[test]
fn documented_sum_example() {
    let a = UncertainValue::new(10.0, Some(0.2)).unwrap();
    let b = UncertainValue::new(5.0, Some(0.1)).unwrap();
    let sum = a.plus(&b).unwrap();
    assert_eq!(sum.value(), 15.0);
    assert!(nearly_equal(sum.uncertainty(), (0.04_f64 + 0.01).sqrt(), tol()));
    assert_eq!(round_to_sig_figs(sum.uncertainty(), 4), 0.2236);
}

#[test]
fn documented_product_example() {
    let a = UncertainValue::new(100.0, Some(1.0)).unwrap();
    let b = UncertainValue::new(2.0, Some(0.0)).unwrap();
    let product = a.times(&b).unwrap();
    assert_eq!(product.value(), 200.0);
    assert!(nearly_equal(product.uncertainty(), 2.0, tol()));
    assert_eq!(product.to_string(), "200 ± 2");
}

#[test]
fn documented_equivalence_example() {
    let a = UncertainValue::new(3.0, Some(0.5)).unwrap();
    assert!(a.is_equivalent_to(&UncertainValue::new(3.4, Some(0.5)).unwrap()));
    assert!(!a.is_equivalent_to(&UncertainValue::new(5.0, Some(0.5)).unwrap()));
}

#[test]
fn division_by_zero_value_fails() {
    let a = UncertainValue::new(1.0, Some(0.1)).unwrap();
    let zero = UncertainValue::new(0.0, Some(0.1)).unwrap();
    assert!(matches!(
        a.divide(&zero),
        Err(SgError::DivisionByZero { .. })
    ));
}

#[test]
fn mixed_chain_of_operations() {
    // (a - b) / c, then squared
    let a = UncertainValue::new(12.0, Some(0.3)).unwrap();
    let b = UncertainValue::new(2.0, Some(0.4)).unwrap();
    let c = UncertainValue::new(5.0, Some(0.0)).unwrap();
    let q = a.minus(&b).unwrap().divide(&c).unwrap();
    assert!(nearly_equal(q.value(), 2.0, tol()));
    assert!(nearly_equal(q.uncertainty(), 0.1, tol()));

    let sq = q.powi(2).unwrap();
    assert!(nearly_equal(sq.value(), 4.0, tol()));
    assert!(nearly_equal(sq.uncertainty(), 0.4, tol()));
    assert_eq!(sq.to_string(), "4.0 ± 0.4");
}

#[test]
fn survey_leg_closes_on_start() {
    // walk 10 m east then 10 m north-west-ish and compare against a fix
    let start = PositionValue2D::new(0.0, Some(0.05), 0.0, Some(0.05)).unwrap();
    let east = PositionValue2D::new(10.0, Some(0.1), 0.0, Some(0.0)).unwrap();
    let turn = Angle::degrees(90.0, Some(0.5)).unwrap();

    let first = start.plus(&east).unwrap();
    let second = first.plus(&east.rotate(&turn).unwrap()).unwrap();
    assert!(nearly_equal(second.x().value(), 10.0, tol()));
    assert!(nearly_equal(second.y().value(), 10.0, tol()));

    let bearing = start
        .angle_to(&second, AngleConfig::new(AngleUnit::Degrees, AngleRange::Signed))
        .unwrap();
    assert!(nearly_equal(bearing.value(), 45.0, tol()));
    assert!(bearing.uncertainty() > 0.0);

    let fix = PositionValue2D::new(10.2, Some(0.3), 9.9, Some(0.3)).unwrap();
    assert!(second.is_equivalent_to(&fix));
}

#[test]
fn repeated_readings_combine() {
    let readings = [
        stats::mean_and_deviation(&[9.8, 10.1, 10.0, 9.9, 10.2]).unwrap(),
        UncertainValue::new(10.05, Some(0.05)).unwrap(),
    ];
    let best = stats::weighted_average(&readings).unwrap();
    assert!(best.uncertainty() < readings[0].uncertainty());
    assert!(best.uncertainty() < readings[1].uncertainty());
    assert!(best.is_equivalent_to(&readings[1]));
}

#[test]
fn angle_sum_in_radians_wraps() {
    let a = Angle::radians(6.0, Some(0.01)).unwrap();
    let b = Angle::degrees(90.0, Some(1.0)).unwrap();
    let sum = a.plus(&b).unwrap();
    assert_eq!(sum.unit(), AngleUnit::Radians);
    assert!(sum.value() >= 0.0 && sum.value() < std::f64::consts::TAU);
    assert!(nearly_equal(
        sum.value(),
        6.0 + std::f64::consts::FRAC_PI_2 - std::f64::consts::TAU,
        tol()
    ));
}

#[test]
fn overflow_stops_a_chain() {
    let huge = UncertainValue::new(1e308, Some(1e307)).unwrap();
    let err = huge.plus(&huge).unwrap_err();
    assert!(matches!(err, SgError::NonFinite { .. }));
    assert!(err.is_validation());

    let half = huge.scale(0.5).unwrap();
    assert_eq!(half.value(), 5e307);
    assert!(half.plus(&half).is_ok());
    assert!(matches!(
        half.scale(f64::NAN),
        Err(SgError::NonFinite { .. })
    ));
}
