use crate::SgError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Above this many significant digits an `f64` has nothing left to round.
pub const MAX_SIG_FIGS: u32 = 17;

/// Absolute/relative tolerance pair for float comparisons
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SgError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SgError::NonFinite { what, value: v })
    }
}

/// Root-sum-square of independent contributions: `sqrt(a² + b² + ...)`.
///
/// Folded through `hypot`, so large terms do not overflow on squaring.
pub fn quadrature_sum(parts: &[Real]) -> Real {
    parts.iter().fold(0.0, |acc: Real, p| acc.hypot(*p))
}

/// Decimal exponent of the leading significant digit, i.e. `floor(log10(|v|))`.
///
/// Read from the exact scientific rendering instead of `log10`, which misplaces
/// exact powers of ten. Returns `None` for zero and non-finite input.
pub fn order_of_magnitude(value: Real) -> Option<i32> {
    if value == 0.0 || !value.is_finite() {
        return None;
    }
    let repr = format!("{value:e}");
    let (_, exp) = repr.split_once('e')?;
    exp.parse().ok()
}

/// Round `value` to `digits` significant figures.
///
/// Rounding goes through Rust's correctly rounded decimal formatting and back,
/// so magnitudes from subnormal to `f64::MAX` are handled alike. `digits` is
/// clamped to `1..=MAX_SIG_FIGS`; at the upper bound the value is returned
/// unchanged. Zero and non-finite input pass through.
pub fn round_to_sig_figs(value: Real, digits: u32) -> Real {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = digits.clamp(1, MAX_SIG_FIGS);
    if digits == MAX_SIG_FIGS {
        return value;
    }
    let precision = (digits - 1) as usize;
    format!("{value:.precision$e}").parse().unwrap_or(value)
}

/// Round `value` to a multiple of `10^order`.
pub fn round_to_order(value: Real, order: i32) -> Real {
    let Some(lead) = order_of_magnitude(value) else {
        return value;
    };
    if lead < order {
        // Entirely below the rounding place: lands on zero or one unit.
        let unit = 10.0_f64.powi(order);
        let rounded = (value / unit).round() * unit;
        return if rounded == 0.0 { 0.0 } else { rounded };
    }
    let digits = u32::try_from(lead - order + 1).unwrap_or(MAX_SIG_FIGS);
    round_to_sig_figs(value, digits)
}

/// Decimal place of the last digit in the shortest round-trip rendering of `value`.
///
/// A fractional part of `k` digits gives `-k`; integer-valued numbers give `0`.
/// That includes large magnitudes such as `1e20`: an `f64` does not record
/// how many trailing zeros were significant, so they count as exact units.
pub fn least_significant_order(value: Real) -> i32 {
    let repr = format!("{}", value.abs());
    match repr.split_once('.') {
        Some((_, frac)) => -(i32::try_from(frac.len()).unwrap_or(i32::MAX)),
        None => 0,
    }
}

/// Uncertainty implied by how precisely `value` is written: half of one unit
/// in its last significant place.
///
/// Integer-valued input of any size implies `±0.5`, so `1e20` becomes
/// `1e20 ± 0.5`. Pass an explicit uncertainty for large round numbers.
pub fn implied_uncertainty(value: Real) -> Real {
    0.5 * 10.0_f64.powi(least_significant_order(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight() -> Tolerances {
        Tolerances {
            abs: 1e-15,
            rel: 1e-12,
        }
    }

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn quadrature_of_two_terms() {
        assert!(nearly_equal(
            quadrature_sum(&[0.2, 0.1]),
            0.05_f64.sqrt(),
            tight()
        ));
        assert!(nearly_equal(quadrature_sum(&[3.0, 4.0, 12.0]), 13.0, tight()));
        assert_eq!(quadrature_sum(&[]), 0.0);
        assert_eq!(quadrature_sum(&[-2.0]), 2.0);
    }

    #[test]
    fn quadrature_does_not_overflow() {
        let big = 1e300;
        let sum = quadrature_sum(&[big, big]);
        assert!(sum.is_finite());
        assert!(nearly_equal(sum, big * 2.0_f64.sqrt(), tight()));
    }

    #[test]
    fn order_of_magnitude_exact_powers() {
        assert_eq!(order_of_magnitude(1000.0), Some(3));
        assert_eq!(order_of_magnitude(999.9), Some(2));
        assert_eq!(order_of_magnitude(0.001), Some(-3));
        assert_eq!(order_of_magnitude(-0.0456), Some(-2));
        assert_eq!(order_of_magnitude(0.0), None);
        assert_eq!(order_of_magnitude(Real::INFINITY), None);
    }

    #[test]
    fn sig_figs_across_magnitudes() {
        assert_eq!(round_to_sig_figs(1234.5678, 3), 1230.0);
        assert_eq!(round_to_sig_figs(0.000123456, 2), 0.00012);
        assert_eq!(round_to_sig_figs(-98765.0, 2), -99000.0);
        assert_eq!(round_to_sig_figs(9.96, 2), 10.0);
        assert_eq!(round_to_sig_figs(6.02214076e23, 4), 6.022e23);
        assert_eq!(round_to_sig_figs(1.6e-300, 1), 2e-300);
    }

    #[test]
    fn sig_figs_edge_inputs() {
        assert_eq!(round_to_sig_figs(0.0, 3), 0.0);
        assert!(round_to_sig_figs(Real::NAN, 3).is_nan());
        // zero digits is treated as one
        assert_eq!(round_to_sig_figs(1234.0, 0), 1000.0);
        assert_eq!(round_to_sig_figs(0.1 + 0.2, MAX_SIG_FIGS), 0.1 + 0.2);
    }

    #[test]
    fn round_to_order_places() {
        assert_eq!(round_to_order(1234.5, 1), 1230.0);
        assert_eq!(round_to_order(15.0, -1), 15.0);
        assert_eq!(round_to_order(0.2236, -1), 0.2);
        assert_eq!(round_to_order(0.04, -1), 0.0);
        assert_eq!(round_to_order(0.06, -1), 0.1);
        assert_eq!(round_to_order(-0.04, -1), 0.0);
        assert!(round_to_order(-0.04, -1).is_sign_positive());
    }

    #[test]
    fn implied_precision_from_rendering() {
        assert_eq!(least_significant_order(2.5), -1);
        assert_eq!(least_significant_order(0.125), -3);
        assert_eq!(least_significant_order(-3.14), -2);
        assert_eq!(least_significant_order(10.0), 0);
        assert_eq!(least_significant_order(1e-7), -7);

        assert!(nearly_equal(implied_uncertainty(2.5), 0.05, tight()));
        assert!(nearly_equal(implied_uncertainty(10.0), 0.5, tight()));
        assert!(nearly_equal(implied_uncertainty(0.125), 0.0005, tight()));
    }

    #[test]
    fn large_integers_imply_half_a_unit() {
        assert_eq!(least_significant_order(1e20), 0);
        assert_eq!(implied_uncertainty(1e20), 0.5);
        assert_eq!(least_significant_order(-1e300), 0);
        assert_eq!(implied_uncertainty(-1e300), 0.5);
    }
}
