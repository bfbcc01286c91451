//! Rendering of `value ± uncertainty` pairs.
//!
//! The uncertainty is shown to one significant figure and its leading digit
//! fixes the decimal place both numbers are rounded to. Pairs reaching past
//! [`FIXED_ORDER_LIMIT`] on either side of the point are written in
//! scientific notation instead.

use crate::numeric::{Real, order_of_magnitude, round_to_order, round_to_sig_figs};

/// Largest decimal order, in either direction, still printed in fixed notation.
pub const FIXED_ORDER_LIMIT: i32 = 15;

/// Separator style between a value and its uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LabelStyle {
    /// `12.3 ± 0.4`
    #[default]
    Unicode,
    /// `12.3 +/- 0.4`
    Ascii,
}

impl LabelStyle {
    pub fn separator(self) -> &'static str {
        match self {
            Self::Unicode => "±",
            Self::Ascii => "+/-",
        }
    }
}

/// Round an uncertainty to one significant figure.
///
/// Returns the rounded magnitude with its decimal order, or `None` when the
/// uncertainty is zero (or not finite) and there is no place to round to.
pub fn uncertainty_place(uncertainty: Real) -> Option<(Real, i32)> {
    let rounded = round_to_sig_figs(uncertainty.abs(), 1);
    order_of_magnitude(rounded).map(|order| (rounded, order))
}

/// Render `value` rounded to a multiple of `10^order`, printing exactly the
/// decimals that place implies.
pub fn format_at_order(value: Real, order: i32) -> String {
    let rounded = round_to_order(value, order);
    let decimals = usize::try_from(-order).unwrap_or(0);
    format!("{rounded:.decimals$}")
}

/// Scientific counterpart of [`format_at_order`]: the mantissa keeps the
/// digits down to `10^order`.
pub fn format_scientific_at_order(value: Real, order: i32) -> String {
    let rounded = round_to_order(value, order);
    match order_of_magnitude(rounded) {
        Some(lead) => {
            let digits = usize::try_from(lead - order).unwrap_or(0);
            format!("{rounded:.digits$e}")
        }
        None => format!("0e{order}"),
    }
}

fn beyond_fixed(order: i32) -> bool {
    order.abs() > FIXED_ORDER_LIMIT
}

pub fn format_value_uncertainty(value: Real, uncertainty: Real, style: LabelStyle) -> String {
    let value_order = order_of_magnitude(value);
    match uncertainty_place(uncertainty) {
        Some((u, order)) => {
            let scientific =
                beyond_fixed(order) || value_order.is_some_and(|o| o > FIXED_ORDER_LIMIT);
            let render: fn(Real, i32) -> String = if scientific {
                format_scientific_at_order
            } else {
                format_at_order
            };
            format!("{} {} {}", render(value, order), style.separator(), render(u, order))
        }
        None if value_order.is_some_and(beyond_fixed) => format!("{value:e}"),
        None => format!("{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncertainty_sets_the_place() {
        assert_eq!(
            format_value_uncertainty(15.0, 0.05_f64.sqrt(), LabelStyle::Unicode),
            "15.0 ± 0.2"
        );
        assert_eq!(
            format_value_uncertainty(200.0, 2.0, LabelStyle::Unicode),
            "200 ± 2"
        );
        assert_eq!(
            format_value_uncertainty(1234.5, 30.0, LabelStyle::Unicode),
            "1230 ± 30"
        );
        assert_eq!(
            format_value_uncertainty(-0.012345, 0.00042, LabelStyle::Ascii),
            "-0.0123 +/- 0.0004"
        );
    }

    #[test]
    fn rounding_up_moves_the_place() {
        // 0.096 rounds to 0.1, so the value is kept to one decimal
        assert_eq!(
            format_value_uncertainty(3.14159, 0.096, LabelStyle::Unicode),
            "3.1 ± 0.1"
        );
    }

    #[test]
    fn zero_uncertainty_is_bare() {
        assert_eq!(format_value_uncertainty(2.5, 0.0, LabelStyle::Unicode), "2.5");
        assert_eq!(uncertainty_place(0.0), None);
    }

    #[test]
    fn extreme_orders_use_scientific_notation() {
        assert_eq!(
            format_value_uncertainty(1e308, 1e308, LabelStyle::Unicode),
            "1e308 ± 1e308"
        );
        assert_eq!(
            format_value_uncertainty(1.23456e20, 1e16, LabelStyle::Unicode),
            "1.2346e20 ± 1e16"
        );
        assert_eq!(
            format_value_uncertainty(-3e-20, 1.2e-21, LabelStyle::Ascii),
            "-3.0e-20 +/- 1e-21"
        );
        assert_eq!(
            format_value_uncertainty(4.0, 1e20, LabelStyle::Unicode),
            "0e20 ± 1e20"
        );
        assert_eq!(format_value_uncertainty(1e300, 0.0, LabelStyle::Unicode), "1e300");
        assert_eq!(format_value_uncertainty(2e-30, 0.0, LabelStyle::Unicode), "2e-30");
        // still fixed at the limit
        assert_eq!(
            format_value_uncertainty(1234.5, 1e-15, LabelStyle::Unicode),
            "1234.500000000000000 ± 0.000000000000001"
        );
    }

    #[test]
    fn format_at_order_pads_decimals() {
        assert_eq!(format_at_order(2.0, -2), "2.00");
        assert_eq!(format_at_order(1999.0, 2), "2000");
    }
}
