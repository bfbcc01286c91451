//! Scalar measurement carrying a standard uncertainty.
//!
//! Propagation follows the usual first-order rules for independent inputs:
//!
//! - sum/difference: `σ = sqrt(σa² + σb²)`
//! - product/quotient: relative uncertainties add in quadrature
//! - power `x^n`: relative uncertainty scales by `|n|`
//! - scale `k·x`: `σ = |k|·σx`
//!
//! Results that overflow or turn NaN are rejected with
//! [`SgError::NonFinite`] instead of being returned.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Neg;

use sg_core::format::{LabelStyle, format_value_uncertainty, uncertainty_place};
use sg_core::numeric::{Real, ensure_finite, implied_uncertainty, quadrature_sum, round_to_order};
use sg_core::{SgError, SgResult};
use tracing::{debug, trace};

/// A measured value `value ± uncertainty`.
///
/// `uncertainty` is always finite and non-negative. Derived `PartialEq` is
/// exact field equality; use [`UncertainValue::is_equivalent_to`] for
/// agreement within uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ValueRepr", into = "ValueRepr")
)]
pub struct UncertainValue {
    value: Real,
    uncertainty: Real,
}

impl UncertainValue {
    pub const ZERO: Self = Self {
        value: 0.0,
        uncertainty: 0.0,
    };

    /// Build a measurement. With `uncertainty` omitted the precision implied
    /// by `value` is used, see [`UncertainValue::from_measurement`].
    pub fn new(value: Real, uncertainty: Option<Real>) -> SgResult<Self> {
        match uncertainty {
            Some(u) => Self::with_uncertainty(value, u),
            None => Self::from_measurement(value),
        }
    }

    pub fn with_uncertainty(value: Real, uncertainty: Real) -> SgResult<Self> {
        ensure_finite(value, "value")?;
        ensure_finite(uncertainty, "uncertainty")?;
        if uncertainty < 0.0 {
            return Err(SgError::NegativeUncertainty { value: uncertainty });
        }
        Ok(Self::from_parts(value, uncertainty))
    }

    /// Measurement whose uncertainty is half a unit in the last significant
    /// place of `value` as written in its shortest decimal form.
    ///
    /// `2.5` becomes `2.5 ± 0.05`; integer-valued input such as `10.0`
    /// becomes `10 ± 0.5`, and so does `1e20` at its own magnitude.
    pub fn from_measurement(value: Real) -> SgResult<Self> {
        ensure_finite(value, "value")?;
        let uncertainty = implied_uncertainty(value);
        trace!(value, uncertainty, "uncertainty implied by precision");
        Ok(Self::from_parts(value, uncertainty))
    }

    /// A value known without error.
    pub fn exact(value: Real) -> SgResult<Self> {
        Self::with_uncertainty(value, 0.0)
    }

    /// Result of propagation; rejects overflow and NaN.
    pub(crate) fn checked(value: Real, uncertainty: Real) -> SgResult<Self> {
        ensure_finite(value, "result value")?;
        ensure_finite(uncertainty, "result uncertainty")?;
        Ok(Self::from_parts(value, uncertainty))
    }

    /// Inputs must already be finite with `uncertainty` non-negative.
    pub(crate) fn from_parts(value: Real, uncertainty: Real) -> Self {
        Self {
            value,
            // folds -0.0 into 0.0
            uncertainty: uncertainty.abs() + 0.0,
        }
    }

    pub fn value(&self) -> Real {
        self.value
    }

    pub fn uncertainty(&self) -> Real {
        self.uncertainty
    }

    /// `σ / |value|`, or `None` when the value is zero.
    pub fn relative_uncertainty(&self) -> Option<Real> {
        if self.value == 0.0 {
            None
        } else {
            Some(self.uncertainty / self.value.abs())
        }
    }

    pub fn is_exact(&self) -> bool {
        self.uncertainty == 0.0
    }

    /// `(value - σ, value + σ)`
    pub fn bounds(&self) -> (Real, Real) {
        (self.value - self.uncertainty, self.value + self.uncertainty)
    }

    /// Value rounded to the place set by the displayed uncertainty.
    pub fn rounded_value(&self) -> Real {
        match uncertainty_place(self.uncertainty) {
            Some((_, order)) => round_to_order(self.value, order),
            None => self.value,
        }
    }

    /// Uncertainty rounded to one significant figure.
    pub fn rounded_uncertainty(&self) -> Real {
        uncertainty_place(self.uncertainty).map_or(0.0, |(u, _)| u)
    }

    pub fn label(&self) -> String {
        self.label_with(LabelStyle::Unicode)
    }

    pub fn label_with(&self, style: LabelStyle) -> String {
        format_value_uncertainty(self.value, self.uncertainty, style)
    }

    pub fn plus(&self, other: &Self) -> SgResult<Self> {
        Self::checked(
            self.value + other.value,
            quadrature_sum(&[self.uncertainty, other.uncertainty]),
        )
    }

    pub fn minus(&self, other: &Self) -> SgResult<Self> {
        Self::checked(
            self.value - other.value,
            quadrature_sum(&[self.uncertainty, other.uncertainty]),
        )
    }

    /// Product with relative uncertainties combined in quadrature.
    ///
    /// A zero operand has no relative uncertainty; the absolute form
    /// `sqrt((b·σa)² + (a·σb)²)` is used instead, falling back to `σa·σb`
    /// when both values are zero.
    pub fn times(&self, other: &Self) -> SgResult<Self> {
        let value = self.value * other.value;
        let uncertainty = match (self.relative_uncertainty(), other.relative_uncertainty()) {
            (Some(ra), Some(rb)) => value.abs() * quadrature_sum(&[ra, rb]),
            _ => {
                trace!("zero operand in product; using absolute uncertainty rule");
                let cross = quadrature_sum(&[
                    other.value * self.uncertainty,
                    self.value * other.uncertainty,
                ]);
                if cross == 0.0 {
                    self.uncertainty * other.uncertainty
                } else {
                    cross
                }
            }
        };
        Self::checked(value, uncertainty)
    }

    /// Quotient `self / divisor`.
    ///
    /// Fails with [`SgError::DivisionByZero`] when the divisor's value is zero.
    pub fn divide(&self, divisor: &Self) -> SgResult<Self> {
        if divisor.value == 0.0 {
            debug!(dividend = %self, "rejected division by zero-valued measurement");
            return Err(SgError::DivisionByZero {
                what: "uncertain value divisor",
            });
        }
        let value = self.value / divisor.value;
        let divisor_rel = divisor.uncertainty / divisor.value.abs();
        let uncertainty = match self.relative_uncertainty() {
            Some(ra) => value.abs() * quadrature_sum(&[ra, divisor_rel]),
            None => self.uncertainty / divisor.value.abs(),
        };
        Self::checked(value, uncertainty)
    }

    /// `self^exponent`, with `σ = |n|·|x^n|·σx/|x|`.
    pub fn powf(&self, exponent: Real) -> SgResult<Self> {
        ensure_finite(exponent, "exponent")?;
        if exponent == 0.0 {
            return Ok(Self::from_parts(1.0, 0.0));
        }
        if self.value == 0.0 {
            return self.zero_base_power(exponent);
        }
        let value = self.value.powf(exponent);
        if value.is_nan() {
            return Err(SgError::InvalidArg {
                what: "fractional power of a negative value",
            });
        }
        let rel = self.uncertainty / self.value.abs();
        Self::checked(value, value.abs() * exponent.abs() * rel)
    }

    fn zero_base_power(&self, exponent: Real) -> SgResult<Self> {
        if exponent < 0.0 {
            return Err(SgError::DivisionByZero {
                what: "zero raised to a negative power",
            });
        }
        // d/dx x^n at 0 is 1 for n = 1, 0 for n > 1 and unbounded for 0 < n < 1
        if exponent == 1.0 {
            Ok(*self)
        } else if exponent > 1.0 || self.uncertainty == 0.0 {
            Ok(Self::from_parts(0.0, 0.0))
        } else {
            Err(SgError::InvalidArg {
                what: "uncertainty undefined for fractional power of zero",
            })
        }
    }

    pub fn powi(&self, exponent: i32) -> SgResult<Self> {
        self.powf(Real::from(exponent))
    }

    pub fn sqrt(&self) -> SgResult<Self> {
        self.powf(0.5)
    }

    /// `factor · self`; the uncertainty scales by `|factor|`.
    pub fn scale(&self, factor: Real) -> SgResult<Self> {
        ensure_finite(factor, "scale factor")?;
        Self::checked(self.value * factor, self.uncertainty * factor.abs())
    }

    pub fn negate(&self) -> Self {
        Self::from_parts(-self.value, self.uncertainty)
    }

    /// True when the intervals `value ± uncertainty` of both measurements overlap.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        (self.value - other.value).abs() <= self.uncertainty + other.uncertainty
    }

    /// `Equal` when the two measurements are equivalent within uncertainty,
    /// otherwise the order of their values.
    pub fn statistical_cmp(&self, other: &Self) -> Ordering {
        if self.is_equivalent_to(other) {
            Ordering::Equal
        } else if self.value < other.value {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl Default for UncertainValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for UncertainValue {
    /// `{}` renders `12.3 ± 0.4`; `{:#}` renders `12.3 +/- 0.4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = if f.alternate() {
            LabelStyle::Ascii
        } else {
            LabelStyle::Unicode
        };
        f.write_str(&self.label_with(style))
    }
}

impl Neg for UncertainValue {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

/// Serialized shape; an absent uncertainty takes the implied-precision path.
#[cfg(feature = "serde")]
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct ValueRepr {
    value: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uncertainty: Option<Real>,
}

#[cfg(feature = "serde")]
impl TryFrom<ValueRepr> for UncertainValue {
    type Error = SgError;

    fn try_from(repr: ValueRepr) -> SgResult<Self> {
        Self::new(repr.value, repr.uncertainty)
    }
}

#[cfg(feature = "serde")]
impl From<UncertainValue> for ValueRepr {
    fn from(v: UncertainValue) -> Self {
        Self {
            value: v.value,
            uncertainty: Some(v.uncertainty),
        }
    }
}
