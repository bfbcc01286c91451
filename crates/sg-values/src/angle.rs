//! Uncertain angles with a unit and a canonical range.
//!
//! An [`Angle`] delegates its magnitude and uncertainty to an
//! [`UncertainValue`]; this module adds unit conversion, range wrapping and
//! the trigonometric propagation rules.

use core::fmt;

use sg_core::format::LabelStyle;
use sg_core::numeric::{Real, ensure_finite, quadrature_sum};
use sg_core::units::{AngleUnit, PlaneAngle};
use sg_core::{SgError, SgResult};

use crate::value::UncertainValue;

/// Below this many ulps of the angle's radian magnitude, `|cos θ|` is
/// treated as zero and the tangent as undefined.
const TANGENT_POLE_ULPS: Real = 4.0;

/// Canonical interval angles are wrapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AngleRange {
    /// `[0, full turn)`
    #[default]
    Revolution,
    /// `[-half turn, half turn)`
    Signed,
    /// No wrapping.
    Unbounded,
}

impl AngleRange {
    pub fn contains(self, value: Real, unit: AngleUnit) -> bool {
        let full = unit.full_turn();
        let half = unit.half_turn();
        match self {
            Self::Revolution => (0.0..full).contains(&value),
            Self::Signed => (-half..half).contains(&value),
            Self::Unbounded => true,
        }
    }

    /// Wrap `value` (in `unit`) into this range.
    ///
    /// Values already inside the range are returned untouched, which makes
    /// wrapping idempotent bit-for-bit.
    pub fn wrap(self, value: Real, unit: AngleUnit) -> Real {
        if self.contains(value, unit) {
            return value;
        }
        let full = unit.full_turn();
        match self {
            Self::Revolution => wrap_revolution(value, full),
            Self::Signed => {
                let r = wrap_revolution(value, full);
                // exact: r lies in [full/2, full)
                if r >= unit.half_turn() { r - full } else { r }
            }
            Self::Unbounded => value,
        }
    }
}

fn wrap_revolution(value: Real, full: Real) -> Real {
    let r = value.rem_euclid(full);
    // rem_euclid may round up to `full` for tiny negative input
    if r >= full { 0.0 } else { r }
}

/// Unit and range applied to angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AngleConfig {
    pub unit: AngleUnit,
    pub range: AngleRange,
}

impl AngleConfig {
    pub fn new(unit: AngleUnit, range: AngleRange) -> Self {
        Self { unit, range }
    }
}

/// Uncertain angular measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    magnitude: UncertainValue,
    config: AngleConfig,
}

impl Angle {
    /// Angle in `unit`, wrapped into the default range.
    pub fn new(value: Real, uncertainty: Option<Real>, unit: AngleUnit) -> SgResult<Self> {
        Self::with_config(
            value,
            uncertainty,
            AngleConfig {
                unit,
                ..AngleConfig::default()
            },
        )
    }

    pub fn degrees(value: Real, uncertainty: Option<Real>) -> SgResult<Self> {
        Self::new(value, uncertainty, AngleUnit::Degrees)
    }

    pub fn radians(value: Real, uncertainty: Option<Real>) -> SgResult<Self> {
        Self::new(value, uncertainty, AngleUnit::Radians)
    }

    pub fn with_config(value: Real, uncertainty: Option<Real>, config: AngleConfig) -> SgResult<Self> {
        let magnitude = UncertainValue::new(value, uncertainty)?;
        Self::from_magnitude(magnitude, config)
    }

    /// Angle with a unit given by name (`"deg"`, `"radians"`, ...).
    pub fn parse_unit(value: Real, uncertainty: Option<Real>, unit: &str) -> SgResult<Self> {
        Self::new(value, uncertainty, unit.parse()?)
    }

    /// Angle from a uom quantity, expressed in `config.unit`.
    ///
    /// `uncertainty` is read in `config.unit` as well.
    pub fn from_quantity(
        angle: PlaneAngle,
        uncertainty: Option<Real>,
        config: AngleConfig,
    ) -> SgResult<Self> {
        Self::with_config(config.unit.magnitude_of(angle), uncertainty, config)
    }

    /// Wraps `magnitude` into `config.range`.
    ///
    /// Fails with [`SgError::NonFinite`] when the angle would overflow in the
    /// other unit, so every conversion of the result stays finite.
    pub fn from_magnitude(magnitude: UncertainValue, config: AngleConfig) -> SgResult<Self> {
        let angle = Self::wrapped(magnitude, config);
        let factor = config.unit.factor_to(config.unit.other());
        ensure_finite(angle.value() * factor, "converted angle")?;
        ensure_finite(angle.uncertainty() * factor, "converted angle uncertainty")?;
        Ok(angle)
    }

    fn wrapped(magnitude: UncertainValue, config: AngleConfig) -> Self {
        let wrapped = config.range.wrap(magnitude.value(), config.unit);
        Self {
            magnitude: UncertainValue::from_parts(wrapped, magnitude.uncertainty()),
            config,
        }
    }

    pub fn value(&self) -> Real {
        self.magnitude.value()
    }

    pub fn uncertainty(&self) -> Real {
        self.magnitude.uncertainty()
    }

    pub fn magnitude(&self) -> UncertainValue {
        self.magnitude
    }

    pub fn unit(&self) -> AngleUnit {
        self.config.unit
    }

    pub fn range(&self) -> AngleRange {
        self.config.range
    }

    pub fn config(&self) -> AngleConfig {
        self.config
    }

    /// Magnitude and uncertainty expressed in `unit`, without wrapping.
    pub fn magnitude_in(&self, unit: AngleUnit) -> UncertainValue {
        let factor = self.unit().factor_to(unit);
        // finite: checked against the other unit on construction
        UncertainValue::from_parts(self.value() * factor, self.uncertainty() * factor)
    }

    pub fn in_degrees(&self) -> Real {
        self.magnitude_in(AngleUnit::Degrees).value()
    }

    pub fn in_radians(&self) -> Real {
        self.magnitude_in(AngleUnit::Radians).value()
    }

    pub fn to_quantity(&self) -> PlaneAngle {
        self.unit().quantity(self.value())
    }

    /// Same angle in another unit; value and uncertainty share the factor.
    pub fn to_unit(&self, unit: AngleUnit) -> SgResult<Self> {
        Self::from_magnitude(
            self.magnitude_in(unit),
            AngleConfig {
                unit,
                range: self.range(),
            },
        )
    }

    pub fn to_degrees(&self) -> SgResult<Self> {
        self.to_unit(AngleUnit::Degrees)
    }

    pub fn to_radians(&self) -> SgResult<Self> {
        self.to_unit(AngleUnit::Radians)
    }

    pub fn with_range(&self, range: AngleRange) -> Self {
        Self::wrapped(
            self.magnitude,
            AngleConfig {
                unit: self.unit(),
                range,
            },
        )
    }

    /// Re-wrap into the angle's own range.
    pub fn normalized(&self) -> Self {
        Self::wrapped(self.magnitude, self.config)
    }

    /// Sum in `self`'s unit and range; `other` is converted first.
    pub fn plus(&self, other: &Angle) -> SgResult<Self> {
        let other = other.magnitude_in(self.unit());
        Self::from_magnitude(self.magnitude.plus(&other)?, self.config)
    }

    pub fn minus(&self, other: &Angle) -> SgResult<Self> {
        let other = other.magnitude_in(self.unit());
        Self::from_magnitude(self.magnitude.minus(&other)?, self.config)
    }

    pub fn scale(&self, factor: Real) -> SgResult<Self> {
        Self::from_magnitude(self.magnitude.scale(factor)?, self.config)
    }

    pub fn negate(&self) -> Self {
        Self::wrapped(self.magnitude.negate(), self.config)
    }

    /// Shortest signed rotation from `self` to `other`, in `self`'s unit.
    pub fn difference_to(&self, other: &Angle) -> SgResult<Self> {
        let delta = other.magnitude_in(self.unit()).minus(&self.magnitude)?;
        Self::from_magnitude(delta, AngleConfig::new(self.unit(), AngleRange::Signed))
    }

    /// True when the angles agree within the sum of their uncertainties,
    /// measured along the shorter way round.
    pub fn is_equivalent_to(&self, other: &Angle) -> bool {
        let other = other.magnitude_in(self.unit());
        let gap = AngleRange::Signed
            .wrap(other.value() - self.value(), self.unit())
            .abs();
        // an overflowing gap is NaN after wrapping and compares false
        gap <= self.uncertainty() + other.uncertainty()
    }

    /// Angle in radians, reduced to `[-π, π)` in its own unit first so that
    /// large unbounded angles keep their precision.
    fn reduced_radians(&self) -> (Real, Real) {
        let reduced = AngleRange::Signed.wrap(self.value(), self.unit());
        let factor = self.unit().factor_to(AngleUnit::Radians);
        (reduced * factor, self.uncertainty() * factor)
    }

    /// `sin θ` with `σ = |cos θ|·σθ`.
    pub fn sin(&self) -> UncertainValue {
        let (t, sigma) = self.reduced_radians();
        UncertainValue::from_parts(t.sin(), t.cos().abs() * sigma)
    }

    /// `cos θ` with `σ = |sin θ|·σθ`.
    pub fn cos(&self) -> UncertainValue {
        let (t, sigma) = self.reduced_radians();
        UncertainValue::from_parts(t.cos(), t.sin().abs() * sigma)
    }

    /// `tan θ` with `σ = σθ / cos²θ`; undefined where the cosine vanishes.
    ///
    /// The pole tolerance grows with the unreduced magnitude, since reducing
    /// a large angle leaves an error of a few ulps of that magnitude.
    pub fn tan(&self) -> SgResult<UncertainValue> {
        let (t, sigma) = self.reduced_radians();
        let c = t.cos();
        let pole_eps = TANGENT_POLE_ULPS * f64::EPSILON * self.in_radians().abs().max(1.0);
        if c.abs() < pole_eps {
            return Err(SgError::DivisionByZero {
                what: "tangent where cosine vanishes",
            });
        }
        UncertainValue::checked(t.tan(), sigma / (c * c))
    }

    /// Direction of the vector `(x, y)`.
    ///
    /// `σθ = sqrt((x·σy)² + (y·σx)²) / (x² + y²)`. Fails for a zero vector.
    pub fn atan2(y: &UncertainValue, x: &UncertainValue, config: AngleConfig) -> SgResult<Self> {
        let (yv, xv) = (y.value(), x.value());
        let r = xv.hypot(yv);
        if r == 0.0 {
            return Err(SgError::DivisionByZero {
                what: "direction of a zero-length vector",
            });
        }
        let sigma = quadrature_sum(&[xv * y.uncertainty(), yv * x.uncertainty()]) / r / r;
        let theta = UncertainValue::checked(yv.atan2(xv), sigma)?;
        Self::from_magnitude(
            theta.scale(AngleUnit::Radians.factor_to(config.unit))?,
            config,
        )
    }

    pub fn label_with(&self, style: LabelStyle) -> String {
        format!("{} {}", self.magnitude.label_with(style), self.unit().symbol())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = if f.alternate() {
            LabelStyle::Ascii
        } else {
            LabelStyle::Unicode
        };
        f.write_str(&self.label_with(style))
    }
}
