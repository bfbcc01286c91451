//! Planar point with independently uncertain coordinates.

use core::fmt;

use sg_core::numeric::{Real, quadrature_sum};
use sg_core::{AngleUnit, SgError, SgResult};

use crate::angle::{Angle, AngleConfig};
use crate::value::UncertainValue;

/// A 2D position `(x ± σx, y ± σy)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionValue2D {
    x: UncertainValue,
    y: UncertainValue,
}

impl PositionValue2D {
    pub fn new(
        x: Real,
        x_uncertainty: Option<Real>,
        y: Real,
        y_uncertainty: Option<Real>,
    ) -> SgResult<Self> {
        Ok(Self {
            x: UncertainValue::new(x, x_uncertainty)?,
            y: UncertainValue::new(y, y_uncertainty)?,
        })
    }

    pub fn from_values(x: UncertainValue, y: UncertainValue) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> UncertainValue {
        self.x
    }

    pub fn y(&self) -> UncertainValue {
        self.y
    }

    pub fn plus(&self, other: &Self) -> SgResult<Self> {
        Ok(Self::from_values(self.x.plus(&other.x)?, self.y.plus(&other.y)?))
    }

    pub fn minus(&self, other: &Self) -> SgResult<Self> {
        Ok(Self::from_values(self.x.minus(&other.x)?, self.y.minus(&other.y)?))
    }

    pub fn scale(&self, factor: Real) -> SgResult<Self> {
        Ok(Self::from_values(self.x.scale(factor)?, self.y.scale(factor)?))
    }

    /// Distance from the origin, `σ = sqrt((x·σx)² + (y·σy)²) / r`.
    ///
    /// At the origin the gradient is undefined; the coordinate uncertainties
    /// are combined in quadrature instead.
    pub fn length(&self) -> SgResult<UncertainValue> {
        let (x, y) = (self.x.value(), self.y.value());
        let r = x.hypot(y);
        let sigma = if r > 0.0 {
            quadrature_sum(&[x * self.x.uncertainty(), y * self.y.uncertainty()]) / r
        } else {
            quadrature_sum(&[self.x.uncertainty(), self.y.uncertainty()])
        };
        UncertainValue::checked(r, sigma)
    }

    pub fn distance_to(&self, other: &Self) -> SgResult<UncertainValue> {
        other.minus(self)?.length()
    }

    /// Direction of this point seen from the origin.
    pub fn heading(&self, config: AngleConfig) -> SgResult<Angle> {
        Angle::atan2(&self.y, &self.x, config)
    }

    /// Direction from `self` towards `other`.
    pub fn angle_to(&self, other: &Self, config: AngleConfig) -> SgResult<Angle> {
        other.minus(self)?.heading(config).map_err(|_| SgError::InvalidArg {
            what: "direction between coincident positions",
        })
    }

    /// Rotate counter-clockwise about the origin.
    ///
    /// The rotation angle's own uncertainty contributes `|y'|·σθ` to `x'` and
    /// `|x'|·σθ` to `y'`.
    pub fn rotate(&self, angle: &Angle) -> SgResult<Self> {
        let theta = angle.magnitude_in(AngleUnit::Radians);
        let (s, c) = theta.value().sin_cos();
        let sigma_theta = theta.uncertainty();
        let (x, y) = (self.x.value(), self.y.value());
        let (sx, sy) = (self.x.uncertainty(), self.y.uncertainty());

        let xr = x * c - y * s;
        let yr = x * s + y * c;
        let sxr = quadrature_sum(&[c * sx, s * sy, yr * sigma_theta]);
        let syr = quadrature_sum(&[s * sx, c * sy, xr * sigma_theta]);
        Ok(Self::from_values(
            UncertainValue::checked(xr, sxr)?,
            UncertainValue::checked(yr, syr)?,
        ))
    }

    pub fn rotate_about(&self, angle: &Angle, origin: &Self) -> SgResult<Self> {
        self.minus(origin)?.rotate(angle)?.plus(origin)
    }

    /// Both coordinates agree within uncertainty.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self.x.is_equivalent_to(&other.x) && self.y.is_equivalent_to(&other.y)
    }
}

impl fmt::Display for PositionValue2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "({:#}, {:#})", self.x, self.y)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}
