// sg-core/src/units.rs

use core::fmt;
use core::str::FromStr;

use uom::si::f64::Angle as UomAngle;

use crate::SgError;
use crate::numeric::Real;

/// Public canonical angle quantity (SI, f64)
pub type PlaneAngle = UomAngle;

/// Unit an angular magnitude is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// One full revolution in this unit.
    pub fn full_turn(self) -> Real {
        match self {
            Self::Degrees => 360.0,
            Self::Radians => core::f64::consts::TAU,
        }
    }

    pub fn half_turn(self) -> Real {
        match self {
            Self::Degrees => 180.0,
            Self::Radians => core::f64::consts::PI,
        }
    }

    /// Multiplier taking a magnitude in `self` to the same angle in `target`.
    pub fn other(self) -> AngleUnit {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    pub fn factor_to(self, target: AngleUnit) -> Real {
        match (self, target) {
            (Self::Degrees, Self::Radians) => constants::DEG_TO_RAD,
            (Self::Radians, Self::Degrees) => constants::RAD_TO_DEG,
            _ => 1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Degrees => "deg",
            Self::Radians => "rad",
        }
    }

    /// Wrap a magnitude in this unit as a uom angle.
    pub fn quantity(self, v: Real) -> PlaneAngle {
        match self {
            Self::Degrees => deg(v),
            Self::Radians => rad(v),
        }
    }

    /// Read a uom angle back as a magnitude in this unit.
    pub fn magnitude_of(self, angle: PlaneAngle) -> Real {
        match self {
            Self::Degrees => angle.get::<uom::si::angle::degree>(),
            Self::Radians => angle.get::<uom::si::angle::radian>(),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for AngleUnit {
    type Err = SgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" | "°" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            _ => Err(SgError::UndefinedUnit {
                unit: s.to_string(),
            }),
        }
    }
}

#[inline]
pub fn deg(v: f64) -> PlaneAngle {
    use uom::si::angle::degree;
    PlaneAngle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> PlaneAngle {
    use uom::si::angle::radian;
    PlaneAngle::new::<radian>(v)
}

pub mod constants {
    use core::f64::consts::PI;

    pub const DEG_TO_RAD: f64 = PI / 180.0;
    pub const RAD_TO_DEG: f64 = 180.0 / PI;
}
