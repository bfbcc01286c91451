//! Measured quantities with first-order uncertainty propagation.
//!
//! Every type here is an immutable value: arithmetic builds new instances and
//! nothing is mutated after construction, so values can be shared freely
//! across threads.
//!
//! # Types
//!
//! - [`UncertainValue`]: scalar `value ± uncertainty`
//! - [`Angle`]: uncertain angle with a unit and a canonical range
//! - [`PositionValue2D`]: planar point with uncertain coordinates
//!
//! Statistical equivalence (overlapping intervals) is always a named method
//! such as [`UncertainValue::is_equivalent_to`]; `==` compares fields exactly.

pub mod angle;
pub mod position;
pub mod stats;
pub mod value;

pub use angle::{Angle, AngleConfig, AngleRange};
pub use position::PositionValue2D;
pub use sg_core::{AngleUnit, ErrorKind, LabelStyle, Real, SgError, SgResult};
pub use value::UncertainValue;
