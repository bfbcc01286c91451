//! sg-core: shared foundation for sigma.
//!
//! Contains:
//! - error (shared error type and its classification)
//! - numeric (Real + tolerances + significant-figure rounding)
//! - format (value ± uncertainty rendering)
//! - units (angle units, uom conversions, conversion constants)

pub mod error;
pub mod format;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{ErrorKind, SgError, SgResult};
pub use format::LabelStyle;
pub use numeric::*;
pub use units::*;
