//! Summaries over sets of measurements.

use sg_core::numeric::{Real, ensure_finite};
use sg_core::{SgError, SgResult};
use tracing::debug;

use crate::value::UncertainValue;

/// Inverse-variance weighted mean: weights `1/σ²`, uncertainty `1/sqrt(Σ 1/σ²)`.
///
/// Every input needs a non-zero uncertainty; an exact value would carry
/// infinite weight.
pub fn weighted_average(values: &[UncertainValue]) -> SgResult<UncertainValue> {
    if values.is_empty() {
        return Err(SgError::InvalidArg {
            what: "weighted average of no values",
        });
    }
    let mut weight_sum = 0.0;
    let mut weighted = 0.0;
    for v in values {
        if v.is_exact() {
            return Err(SgError::InvalidArg {
                what: "weighted average of a value with zero uncertainty",
            });
        }
        let w = 1.0 / (v.uncertainty() * v.uncertainty());
        weight_sum += w;
        weighted += w * v.value();
    }
    let mean = ensure_finite(weighted / weight_sum, "weighted mean")?;
    debug!(count = values.len(), mean, "weighted average");
    UncertainValue::checked(mean, weight_sum.sqrt().recip())
}

/// Sample mean with the sample standard deviation as its uncertainty.
///
/// Uses a single-pass Welford update. A single sample has zero uncertainty.
pub fn mean_and_deviation(samples: &[Real]) -> SgResult<UncertainValue> {
    if samples.is_empty() {
        return Err(SgError::InvalidArg {
            what: "mean of no samples",
        });
    }
    let mut count = 0_u64;
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for &x in samples {
        ensure_finite(x, "sample")?;
        count += 1;
        let delta = x - mean;
        mean += delta / count as Real;
        m2 += delta * (x - mean);
    }
    let deviation = if count > 1 {
        (m2 / (count - 1) as Real).sqrt()
    } else {
        0.0
    };
    UncertainValue::checked(mean, deviation)
}

/// Total of independent measurements; uncertainties add in quadrature.
pub fn sum(values: &[UncertainValue]) -> SgResult<UncertainValue> {
    values
        .iter()
        .try_fold(UncertainValue::ZERO, |acc, v| acc.plus(v))
}
