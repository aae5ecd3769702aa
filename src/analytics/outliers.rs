//! Outlier detection by interquartile range and by z-score.

use crate::analytics::stats::{mean, population_std_dev, quantile_sorted};
use crate::error::{Result, StudioError};
use serde::Serialize;

/// Values flagged as outliers and the fences used to flag them
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutlierReport {
    /// Positions of the outliers in the input, ascending
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    /// Values below this are outliers
    pub lower_bound: f64,
    /// Values above this are outliers
    pub upper_bound: f64,
}

impl OutlierReport {
    fn collect(data: &[f64], lower_bound: f64, upper_bound: f64) -> Self {
        let (indices, values) = data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v < lower_bound || v > upper_bound)
            .map(|(i, &v)| (i, v))
            .unzip();
        OutlierReport {
            indices,
            values,
            lower_bound,
            upper_bound,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Tukey fences: outliers lie outside `[Q1 - m*IQR, Q3 + m*IQR]`
///
/// `multiplier` is usually 1.5 (outliers) or 3.0 (extreme outliers).
/// Quartiles use the same interpolation as [`crate::analytics::stats::quantile`].
pub fn iqr_outliers(data: &[f64], multiplier: f64) -> Result<OutlierReport> {
    if data.is_empty() {
        return Err(StudioError::invalid("Outlier detection on an empty series"));
    }
    if !(multiplier.is_finite() && multiplier >= 0.0) {
        return Err(StudioError::invalid(format!(
            "IQR multiplier must be a non-negative number, got {}",
            multiplier
        )));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(StudioError::invalid("Outlier detection needs finite values"));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile_sorted(&sorted, 0.25);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;

    Ok(OutlierReport::collect(
        data,
        q1 - multiplier * iqr,
        q3 + multiplier * iqr,
    ))
}

/// Flags values whose z-score `(x - mean) / σ` exceeds `threshold` in magnitude
///
/// σ is the population standard deviation. A constant series has no
/// outliers.
pub fn zscore_outliers(data: &[f64], threshold: f64) -> Result<OutlierReport> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(StudioError::invalid(format!(
            "Z-score threshold must be positive, got {}",
            threshold
        )));
    }
    let m = mean(data)?;
    let sigma = population_std_dev(data)?;
    if sigma == 0.0 {
        return Ok(OutlierReport::collect(data, m, m));
    }
    Ok(OutlierReport::collect(
        data,
        m - threshold * sigma,
        m + threshold * sigma,
    ))
}

/// Z-score of every value (all zeros for a constant series)
pub fn zscores(data: &[f64]) -> Result<Vec<f64>> {
    let m = mean(data)?;
    let sigma = population_std_dev(data)?;
    Ok(data
        .iter()
        .map(|v| if sigma == 0.0 { 0.0 } else { (v - m) / sigma })
        .collect())
}
