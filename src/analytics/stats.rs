//! Descriptive statistics shared by the other tools.

use crate::error::{Result, StudioError};
use serde::Serialize;

fn require_values(data: &[f64], what: &str) -> Result<()> {
    if data.is_empty() {
        return Err(StudioError::invalid(format!("{} of an empty series", what)));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(StudioError::invalid(format!(
            "{} needs finite values only",
            what
        )));
    }
    Ok(())
}

pub fn mean(data: &[f64]) -> Result<f64> {
    require_values(data, "Mean")?;
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn median(data: &[f64]) -> Result<f64> {
    quantile(data, 0.5)
}

/// Sample variance, dividing by `n - 1`
pub fn variance(data: &[f64]) -> Result<f64> {
    require_values(data, "Variance")?;
    if data.len() < 2 {
        return Err(StudioError::invalid("Variance needs at least two values"));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|v| (v - m).powi(2)).sum();
    Ok(ss / (data.len() - 1) as f64)
}

/// Sample standard deviation
pub fn std_dev(data: &[f64]) -> Result<f64> {
    Ok(variance(data)?.sqrt())
}

/// Population standard deviation, dividing by `n`
pub fn population_std_dev(data: &[f64]) -> Result<f64> {
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / data.len() as f64).sqrt())
}

/// Quantile by linear interpolation between closest ranks
///
/// For sorted values `x[0..n]` the position is `h = (n - 1) * p` and the
/// result is `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
/// This is the definition spreadsheets use for `PERCENTILE.INC`.
pub fn quantile(data: &[f64], p: f64) -> Result<f64> {
    require_values(data, "Quantile")?;
    if !(0.0..=1.0).contains(&p) {
        return Err(StudioError::invalid(format!(
            "Quantile probability {} is outside 0..=1",
            p
        )));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(quantile_sorted(&sorted, p))
}

pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    sorted[lower] + (h - lower as f64) * (sorted[upper] - sorted[lower])
}

/// Five-number summary plus mean and spread
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 for a single value
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
}

pub fn summarize(data: &[f64]) -> Result<Summary> {
    require_values(data, "Summary")?;
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    Ok(Summary {
        count: data.len(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: mean(data)?,
        median: quantile_sorted(&sorted, 0.5),
        std_dev: if data.len() > 1 { std_dev(data)? } else { 0.0 },
        q1: quantile_sorted(&sorted, 0.25),
        q3: quantile_sorted(&sorted, 0.75),
    })
}

/// Pearson correlation coefficient of two equally long series
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(StudioError::invalid(format!(
            "Series lengths differ: {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(StudioError::invalid("Correlation needs at least two pairs"));
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(StudioError::invalid(
            "Correlation is undefined for a constant series",
        ));
    }
    Ok(sxy / (sxx * syy).sqrt())
}
