//! Ordinary least squares fit of a straight line.

use crate::analytics::stats::mean;
use crate::error::{Result, StudioError};
use serde::Serialize;

/// Result of [`linear_regression`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, `1 - SS_res / SS_tot`
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Fitted values for every x, in order
    pub fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }
}

/// Fit `y = slope * x + intercept` by least squares
///
/// # Arguments
/// * `xs` - Independent values
/// * `ys` - Dependent values, same length as `xs`
///
/// # Returns
/// * `Result<LinearFit>` - slope, intercept and R²
///
/// # Errors
/// * The series differ in length or hold fewer than two points
/// * Every x is the same, so the slope is undefined
///
/// # Notes
/// * `slope = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²`, `intercept = ȳ - slope * x̄`
/// * When every y is the same the line fits exactly and R² is reported as 1
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<LinearFit> {
    if xs.len() != ys.len() {
        return Err(StudioError::invalid(format!(
            "Series lengths differ: {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(StudioError::invalid("Regression needs at least two points"));
    }

    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
    }
    if sxx == 0.0 {
        return Err(StudioError::invalid(
            "Regression is undefined when every x is the same",
        ));
    }

    let slope = sxy / sxx;
    let intercept = my - slope * mx;

    let ss_tot: f64 = ys.iter().map(|y| (y - my).powi(2)).sum();
    let ss_res: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    log::debug!(
        "linear fit over {} points: slope={:.4} intercept={:.4} r2={:.4}",
        xs.len(),
        slope,
        intercept,
        r_squared
    );
    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Fit a line against the position of each value (0, 1, 2, ...)
pub fn trend_line(values: &[f64]) -> Result<LinearFit> {
    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    linear_regression(&xs, values)
}
