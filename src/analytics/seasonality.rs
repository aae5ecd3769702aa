//! Additive seasonal decomposition by moving-average detrending.

use crate::analytics::stats::mean;
use crate::error::{Result, StudioError};
use serde::Serialize;

/// `data[t] = trend[t] + seasonal[t] + residual[t]`
///
/// Trend and residual are `None` for the first and last `period / 2`
/// points, where the centred moving average is not defined.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Decomposition {
    pub period: usize,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
    /// One index per phase `0..period`, summing to zero
    pub seasonal_indices: Vec<f64>,
}

/// Centred moving average of length `period`
///
/// Odd periods average `period` points centred on `t`. Even periods use the
/// 2×period average: `period + 1` points with half weight on both ends.
pub fn centered_moving_average(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = data.len();
    let half = period / 2;
    let mut trend = vec![None; n];
    if period == 0 || n < period + (period + 1) % 2 {
        return trend;
    }

    for (t, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
        let value = if period % 2 == 1 {
            data[t - half..=t + half].iter().sum::<f64>() / period as f64
        } else {
            let inner: f64 = data[t - half + 1..t + half].iter().sum();
            (0.5 * data[t - half] + inner + 0.5 * data[t + half]) / period as f64
        };
        *slot = Some(value);
    }
    trend
}

/// Split a series into trend, seasonal and residual parts
///
/// # Arguments
/// * `data` - Evenly spaced observations
/// * `period` - Length of one season, at least 2
///
/// # Returns
/// * `Result<Decomposition>` - the three components and the seasonal indices
///
/// # Errors
/// * The period is below 2 or the series holds fewer than two full periods
///
/// # Notes
/// * Seasonal index of phase `p` = mean of `data[t] - trend[t]` over all `t`
///   with `t % period == p` where the trend is defined, then shifted so the
///   indices sum to zero
pub fn decompose(data: &[f64], period: usize) -> Result<Decomposition> {
    if period < 2 {
        return Err(StudioError::invalid(format!(
            "Season length must be at least 2, got {}",
            period
        )));
    }
    if data.len() < 2 * period {
        return Err(StudioError::invalid(format!(
            "Decomposition needs at least two full periods ({} values), got {}",
            2 * period,
            data.len()
        )));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(StudioError::invalid("Decomposition needs finite values"));
    }

    let trend = centered_moving_average(data, period);

    let mut phase_sums = vec![0.0; period];
    let mut phase_counts = vec![0usize; period];
    for (t, tr) in trend.iter().enumerate() {
        if let Some(tr) = tr {
            phase_sums[t % period] += data[t] - tr;
            phase_counts[t % period] += 1;
        }
    }
    let raw: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();
    let shift = mean(&raw)?;
    let seasonal_indices: Vec<f64> = raw.iter().map(|v| v - shift).collect();

    let seasonal: Vec<f64> = (0..data.len())
        .map(|t| seasonal_indices[t % period])
        .collect();
    let residual = data
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((x, tr), s)| tr.map(|tr| x - tr - s))
        .collect();

    Ok(Decomposition {
        period,
        trend,
        seasonal,
        residual,
        seasonal_indices,
    })
}

/// Sample autocorrelation at `lag`
pub fn autocorrelation(data: &[f64], lag: usize) -> Result<f64> {
    if lag >= data.len() {
        return Err(StudioError::invalid(format!(
            "Lag {} must be below the series length {}",
            lag,
            data.len()
        )));
    }
    let m = mean(data)?;
    let denom: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    if denom == 0.0 {
        return Ok(0.0);
    }
    let num: f64 = (lag..data.len())
        .map(|t| (data[t] - m) * (data[t - lag] - m))
        .sum();
    Ok(num / denom)
}

/// Guess the season length as the lag in `2..=max_lag` with the highest autocorrelation
///
/// `max_lag` is capped at half the series length so at least two seasons
/// are compared. Returns `None` when no lag has positive autocorrelation.
pub fn detect_period(data: &[f64], max_lag: usize) -> Result<Option<usize>> {
    let max_lag = max_lag.min(data.len() / 2);
    if max_lag < 2 {
        return Err(StudioError::invalid(
            "Period detection needs at least four values and max_lag >= 2",
        ));
    }

    let mut best: Option<(usize, f64)> = None;
    for lag in 2..=max_lag {
        let r = autocorrelation(data, lag)?;
        if r > 0.0 && best.is_none_or(|(_, b)| r > b + 1e-12) {
            best = Some((lag, r));
        }
    }
    Ok(best.map(|(lag, _)| lag))
}
