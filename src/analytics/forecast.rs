//! Simple univariate forecasting.
//!
//! Three methods, each returning one-step-ahead fitted values over the
//! history plus `horizon` future values, and the error of the fitted values
//! against what actually happened.

use crate::analytics::regression::trend_line;
use crate::error::{Result, StudioError};
use serde::{Deserialize, Serialize};

pub const MAX_HORIZON: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    ExponentialSmoothing,
    LinearTrend,
    MovingAverage,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Forecast {
    pub method: ForecastMethod,
    /// Prediction made for each historical point from the points before it;
    /// `None` where there was not enough history yet
    pub fitted: Vec<Option<f64>>,
    pub forecast: Vec<f64>,
    /// Mean absolute error of the fitted values, `None` if nothing was fitted
    pub mae: Option<f64>,
    /// Root mean squared error of the fitted values
    pub rmse: Option<f64>,
}

impl Forecast {
    fn new(method: ForecastMethod, data: &[f64], fitted: Vec<Option<f64>>, forecast: Vec<f64>) -> Self {
        let errors: Vec<f64> = data
            .iter()
            .zip(&fitted)
            .filter_map(|(actual, f)| f.map(|f| actual - f))
            .collect();
        let (mae, rmse) = if errors.is_empty() {
            (None, None)
        } else {
            let n = errors.len() as f64;
            (
                Some(errors.iter().map(|e| e.abs()).sum::<f64>() / n),
                Some((errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt()),
            )
        };
        Forecast {
            method,
            fitted,
            forecast,
            mae,
            rmse,
        }
    }
}

fn check_series(data: &[f64], horizon: usize) -> Result<()> {
    if data.is_empty() {
        return Err(StudioError::invalid("Cannot forecast an empty series"));
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(StudioError::invalid("Forecasting needs finite values"));
    }
    if horizon > MAX_HORIZON {
        return Err(StudioError::invalid(format!(
            "Horizon {} exceeds {}",
            horizon, MAX_HORIZON
        )));
    }
    Ok(())
}

/// Simple exponential smoothing
///
/// `level[0] = x[0]`, `level[t] = alpha * x[t] + (1 - alpha) * level[t-1]`.
/// The fitted value at `t` is `level[t-1]`, and every future value equals
/// the last level.
pub fn exponential_smoothing(data: &[f64], alpha: f64, horizon: usize) -> Result<Forecast> {
    check_series(data, horizon)?;
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(StudioError::invalid(format!(
            "Smoothing factor must be in (0, 1], got {}",
            alpha
        )));
    }

    let mut level = data[0];
    let mut fitted = Vec::with_capacity(data.len());
    fitted.push(None);
    for &x in &data[1..] {
        fitted.push(Some(level));
        level = alpha * x + (1.0 - alpha) * level;
    }

    Ok(Forecast::new(
        ForecastMethod::ExponentialSmoothing,
        data,
        fitted,
        vec![level; horizon],
    ))
}

/// Extends the least-squares trend line through the series
///
/// Points are placed at x = 0, 1, ..., n-1 and the forecast continues at
/// x = n, n+1, ... The fitted value at `t` comes from the line through the
/// first `t` points only, so the first two are `None`.
pub fn linear_trend_forecast(data: &[f64], horizon: usize) -> Result<Forecast> {
    check_series(data, horizon)?;
    let fit = trend_line(data)?;
    let n = data.len();
    let fitted = (0..n)
        .map(|t| {
            if t < 2 {
                return Ok(None);
            }
            Ok(Some(trend_line(&data[..t])?.predict(t as f64)))
        })
        .collect::<Result<Vec<_>>>()?;
    let forecast = (n..n + horizon).map(|i| fit.predict(i as f64)).collect();
    Ok(Forecast::new(ForecastMethod::LinearTrend, data, fitted, forecast))
}

/// Moving-average forecast over the last `window` values
///
/// Each forecast value is appended to the history before the next one is
/// computed, so later forecasts average earlier forecasts.
pub fn moving_average_forecast(data: &[f64], window: usize, horizon: usize) -> Result<Forecast> {
    check_series(data, horizon)?;
    if window == 0 || window > data.len() {
        return Err(StudioError::invalid(format!(
            "Window must be between 1 and {}, got {}",
            data.len(),
            window
        )));
    }

    let average = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
    let fitted = (0..data.len())
        .map(|t| (t >= window).then(|| average(&data[t - window..t])))
        .collect();

    let mut history = data.to_vec();
    let mut forecast = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        let next = average(&history[history.len() - window..]);
        history.push(next);
        forecast.push(next);
    }

    Ok(Forecast::new(ForecastMethod::MovingAverage, data, fitted, forecast))
}
