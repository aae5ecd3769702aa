//! Advanced tools: statistics, clustering, forecasting and text analytics.
//!
//! Every function in the submodules is pure and independent of the others.
//! [`run_analysis`] is the single entry point the UI handlers use: it picks
//! the columns a request names out of a [`Dataset`] and calls one tool.

pub mod clustering;
pub mod forecast;
pub mod outliers;
pub mod regression;
pub mod seasonality;
pub mod stats;
pub mod text;

use crate::dataset::{Dataset, parse_number};
use crate::error::{Result, StudioError};
use clustering::{KMeansOptions, KMeansResult, KSuggestion};
use forecast::{Forecast, ForecastMethod};
use outliers::OutlierReport;
use regression::LinearFit;
use seasonality::Decomposition;
use serde::{Deserialize, Serialize};
use stats::Summary;
use text::{Keyword, KeywordOptions, Sentiment};

fn default_iqr_multiplier() -> f64 {
    1.5
}

fn default_zscore_threshold() -> f64 {
    3.0
}

fn default_alpha() -> f64 {
    0.3
}

fn default_window() -> usize {
    3
}

fn default_horizon() -> usize {
    5
}

/// One tool invocation, as posted by the front end
///
/// Serialized with a `tool` tag, e.g.
/// `{"tool": "iqr_outliers", "column": "sales", "multiplier": 1.5}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum AnalysisRequest {
    Summary {
        column: String,
    },
    Correlation {
        x: String,
        y: String,
    },
    LinearRegression {
        x: String,
        y: String,
    },
    Kmeans {
        columns: Vec<String>,
        k: usize,
        #[serde(default)]
        options: KMeansOptions,
    },
    SuggestK {
        columns: Vec<String>,
        k_min: usize,
        k_max: usize,
        #[serde(default)]
        options: KMeansOptions,
    },
    IqrOutliers {
        column: String,
        #[serde(default = "default_iqr_multiplier")]
        multiplier: f64,
    },
    ZscoreOutliers {
        column: String,
        #[serde(default = "default_zscore_threshold")]
        threshold: f64,
    },
    Decompose {
        column: String,
        /// Detected from the autocorrelation when omitted
        #[serde(default)]
        period: Option<usize>,
    },
    Forecast {
        column: String,
        method: ForecastMethod,
        #[serde(default = "default_horizon")]
        horizon: usize,
        #[serde(default = "default_alpha")]
        alpha: f64,
        #[serde(default = "default_window")]
        window: usize,
    },
    Keywords {
        column: String,
        #[serde(default)]
        options: KeywordOptions,
    },
    Sentiment {
        column: String,
    },
}

impl AnalysisRequest {
    /// Tag of the tool, as used in the JSON form
    pub fn tool(&self) -> &'static str {
        match self {
            AnalysisRequest::Summary { .. } => "summary",
            AnalysisRequest::Correlation { .. } => "correlation",
            AnalysisRequest::LinearRegression { .. } => "linear_regression",
            AnalysisRequest::Kmeans { .. } => "kmeans",
            AnalysisRequest::SuggestK { .. } => "suggest_k",
            AnalysisRequest::IqrOutliers { .. } => "iqr_outliers",
            AnalysisRequest::ZscoreOutliers { .. } => "zscore_outliers",
            AnalysisRequest::Decompose { .. } => "decompose",
            AnalysisRequest::Forecast { .. } => "forecast",
            AnalysisRequest::Keywords { .. } => "keywords",
            AnalysisRequest::Sentiment { .. } => "sentiment",
        }
    }
}

/// Result of [`run_analysis`], tagged with the same tool name as the request
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "tool", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutput {
    Summary(Summary),
    Correlation(f64),
    LinearRegression(LinearFit),
    Kmeans(KMeansResult),
    SuggestK(KSuggestion),
    IqrOutliers(OutlierReport),
    ZscoreOutliers(OutlierReport),
    Decompose(Decomposition),
    Forecast(Forecast),
    Keywords(Vec<Keyword>),
    Sentiment(Vec<Sentiment>),
}

/// Rows where every named column holds a number, as points
pub fn numeric_rows(dataset: &Dataset, columns: &[String]) -> Result<Vec<Vec<f64>>> {
    if columns.is_empty() {
        return Err(StudioError::invalid("At least one column is required"));
    }
    let indices = columns
        .iter()
        .map(|c| {
            dataset
                .column_index(c)
                .ok_or_else(|| StudioError::invalid(format!("Unknown column '{}'", c)))
        })
        .collect::<Result<Vec<usize>>>()?;

    Ok(dataset
        .rows
        .iter()
        .filter_map(|row| {
            indices
                .iter()
                .map(|&i| row.get(i).and_then(|cell| parse_number(cell)))
                .collect::<Option<Vec<f64>>>()
        })
        .collect())
}

/// Runs one tool over the columns of a dataset
///
/// Non-numeric cells are skipped for single-column numeric tools; paired and
/// multi-column tools only use rows where every named column is numeric.
pub fn run_analysis(dataset: &Dataset, request: &AnalysisRequest) -> Result<AnalysisOutput> {
    log::debug!(
        "running {} over {} row(s)",
        request.tool(),
        dataset.row_count()
    );

    let output = match request {
        AnalysisRequest::Summary { column } => {
            AnalysisOutput::Summary(stats::summarize(&dataset.numeric_column(column)?)?)
        }
        AnalysisRequest::Correlation { x, y } => {
            let (xs, ys): (Vec<f64>, Vec<f64>) = dataset.numeric_pairs(x, y)?.into_iter().unzip();
            AnalysisOutput::Correlation(stats::pearson_correlation(&xs, &ys)?)
        }
        AnalysisRequest::LinearRegression { x, y } => {
            let (xs, ys): (Vec<f64>, Vec<f64>) = dataset.numeric_pairs(x, y)?.into_iter().unzip();
            AnalysisOutput::LinearRegression(regression::linear_regression(&xs, &ys)?)
        }
        AnalysisRequest::Kmeans { columns, k, options } => {
            let points = numeric_rows(dataset, columns)?;
            AnalysisOutput::Kmeans(clustering::kmeans(&points, *k, options)?)
        }
        AnalysisRequest::SuggestK {
            columns,
            k_min,
            k_max,
            options,
        } => {
            let points = numeric_rows(dataset, columns)?;
            AnalysisOutput::SuggestK(clustering::suggest_k(&points, *k_min, *k_max, options)?)
        }
        AnalysisRequest::IqrOutliers { column, multiplier } => AnalysisOutput::IqrOutliers(
            outliers::iqr_outliers(&dataset.numeric_column(column)?, *multiplier)?,
        ),
        AnalysisRequest::ZscoreOutliers { column, threshold } => AnalysisOutput::ZscoreOutliers(
            outliers::zscore_outliers(&dataset.numeric_column(column)?, *threshold)?,
        ),
        AnalysisRequest::Decompose { column, period } => {
            let values = dataset.numeric_column(column)?;
            let period = match period {
                Some(p) => *p,
                None => seasonality::detect_period(&values, values.len() / 2)?.ok_or_else(
                    || StudioError::invalid(format!("No seasonal period found in '{}'", column)),
                )?,
            };
            AnalysisOutput::Decompose(seasonality::decompose(&values, period)?)
        }
        AnalysisRequest::Forecast {
            column,
            method,
            horizon,
            alpha,
            window,
        } => {
            let values = dataset.numeric_column(column)?;
            let result = match method {
                ForecastMethod::ExponentialSmoothing => {
                    forecast::exponential_smoothing(&values, *alpha, *horizon)?
                }
                ForecastMethod::LinearTrend => forecast::linear_trend_forecast(&values, *horizon)?,
                ForecastMethod::MovingAverage => {
                    forecast::moving_average_forecast(&values, *window, *horizon)?
                }
            };
            AnalysisOutput::Forecast(result)
        }
        AnalysisRequest::Keywords { column, options } => {
            AnalysisOutput::Keywords(text::extract_keywords(&dataset.column_text(column)?, options))
        }
        AnalysisRequest::Sentiment { column } => AnalysisOutput::Sentiment(
            dataset
                .column_text(column)?
                .iter()
                .map(|t| text::analyze_sentiment(t))
                .collect(),
        ),
    };
    Ok(output)
}
