/*!
# Chart Studio

A chart-configuration and data-analysis studio built in Rust.

## Overview

Users pick a chart type, bind a tabular dataset to it, tune the presentation
(title, legend, grid, colours, tooltip, animation, axes, series styling) and
get back a declarative option document that a browser charting library such
as ECharts renders directly. Configurations are validated before they are
rendered or saved, can be stored and reloaded, and can be previewed as PNG
thumbnails on the server. A set of analysis tools (summary statistics,
correlation, regression, clustering, outlier detection, seasonal
decomposition, forecasting, keyword extraction and sentiment) works on the
same datasets.

## Architecture

### Configuration Layer
- **catalog**: The supported chart types and their data requirements
- **config**: The chart configuration model and its validation rules
- **theme**: Light and dark palettes and colour parsing
- **options**: Translation of a configuration into a chart option document

### Data Layer
- **dataset**: Tabular data with CSV import and export
- **analytics**: Statistical, clustering, time-series and text tools

### Persistence Layer
- **store**: Saved charts, persisted with Gzip compression and bincode
  serialization (`.bin.gz`), plus JSON import and export of single charts

### Service Layer
- **service**: The operations behind both front ends, with autosave
- **settings**: Defaults, settings file and environment overrides
- **preview** (feature `preview`): PNG thumbnails drawn with plotters
- **export** (feature `xlsx`): XLSX workbooks of datasets and forecasts
- **app** (feature `web`): JSON REST API served with axum

## REST API Endpoints

- `GET /api/chart-types` - The chart type catalog
- `GET|POST /api/charts` - List or save charts
- `GET|PUT|DELETE /api/charts/{id}` - Read, replace or remove a saved chart
- `GET /api/charts/{id}/options` - Option document of a saved chart
- `GET /api/charts/{id}/export`, `POST /api/charts/import` - Chart JSON transfer
- `POST /api/options` - Option document of an unsaved configuration
- `POST /api/preview` - PNG thumbnail of a configuration
- `POST /api/analyze` - Run an analysis tool over a dataset
- `POST /api/datasets/csv` - Parse CSV text into a dataset
- `POST /api/datasets/xlsx` - Download a dataset as an XLSX workbook
*/

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod options;
pub mod service;
pub mod settings;
pub mod store;
pub mod theme;

#[cfg(feature = "preview")]
pub mod preview;

#[cfg(feature = "xlsx")]
pub mod export;

#[cfg(feature = "web")]
pub mod app;

pub use catalog::ChartType;
pub use config::ChartConfig;
pub use dataset::Dataset;
pub use error::{Result, StudioError};
pub use options::build_options;
pub use service::Studio;
pub use store::{ConfigStore, SavedChart};
