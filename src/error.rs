use std::io;
use thiserror::Error;

/// Crate-wide error type shared by the builder, the store and the analytics tools.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Standard input/output errors (store files, CSV files, settings files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failures while encoding or decoding the binary store format.
    #[error("Storage error: {0}")]
    Storage(#[from] bincode::Error),

    /// A parameter or input value was rejected before any work was done.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A chart configuration failed validation. Holds every problem found.
    #[error("Invalid chart configuration: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// No saved chart exists with the given id.
    #[error("Chart not found: {0}")]
    NotFound(String),

    /// The operation would clash with an existing saved chart.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested operation is not available for this chart type or build.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Drawing the preview image failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Writing a spreadsheet export failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl StudioError {
    /// Shorthand used throughout the analytics modules.
    pub fn invalid(msg: impl Into<String>) -> Self {
        StudioError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
