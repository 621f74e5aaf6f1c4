//! Error handling for the survey analysis pipeline.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors produced while loading, recoding, analysing or rendering survey data
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// A field required by the rename table is absent from the input
    #[error("Schema error: required field '{field}' is missing from the dataset")]
    Schema { field: String },

    /// A grouping produced no usable rows
    #[error("Empty group error: field '{field}' has no non-missing rows")]
    EmptyGroup { field: String },

    /// A percentage row is missing one of the support categories
    #[error("Render error: group '{group}' has no '{category}' share")]
    Render { group: String, category: String },

    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error evaluating a filter expression
    #[error("Filter error: {0}")]
    Filter(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// A statistical test could not be computed
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// The plotting backend failed
    #[error("Plot error: {0}")]
    Plot(String),

    /// The dataset file extension is not one we can read
    #[error("Unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl SurveyError {
    /// Create a schema error for a missing field
    pub fn schema(field: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
        }
    }

    /// Create an empty group error for a grouping field
    pub fn empty_group(field: impl Into<String>) -> Self {
        Self::EmptyGroup {
            field: field.into(),
        }
    }

    /// Create a filter error
    pub fn filter_error(message: impl Into<String>) -> Self {
        Self::Filter(message.into())
    }

    /// Create a statistics error
    pub fn statistics(message: impl Into<String>) -> Self {
        Self::Statistics(message.into())
    }
}

/// Result type for survey operations
pub type Result<T> = std::result::Result<T, SurveyError>;
