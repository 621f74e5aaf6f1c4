//! Error handling utilities for the filter module

use crate::error::{Result, SurveyError};

/// Create a filter error
pub fn filter_err<T>(message: impl AsRef<str>) -> Result<T> {
    Err(SurveyError::filter_error(message.as_ref()))
}

/// Create a column not found error
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    filter_err(format!("Column '{column_name}' not found"))
}

/// Extension trait for adding filter context to foreign errors
pub trait FilterResultExt<T> {
    /// Add context about the column being processed
    fn with_column_context(self, column_name: &str) -> Result<T>;
}

impl<T, E: std::error::Error> FilterResultExt<T> for std::result::Result<T, E> {
    fn with_column_context(self, column_name: &str) -> Result<T> {
        self.map_err(|e| {
            SurveyError::filter_error(format!("Error processing column '{column_name}': {e}"))
        })
    }
}
