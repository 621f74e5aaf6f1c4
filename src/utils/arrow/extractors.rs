//! Field extraction utilities for Arrow record batches
//!
//! Whole-column extraction of the two value shapes the survey uses: numeric
//! scales and categorical codes. Missing values come back as `None`.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::format_number;
use crate::utils::arrow::array_utils::{downcast_array, get_column, get_column_index};

/// Markers that mean "missing" in text exports of the survey
const MISSING_MARKERS: [&str; 2] = ["", "NA"];

/// Extract a numeric column
///
/// Strings are parsed as numbers; values that fail to parse and `NaN` are
/// returned as `None`.
///
/// # Errors
///
/// Returns a schema error if the column is absent.
pub fn extract_float64(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<f64>>> {
    let array = get_column(batch, column_name, &DataType::Float64)?;
    let values = downcast_array::<Float64Array>(&array, column_name, "Float64")?;

    Ok(values
        .iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Extract a categorical code column as text
///
/// Numeric columns are rendered without a trailing `.0`, so a code stored as
/// the number `1` and one stored as the string `"1"` read the same.
///
/// # Errors
///
/// Returns a schema error if the column is absent.
pub fn extract_code(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<String>>> {
    let idx = get_column_index(batch, column_name)?;
    let data_type = batch.column(idx).data_type();

    if data_type.is_numeric() || *data_type == DataType::Boolean {
        return Ok(extract_float64(batch, column_name)?
            .into_iter()
            .map(|value| value.map(format_number))
            .collect());
    }

    let array = get_column(batch, column_name, &DataType::Utf8)?;
    let values = downcast_array::<StringArray>(&array, column_name, "String")?;

    Ok(values
        .iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|v| !MISSING_MARKERS.contains(v))
                .map(str::to_string)
        })
        .collect())
}

/// Number of null entries in a column, for logging
pub fn null_count(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx).null_count())
}
