//! Utilities for working with Arrow arrays.
//!
//! Safe column lookup and downcasting with error messages that name the
//! offending column.

use arrow::array::{Array, ArrayRef};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Result, SurveyError};

/// Get a column from a record batch, cast to the expected type
///
/// Values that cannot be represented in the expected type become null.
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller wants to read
///
/// # Errors
///
/// Returns [`SurveyError::Schema`] if the column does not exist.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(column.clone());
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    Ok(cast(column, expected_type)?)
}

/// Downcast a column to a specific array type with clear error messages
///
/// A mismatch is reported as an Arrow cast error naming the column.
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        SurveyError::Arrow(ArrowError::CastError(format!(
            "Column '{column_name}' is a {:?} array, not {expected_type_name}",
            array.data_type()
        )))
    })
}

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns [`SurveyError::Schema`] if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema_ref()
        .index_of(column_name)
        .map_err(|_| SurveyError::schema(column_name))
}
