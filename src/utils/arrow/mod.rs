//! Arrow data handling utilities
//!
//! Helpers for column lookup, type conversion and value extraction from
//! record batches.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, get_column, get_column_index};
pub use extractors::{extract_code, extract_float64, null_count};
