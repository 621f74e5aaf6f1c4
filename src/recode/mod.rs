//! Recoding of the raw survey table.
//!
//! [`FieldRecoder`] produces the [`crate::models::RecodedDataset`] shared by
//! the statistics and visualization paths; [`ValueRecoder`] only runs on the
//! visualization path and swaps codes for display labels.

pub mod fields;
pub mod income;
pub mod values;

pub use fields::{FieldRecoder, recode};
pub use income::IncomeBins;
pub use values::{ValueRecoder, recode_values};
