//! A Rust library for analysing support for a carbon tax in survey data:
//! loading and recoding the dataset, rank-based tests against demographic
//! covariates, and diverging stacked bar charts.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod recode;
pub mod render;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{FieldName, FieldNames, SurveyConfig, ValueMaps};
pub use error::{Result, SurveyError};
pub use models::{Category, Covariate, Level, RecodedDataset, Support, SurveyRecord};
pub use reader::{DatasetReader, RawTable, read_dataset};
pub use schema::{SchemaCompatibilityReport, SchemaIssue};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

// Recoding and analysis
pub use algorithm::{ContingencyTable, PercentageTable, SupportCounts, aggregate};
pub use algorithm::{StatisticalTestRunner, TestKind, TestOutcome, TestReport};
pub use recode::{FieldRecoder, IncomeBins, ValueRecoder, recode, recode_values};

// Rendering
pub use render::{Annotation, DivergingBarRenderer, LayoutStyle, LayoutVariant, layout_bars};

// Utility constants
pub use utils::DEFAULT_BATCH_SIZE;
