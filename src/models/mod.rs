//! Typed survey data.

pub mod dataset;
pub mod level;
pub mod record;
pub mod support;

pub use dataset::RecodedDataset;
pub use level::{Category, Level, format_number};
pub use record::{Covariate, SurveyRecord};
pub use support::Support;
