//! Analysis algorithms over the recoded dataset
//!
//! Cross-tabulation for the charts and rank-based tests for the report.

pub mod aggregate;
pub mod statistics;

pub use aggregate::{ContingencyTable, PercentageTable, SupportCounts, SupportShares, aggregate};
pub use statistics::{StatisticalTestRunner, TestKind, TestOutcome, TestReport};
