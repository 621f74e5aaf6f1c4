//! Module for checking a dataset schema against the fields the pipeline needs.

use arrow::datatypes::Schema;

use crate::config::SurveyConfig;
use crate::error::{Result, SurveyError};

/// A struct that represents how well a dataset schema covers the configuration
#[derive(Debug)]
pub struct SchemaCompatibilityReport {
    /// Whether every required field is present
    pub compatible: bool,
    /// List of problems found, if any
    pub issues: Vec<SchemaIssue>,
}

/// A schema compatibility issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// The raw field identifier the issue concerns
    pub field: String,
    /// Description of the problem
    pub description: String,
}

/// Compare a schema with a list of required raw fields
#[must_use]
pub fn check_required_fields(schema: &Schema, required: &[&str]) -> SchemaCompatibilityReport {
    let issues: Vec<SchemaIssue> = required
        .iter()
        .filter(|field| schema.field_with_name(field).is_err())
        .map(|field| SchemaIssue {
            field: (*field).to_string(),
            description: format!("required field '{field}' is missing"),
        })
        .collect();

    SchemaCompatibilityReport {
        compatible: issues.is_empty(),
        issues,
    }
}

/// Fail with [`SurveyError::Schema`] naming the first missing field
///
/// Every missing field is logged before returning so a single run shows the
/// full extent of the mismatch.
pub fn validate_schema(schema: &Schema, config: &SurveyConfig) -> Result<()> {
    let report = check_required_fields(schema, &config.required_fields());
    if report.compatible {
        return Ok(());
    }

    for issue in &report.issues {
        log::error!("Schema issue: {}", issue.description);
    }
    let field = report
        .issues
        .into_iter()
        .next()
        .map(|issue| issue.field)
        .unwrap_or_default();
    Err(SurveyError::schema(field))
}
