//! The filtered, renamed and re-binned table shared by every downstream step.

use crate::config::FieldNames;
use crate::models::{Covariate, SurveyRecord};

/// Respondents of the population of interest
///
/// Every record carries a support level in {1, 2, 3}; the "no answer"
/// sentinel and other countries were removed when the dataset was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecodedDataset {
    records: Vec<SurveyRecord>,
    fields: FieldNames,
}

impl RecodedDataset {
    #[must_use]
    pub fn new(records: Vec<SurveyRecord>, fields: FieldNames) -> Self {
        Self { records, fields }
    }

    #[must_use]
    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [SurveyRecord] {
        &mut self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// Display name of a covariate, e.g. "Living Area"
    #[must_use]
    pub fn field_name(&self, covariate: Covariate) -> &str {
        &self.fields.covariate(covariate).display
    }

    /// Records with a value for `covariate`
    pub fn with_covariate(
        &self,
        covariate: Covariate,
    ) -> impl Iterator<Item = (&SurveyRecord, &crate::models::Category)> {
        self.records
            .iter()
            .filter_map(move |r| r.covariate(covariate).map(|value| (r, value)))
    }
}
