//! Cross-tabulation of support levels by covariate group
//!
//! Groups are keyed by [`Category`], so they come out in the natural order of
//! the covariate's scale regardless of the order respondents appear in.

use std::collections::BTreeMap;
use std::ops::Index;

use crate::error::{Result, SurveyError};
use crate::models::{Category, Covariate, RecodedDataset, Support};

/// Counts of each support level within one group
///
/// Every level has an entry, zero when no respondent chose it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportCounts([usize; 3]);

impl SupportCounts {
    #[must_use]
    pub fn new(not_at_all: usize, moderately: usize, very_much: usize) -> Self {
        Self([not_at_all, moderately, very_much])
    }

    pub fn increment(&mut self, support: Support) {
        self.0[support.index()] += 1;
    }

    #[must_use]
    pub fn get(&self, support: Support) -> usize {
        self.0[support.index()]
    }

    /// Number of respondents in the group
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(level, count)` pairs in level order
    pub fn iter(&self) -> impl Iterator<Item = (Support, usize)> + '_ {
        Support::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl Index<Support> for SupportCounts {
    type Output = usize;

    fn index(&self, support: Support) -> &usize {
        &self.0[support.index()]
    }
}

/// Support counts per group of one covariate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    field: String,
    rows: BTreeMap<Category, SupportCounts>,
}

impl ContingencyTable {
    /// Build a table from explicit rows
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::EmptyGroup`] if no group has any respondent.
    pub fn from_rows(
        field: impl Into<String>,
        rows: impl IntoIterator<Item = (Category, SupportCounts)>,
    ) -> Result<Self> {
        let field = field.into();
        let rows: BTreeMap<Category, SupportCounts> = rows
            .into_iter()
            .filter(|(_, counts)| counts.total() > 0)
            .collect();
        if rows.is_empty() {
            return Err(SurveyError::empty_group(field));
        }
        Ok(Self { field, rows })
    }

    /// Display name of the grouping field
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in group order
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &SupportCounts)> {
        self.rows.iter()
    }

    /// Counts for the group whose code is `code`
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&SupportCounts> {
        self.rows
            .iter()
            .find(|(category, _)| category.code() == code)
            .map(|(_, counts)| counts)
    }

    /// Respondents in a group before normalization
    #[must_use]
    pub fn row_total(&self, category: &Category) -> usize {
        self.rows.get(category).map_or(0, SupportCounts::total)
    }

    /// Respondents across all groups
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.values().map(SupportCounts::total).sum()
    }

    /// Normalize every row to percentages summing to 100
    #[must_use]
    pub fn percentages(&self) -> PercentageTable {
        PercentageTable::from_counts(self)
    }
}

/// Group records by `covariate` and count support levels in each group
///
/// Records with no value for the covariate are dropped.
///
/// # Errors
///
/// Returns [`SurveyError::EmptyGroup`] when no record has a value for the
/// covariate, including when the dataset itself is empty.
pub fn aggregate(dataset: &RecodedDataset, covariate: Covariate) -> Result<ContingencyTable> {
    let field = dataset.field_name(covariate);
    let mut rows: BTreeMap<Category, SupportCounts> = BTreeMap::new();

    for (record, category) in dataset.with_covariate(covariate) {
        rows.entry(category.clone())
            .or_default()
            .increment(record.support());
    }

    let table = ContingencyTable::from_rows(field, rows)?;
    log::debug!(
        "Aggregated {} of {} respondents into {} groups of '{field}'",
        table.total(),
        dataset.len(),
        table.len()
    );
    Ok(table)
}

/// Share of each support level within one group, in percent
pub type SupportShares = BTreeMap<Support, f64>;

/// A [`ContingencyTable`] with each row normalized to 100
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageTable {
    field: String,
    rows: Vec<(Category, SupportShares)>,
}

impl PercentageTable {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(table: &ContingencyTable) -> Self {
        let rows: Vec<(Category, SupportShares)> = table
            .iter()
            .map(|(category, counts)| {
                let total = counts.total() as f64;
                let shares: SupportShares = counts
                    .iter()
                    .map(|(support, count)| (support, count as f64 / total * 100.0))
                    .collect();
                (category.clone(), shares)
            })
            .collect();

        Self {
            field: table.field().to_string(),
            rows,
        }
    }

    /// Build a table from explicit shares; no support level is filled in
    #[must_use]
    pub fn from_rows(field: impl Into<String>, rows: Vec<(Category, SupportShares)>) -> Self {
        Self {
            field: field.into(),
            rows,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn rows(&self) -> &[(Category, SupportShares)] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
