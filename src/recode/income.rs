//! Ordinal binning of the continuous income field.

use serde::Deserialize;

use crate::error::{Result, SurveyError};

/// Income buckets as half-open intervals `[lower, next_lower)`
///
/// `boundaries` holds the lower edge of every bucket; the last bucket is
/// unbounded above. Values below the first edge are not bucketed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IncomeBins {
    boundaries: Vec<f64>,
    labels: Vec<String>,
}

impl Default for IncomeBins {
    fn default() -> Self {
        Self {
            boundaries: vec![0.0, 50_000.0, 100_000.0, 150_000.0],
            labels: vec![
                "0\u{2013}50000".to_string(),
                "50000\u{2013}100000".to_string(),
                "100000\u{2013}150000".to_string(),
                "150000+".to_string(),
            ],
        }
    }
}

impl IncomeBins {
    /// Create bins from lower edges and one label per bucket
    pub fn new(boundaries: Vec<f64>, labels: Vec<String>) -> Result<Self> {
        let bins = Self { boundaries, labels };
        bins.validate()?;
        Ok(bins)
    }

    /// Check that edges are finite, strictly increasing and fully labelled
    pub fn validate(&self) -> Result<()> {
        if self.boundaries.is_empty() {
            return Err(SurveyError::Config(
                "income bins need at least one boundary".to_string(),
            ));
        }
        if self.boundaries.iter().any(|b| !b.is_finite()) {
            return Err(SurveyError::Config(
                "income bin boundaries must be finite".to_string(),
            ));
        }
        if self.boundaries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SurveyError::Config(
                "income bin boundaries must be strictly increasing".to_string(),
            ));
        }
        if self.labels.len() != self.boundaries.len() {
            return Err(SurveyError::Config(format!(
                "expected {} income bin labels, found {}",
                self.boundaries.len(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Label of bucket `index`
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of the bucket containing `value`
    ///
    /// Returns `None` for `NaN` and for values below the lowest edge.
    #[must_use]
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        // Number of lower edges at or below the value
        let above = self.boundaries.partition_point(|edge| *edge <= value);
        above.checked_sub(1)
    }

    /// Label of the bucket containing `value`
    #[must_use]
    pub fn bucket_label(&self, value: f64) -> Option<&str> {
        self.bucket(value).and_then(|index| self.label(index))
    }
}
