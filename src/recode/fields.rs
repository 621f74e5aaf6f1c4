//! Field recoding: population filter, rename and income binning.

use arrow::record_batch::RecordBatch;

use crate::config::SurveyConfig;
use crate::error::Result;
use crate::filter::{BatchFilter, population_filter};
use crate::models::{Category, Covariate, Level, RecodedDataset, Support, SurveyRecord};
use crate::reader::RawTable;
use crate::schema::validate_schema;
use crate::utils::arrow::{extract_code, extract_float64, null_count};
use crate::utils::logging::log_warning;

/// How the raw values of a covariate are turned into levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelKind {
    /// Categorical codes kept as text
    Code,
    /// Points on a numeric scale
    Scale,
    /// Continuous values put into ordered buckets
    Binned,
}

impl LevelKind {
    fn of(covariate: Covariate) -> Self {
        match covariate {
            Covariate::Sex | Covariate::LivingArea | Covariate::Education => Self::Code,
            Covariate::Religiosity | Covariate::PoliticalOrientation | Covariate::Age => {
                Self::Scale
            }
            Covariate::Income => Self::Binned,
        }
    }
}

/// Builds the [`RecodedDataset`] from a raw table
#[derive(Debug, Clone, Copy)]
pub struct FieldRecoder<'a> {
    config: &'a SurveyConfig,
}

impl<'a> FieldRecoder<'a> {
    #[must_use]
    pub fn new(config: &'a SurveyConfig) -> Self {
        Self { config }
    }

    /// Filter, rename and re-bin the raw table
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SurveyError::Schema`] naming the first required
    /// field absent from the table.
    pub fn recode(&self, table: &RawTable) -> Result<RecodedDataset> {
        validate_schema(table.schema(), self.config)?;

        let filter = population_filter(
            &self.config.country_field,
            &self.config.country_filter,
            &self.config.fields.support.raw,
            self.config.no_answer_code,
        );
        let batches = filter.filter_all(table.batches())?;

        let mut records = Vec::new();
        let mut invalid_support = 0;
        for batch in &batches {
            invalid_support += self.recode_batch(batch, &mut records)?;
        }

        if invalid_support > 0 {
            log_warning(
                &format!(
                    "Dropped {invalid_support} rows whose '{}' is not a valid support level",
                    self.config.fields.support.display
                ),
                None,
            );
        }
        log::info!(
            "Recoded {} of {} rows for {} = {}",
            records.len(),
            table.num_rows(),
            self.config.country_field,
            self.config.country_filter
        );

        Ok(RecodedDataset::new(records, self.config.fields.clone()))
    }

    /// Append the records of one filtered batch, returning the rows dropped
    fn recode_batch(&self, batch: &RecordBatch, records: &mut Vec<SurveyRecord>) -> Result<usize> {
        let countries = extract_code(batch, &self.config.country_field)?;
        let support = extract_float64(batch, &self.config.fields.support.raw)?;
        let mut columns = Covariate::ALL
            .iter()
            .map(|covariate| self.covariate_column(batch, *covariate))
            .collect::<Result<Vec<_>>>()?;

        let mut dropped = 0;
        for (row, country) in countries.into_iter().enumerate() {
            let Some(level) = support[row].and_then(Support::from_code) else {
                dropped += 1;
                continue;
            };

            let mut record = SurveyRecord::new(country.unwrap_or_default(), level);
            for (covariate, column) in Covariate::ALL.iter().zip(columns.iter_mut()) {
                record = record.with(*covariate, column[row].take());
            }
            records.push(record);
        }

        Ok(dropped)
    }

    fn covariate_column(
        &self,
        batch: &RecordBatch,
        covariate: Covariate,
    ) -> Result<Vec<Option<Category>>> {
        let raw = self.config.fields.covariate(covariate).raw.as_str();
        log::debug!(
            "Column '{raw}' has {} nulls in a batch of {} rows",
            null_count(batch, raw)?,
            batch.num_rows()
        );

        let column = match LevelKind::of(covariate) {
            LevelKind::Code => extract_code(batch, raw)?
                .into_iter()
                .map(|code| code.map(|c| Category::new(Level::Text(c))))
                .collect(),
            LevelKind::Scale => extract_float64(batch, raw)?
                .into_iter()
                .map(|value| value.map(|v| Category::new(Level::Numeric(v))))
                .collect(),
            LevelKind::Binned => {
                let bins = &self.config.income_bins;
                extract_float64(batch, raw)?
                    .into_iter()
                    .map(|value| {
                        let index = value.and_then(|v| bins.bucket(v))?;
                        let label = bins.label(index)?;
                        Some(Category::with_label(Level::Ordinal(index), label))
                    })
                    .collect()
            }
        };
        Ok(column)
    }
}

/// Recode a raw table with the given configuration
pub fn recode(table: &RawTable, config: &SurveyConfig) -> Result<RecodedDataset> {
    FieldRecoder::new(config).recode(table)
}
