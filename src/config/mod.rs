//! Configuration for the survey pipeline.
//!
//! Rename tables, value maps and income bin boundaries are plain data passed
//! into the recoders, so alternate mappings can be tested or loaded from JSON.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{Result, SurveyError};
use crate::error::util::safe_open_file;
use crate::models::Covariate;
use crate::recode::IncomeBins;

/// A raw field identifier and the display name it is renamed to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldName {
    /// Column name in the raw dataset
    pub raw: String,
    /// Human readable name used in reports and charts
    pub display: String,
}

impl FieldName {
    #[must_use]
    pub fn new(raw: &str, display: &str) -> Self {
        Self {
            raw: raw.to_string(),
            display: display.to_string(),
        }
    }
}

/// The rename table: one entry per field used downstream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub support: FieldName,
    pub age: FieldName,
    pub sex: FieldName,
    pub income: FieldName,
    pub political_orientation: FieldName,
    pub religiosity: FieldName,
    pub residence: FieldName,
    pub education: FieldName,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            support: FieldName::new("CLIM_POLSUPPORT_fueltax", "Carbon Tax Support"),
            age: FieldName::new("DEM_AGEGRP", "Age"),
            sex: FieldName::new("DEM_GENDER_male", "Sex"),
            income: FieldName::new("DEM_INCOME", "Income (CAD)"),
            political_orientation: FieldName::new("DEM_POL_conservative", "Political Orientation"),
            religiosity: FieldName::new("DEM_RELIGIOUS", "Religiosity"),
            residence: FieldName::new("DEM_RESIDENCE", "Living Area"),
            education: FieldName::new("DEM_EDU", "Highest Education"),
        }
    }
}

impl FieldNames {
    /// The field backing a covariate
    #[must_use]
    pub fn covariate(&self, covariate: Covariate) -> &FieldName {
        match covariate {
            Covariate::Sex => &self.sex,
            Covariate::LivingArea => &self.residence,
            Covariate::Religiosity => &self.religiosity,
            Covariate::Education => &self.education,
            Covariate::PoliticalOrientation => &self.political_orientation,
            Covariate::Age => &self.age,
            Covariate::Income => &self.income,
        }
    }

    /// All eight entries as `(raw, display)` pairs, response field first
    #[must_use]
    pub fn rename_table(&self) -> Vec<(&str, &str)> {
        std::iter::once(&self.support)
            .chain(Covariate::ALL.iter().map(|c| self.covariate(*c)))
            .map(|f| (f.raw.as_str(), f.display.as_str()))
            .collect()
    }

    /// Look up the display name for a raw field identifier
    #[must_use]
    pub fn display_name(&self, raw: &str) -> Option<&str> {
        self.rename_table()
            .into_iter()
            .find(|(r, _)| *r == raw)
            .map(|(_, display)| display)
    }
}

/// Code to label maps keyed by display field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ValueMaps(FxHashMap<String, FxHashMap<String, String>>);

impl ValueMaps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the mapping for a field
    #[must_use]
    pub fn with_field<'a>(
        mut self,
        field: &str,
        mapping: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mapping = mapping
            .into_iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect();
        self.0.insert(field.to_string(), mapping);
        self
    }

    /// The mapping configured for a display field name, if any
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FxHashMap<String, String>> {
        self.0.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The maps used for the published charts
    #[must_use]
    pub fn survey_defaults() -> Self {
        Self::new()
            .with_field("Sex", [("1", "Male"), ("0", "Female")])
            .with_field(
                "Highest Education",
                [
                    ("1", "Did not attend school"),
                    ("2", "Primary education"),
                    ("3", "Secondary education"),
                    ("4", "Higher education"),
                ],
            )
            .with_field("Living Area", [("1", "Urban"), ("0", "Rural")])
    }
}

/// Configuration for the whole pipeline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Column holding the respondent's country
    pub country_field: String,
    /// Only respondents from this country are analysed
    pub country_filter: String,
    /// Support code meaning "no answer"; excluded everywhere
    pub no_answer_code: i64,
    /// Rename table
    pub fields: FieldNames,
    /// Income bucket boundaries and labels
    pub income_bins: IncomeBins,
    /// Display labels for categorical codes (visualization only)
    pub value_maps: ValueMaps,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            country_field: "COUNTRY_NAME".to_string(),
            country_filter: "Canada".to_string(),
            no_answer_code: 4,
            fields: FieldNames::default(),
            income_bins: IncomeBins::default(),
            value_maps: ValueMaps::survey_defaults(),
        }
    }
}

impl SurveyConfig {
    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "survey configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        log::info!("Loaded survey configuration from {}", path.display());
        Ok(config)
    }

    /// Check invariants that deserialization alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        if self.country_field.is_empty() {
            return Err(SurveyError::Config(
                "country_field must not be empty".to_string(),
            ));
        }
        if let Some((_, display)) = self
            .fields
            .rename_table()
            .into_iter()
            .find(|(raw, _)| raw.is_empty())
        {
            return Err(SurveyError::Config(format!(
                "rename table entry '{display}' has an empty raw field name"
            )));
        }
        self.income_bins.validate()
    }

    /// Raw fields that must be present in the dataset
    #[must_use]
    pub fn required_fields(&self) -> Vec<&str> {
        std::iter::once(self.country_field.as_str())
            .chain(self.fields.rename_table().into_iter().map(|(raw, _)| raw))
            .collect()
    }
}
