use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use carbon_survey::{RawTable, RecodedDataset, SurveyConfig, recode};

/// One row of a synthetic survey table
#[derive(Debug, Clone, Default)]
pub struct Respondent {
    pub country: Option<&'static str>,
    pub support: Option<i64>,
    pub sex: Option<&'static str>,
    pub residence: Option<&'static str>,
    pub religiosity: Option<f64>,
    pub education: Option<&'static str>,
    pub political: Option<f64>,
    pub age: Option<f64>,
    pub income: Option<f64>,
}

impl Respondent {
    #[must_use]
    pub fn new(country: &'static str, support: i64) -> Self {
        Self {
            country: Some(country),
            support: Some(support),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn canada(support: i64) -> Self {
        Self::new("Canada", support)
    }

    #[must_use]
    pub fn sex(mut self, code: &'static str) -> Self {
        self.sex = Some(code);
        self
    }

    #[must_use]
    pub fn residence(mut self, code: &'static str) -> Self {
        self.residence = Some(code);
        self
    }

    #[must_use]
    pub fn education(mut self, code: &'static str) -> Self {
        self.education = Some(code);
        self
    }

    #[must_use]
    pub fn religiosity(mut self, value: f64) -> Self {
        self.religiosity = Some(value);
        self
    }

    #[must_use]
    pub fn political(mut self, value: f64) -> Self {
        self.political = Some(value);
        self
    }

    #[must_use]
    pub fn age(mut self, value: f64) -> Self {
        self.age = Some(value);
        self
    }

    #[must_use]
    pub fn income(mut self, value: f64) -> Self {
        self.income = Some(value);
        self
    }
}

/// Raw column names in schema order
pub const COLUMNS: [&str; 9] = [
    "COUNTRY_NAME",
    "CLIM_POLSUPPORT_fueltax",
    "DEM_GENDER_male",
    "DEM_RESIDENCE",
    "DEM_RELIGIOUS",
    "DEM_EDU",
    "DEM_POL_conservative",
    "DEM_AGEGRP",
    "DEM_INCOME",
];

/// The raw survey schema, optionally without one column
#[must_use]
pub fn survey_schema(without: Option<&str>) -> Schema {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .filter(|name| Some(**name) != without)
        .map(|name| Field::new(*name, column_type(name), true))
        .collect();
    Schema::new(fields)
}

fn column_type(name: &str) -> DataType {
    match name {
        "COUNTRY_NAME" | "DEM_GENDER_male" | "DEM_RESIDENCE" | "DEM_EDU" => DataType::Utf8,
        "CLIM_POLSUPPORT_fueltax" => DataType::Int64,
        _ => DataType::Float64,
    }
}

fn column(name: &str, rows: &[Respondent]) -> ArrayRef {
    let text = |f: fn(&Respondent) -> Option<&'static str>| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&Respondent) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    match name {
        "COUNTRY_NAME" => text(|r| r.country),
        "CLIM_POLSUPPORT_fueltax" => Arc::new(Int64Array::from(
            rows.iter().map(|r| r.support).collect::<Vec<_>>(),
        )),
        "DEM_GENDER_male" => text(|r| r.sex),
        "DEM_RESIDENCE" => text(|r| r.residence),
        "DEM_RELIGIOUS" => number(|r| r.religiosity),
        "DEM_EDU" => text(|r| r.education),
        "DEM_POL_conservative" => number(|r| r.political),
        "DEM_AGEGRP" => number(|r| r.age),
        "DEM_INCOME" => number(|r| r.income),
        other => panic!("Unknown column {other}"),
    }
}

/// Build a record batch, optionally leaving out one column
#[must_use]
pub fn survey_batch_without(rows: &[Respondent], without: Option<&str>) -> RecordBatch {
    let schema = survey_schema(without);
    let columns = schema
        .fields()
        .iter()
        .map(|field| column(field.name(), rows))
        .collect();
    RecordBatch::try_new(Arc::new(schema), columns).expect("valid survey batch")
}

#[must_use]
pub fn survey_batch(rows: &[Respondent]) -> RecordBatch {
    survey_batch_without(rows, None)
}

#[must_use]
pub fn survey_table(rows: &[Respondent]) -> RawTable {
    RawTable::from_batches(vec![survey_batch(rows)]).expect("valid survey table")
}

/// Recode rows with the default configuration
#[must_use]
pub fn recoded(rows: &[Respondent]) -> RecodedDataset {
    recode(&survey_table(rows), &SurveyConfig::default()).expect("recoding succeeds")
}

/// A path in the system temp directory unique to this test process
#[must_use]
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("carbon_survey_{}_{name}", std::process::id()))
}
