use std::fs::{self, File};

use carbon_survey::error::SurveyError;
use carbon_survey::{Covariate, DatasetReader, SurveyConfig, read_dataset, recode};
use parquet::arrow::ArrowWriter;

use crate::utils::{Respondent, survey_batch, temp_path};

const CSV: &str = "\
COUNTRY_NAME,CLIM_POLSUPPORT_fueltax,DEM_GENDER_male,DEM_RESIDENCE,DEM_RELIGIOUS,DEM_EDU,DEM_POL_conservative,DEM_AGEGRP,DEM_INCOME
Canada,1,0,1,2,3,5,2,45000
Canada,4,1,0,1,4,1,3,80000
France,2,1,1,3,2,2,1,
Canada,3,1,0,,4,1,5,
Canada,2,,1,1,,3,4,150000
";

/// A CSV export is read, filtered and recoded
#[test]
fn test_csv_round_trip() {
    let path = temp_path("survey.csv");
    fs::write(&path, CSV).unwrap();

    let table = read_dataset(&path).unwrap();
    assert_eq!(table.num_rows(), 5);

    let dataset = recode(&table, &SurveyConfig::default()).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(dataset.len(), 3);
    let sexes: Vec<Option<String>> = dataset
        .records()
        .iter()
        .map(|r| r.sex().map(|c| c.code()))
        .collect();
    assert_eq!(sexes, vec![Some("0".to_string()), Some("1".to_string()), None]);
    assert_eq!(dataset.with_covariate(Covariate::Income).count(), 2);
    assert_eq!(dataset.with_covariate(Covariate::Religiosity).count(), 2);
}

/// A smaller batch size splits the table without changing its contents
#[test]
fn test_batch_size() {
    let path = temp_path("batched.csv");
    fs::write(&path, CSV).unwrap();

    let table = DatasetReader::new().with_batch_size(2).read(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(table.batches().len(), 3);
    assert_eq!(table.num_rows(), 5);
    assert_eq!(recode(&table, &SurveyConfig::default()).unwrap().len(), 3);
}

/// A parquet file written by arrow reads back with the same rows
#[test]
fn test_parquet_round_trip() {
    let rows = [
        Respondent::canada(1).sex("0").income(12_000.0),
        Respondent::canada(3).sex("1").income(250_000.0),
        Respondent::new("France", 2).sex("1"),
    ];
    let batch = survey_batch(&rows);

    let path = temp_path("survey.parquet");
    let file = File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = read_dataset(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(table.num_rows(), 3);
    assert_eq!(table.schema().fields().len(), 9);

    let dataset = recode(&table, &SurveyConfig::default()).unwrap();
    assert_eq!(dataset.len(), 2);
    let incomes: Vec<Option<&str>> = dataset
        .records()
        .iter()
        .map(|r| r.income().map(|c| c.label()))
        .collect();
    assert_eq!(incomes, vec![Some("0\u{2013}50000"), Some("150000+")]);
}

/// Formats other than parquet and CSV are refused
#[test]
fn test_unsupported_format() {
    let err = read_dataset(&temp_path("ds_final.rds")).unwrap_err();
    assert!(matches!(err, SurveyError::UnsupportedFormat(_)));
}

/// A configuration file overrides only the keys it names
#[test]
fn test_config_from_json_file() {
    let path = temp_path("survey.json");
    fs::write(
        &path,
        r#"{
            "country_filter": "Norway",
            "income_bins": { "boundaries": [0, 100000], "labels": ["low", "high"] },
            "value_maps": { "Sex": { "0": "F", "1": "M" } }
        }"#,
    )
    .unwrap();

    let config = SurveyConfig::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.country_filter, "Norway");
    assert_eq!(config.country_field, "COUNTRY_NAME");
    assert_eq!(config.income_bins.bucket_label(150_000.0), Some("high"));
    assert_eq!(
        config.value_maps.get("Sex").and_then(|m| m.get("1")).map(String::as_str),
        Some("M")
    );
    assert!(config.value_maps.get("Living Area").is_none());
}

/// Invalid bins in a configuration file are rejected
#[test]
fn test_config_with_bad_bins() {
    let path = temp_path("bad_survey.json");
    fs::write(
        &path,
        r#"{ "income_bins": { "boundaries": [0, 100000], "labels": ["only one"] } }"#,
    )
    .unwrap();

    let result = SurveyConfig::from_json_file(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(SurveyError::Config(_))));
}
