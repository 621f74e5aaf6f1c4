use carbon_survey::error::SurveyError;
use carbon_survey::{
    Category, Covariate, RawTable, Support, SurveyConfig, ValueMaps, recode, recode_values,
};

use crate::utils::{Respondent, recoded, survey_batch_without, survey_table};

/// Only Canadian respondents with an answer survive recoding
#[test]
fn test_population_filter_keeps_valid_support() {
    let rows = [
        Respondent::canada(1),
        Respondent::canada(4),
        Respondent::new("France", 2),
        Respondent {
            support: None,
            ..Respondent::canada(1)
        },
        Respondent::canada(3),
        Respondent::canada(2),
        Respondent::canada(7),
    ];

    let dataset = recoded(&rows);
    assert_eq!(dataset.len(), 3);
    assert!(dataset.records().iter().all(|r| r.country() == "Canada"));
    let support: Vec<Support> = dataset.records().iter().map(|r| r.support()).collect();
    assert_eq!(
        support,
        vec![Support::NotAtAll, Support::VeryMuch, Support::Moderately]
    );
}

/// Income is bucketed with lower-inclusive boundaries
#[test]
fn test_income_buckets() {
    let incomes = [10_000.0, 60_000.0, 120_000.0, 500_000.0, 50_000.0, 49_999.99, -5.0];
    let mut rows: Vec<Respondent> = incomes
        .iter()
        .map(|income| Respondent::canada(2).income(*income))
        .collect();
    rows.push(Respondent::canada(2));

    let dataset = recoded(&rows);
    let labels: Vec<Option<&str>> = dataset
        .records()
        .iter()
        .map(|r| r.income().map(Category::label))
        .collect();
    assert_eq!(
        labels,
        vec![
            Some("0\u{2013}50000"),
            Some("50000\u{2013}100000"),
            Some("100000\u{2013}150000"),
            Some("150000+"),
            Some("50000\u{2013}100000"),
            Some("0\u{2013}50000"),
            None,
            None,
        ]
    );
}

/// Covariates keep their codes and scale values
#[test]
fn test_covariates_are_carried_over() {
    let rows = [Respondent::canada(3)
        .sex("1")
        .residence("0")
        .education("4")
        .religiosity(2.0)
        .political(5.0)
        .age(3.0)];

    let dataset = recoded(&rows);
    let record = &dataset.records()[0];
    assert_eq!(record.sex().map(Category::code).as_deref(), Some("1"));
    assert_eq!(record.living_area().map(Category::code).as_deref(), Some("0"));
    assert_eq!(record.education().map(Category::label), Some("4"));
    assert_eq!(record.political_orientation().map(Category::code).as_deref(), Some("5"));
    assert_eq!(record.age().map(Category::code).as_deref(), Some("3"));
    assert_eq!(record.religiosity().map(Category::code).as_deref(), Some("2"));
    assert!(record.income().is_none());
    assert_eq!(dataset.field_name(Covariate::Income), "Income (CAD)");
}

/// A missing raw field is reported by name
#[test]
fn test_missing_field_is_schema_error() {
    let batch = survey_batch_without(&[Respondent::canada(1)], Some("DEM_EDU"));
    let table = RawTable::from_batches(vec![batch]).unwrap();

    let err = recode(&table, &SurveyConfig::default()).unwrap_err();
    assert!(matches!(err, SurveyError::Schema { ref field } if field == "DEM_EDU"));
}

/// The schema is checked even when the table has no rows
#[test]
fn test_schema_is_checked_without_rows() {
    let batch = survey_batch_without(&[], Some("DEM_INCOME"));
    let table = RawTable::new(batch.schema(), Vec::new()).unwrap();

    let err = recode(&table, &SurveyConfig::default()).unwrap_err();
    assert!(matches!(err, SurveyError::Schema { ref field } if field == "DEM_INCOME"));
}

/// A different country filter selects a different population
#[test]
fn test_country_filter_is_configurable() {
    let rows = [
        Respondent::canada(1),
        Respondent::new("Norway", 3),
        Respondent::new("Norway", 4),
    ];
    let config = SurveyConfig {
        country_filter: "Norway".to_string(),
        ..SurveyConfig::default()
    };

    let dataset = recode(&survey_table(&rows), &config).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].country(), "Norway");
}

/// Relabelling twice gives the same labels as relabelling once
#[test]
fn test_value_recoder_is_idempotent() {
    let rows = [
        Respondent::canada(1).sex("0").education("2").residence("1"),
        Respondent::canada(3).sex("1").education("9"),
    ];
    let dataset = recoded(&rows);
    let maps = ValueMaps::survey_defaults();

    let once = recode_values(&dataset, &maps);
    let twice = recode_values(&once, &maps);

    let labels = |covariate: Covariate| -> Vec<Vec<Option<String>>> {
        [&once, &twice]
            .iter()
            .map(|d| {
                d.records()
                    .iter()
                    .map(|r| r.covariate(covariate).map(|c| c.label().to_string()))
                    .collect()
            })
            .collect()
    };

    for covariate in [Covariate::Sex, Covariate::Education, Covariate::LivingArea] {
        let both = labels(covariate);
        assert_eq!(both[0], both[1]);
    }
    assert_eq!(
        labels(Covariate::Education)[0],
        vec![
            Some("Primary education".to_string()),
            Some("9".to_string())
        ]
    );
    assert_eq!(once.records()[0].living_area().map(Category::label), Some("Urban"));
}
