use carbon_survey::error::SurveyError;
use carbon_survey::{Covariate, Support, SupportCounts, ValueMaps, aggregate, recode_values};

use crate::utils::{Respondent, recoded};

/// Three respondents split by sex
#[test]
fn test_sex_scenario() {
    let rows = [
        Respondent::canada(1).sex("0"),
        Respondent::canada(1).sex("0"),
        Respondent::canada(3).sex("1"),
    ];

    let table = aggregate(&recoded(&rows), Covariate::Sex).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("0"), Some(&SupportCounts::new(2, 0, 0)));
    assert_eq!(table.get("1"), Some(&SupportCounts::new(0, 0, 1)));
    assert_eq!(table.get("1").map(|c| c[Support::Moderately]), Some(0));
}

/// No Canadian respondents means nothing to aggregate
#[test]
fn test_no_canada_rows_is_empty_group() {
    let rows = [
        Respondent::new("France", 1).sex("0"),
        Respondent::new("Norway", 2).sex("1"),
    ];

    let dataset = recoded(&rows);
    assert!(dataset.is_empty());
    let err = aggregate(&dataset, Covariate::Sex).unwrap_err();
    assert!(matches!(err, SurveyError::EmptyGroup { ref field } if field == "Sex"));
}

/// Row sums equal the number of respondents in each group
#[test]
fn test_row_sums_match_group_sizes() {
    let ages = [3.0, 1.0, 3.0, 2.0, 1.0, 3.0];
    let supports = [1, 2, 3, 3, 2, 1];
    let mut rows: Vec<Respondent> = ages
        .iter()
        .zip(supports)
        .map(|(age, support)| Respondent::canada(support).age(*age))
        .collect();
    rows.push(Respondent::canada(2));

    let dataset = recoded(&rows);
    let table = aggregate(&dataset, Covariate::Age).unwrap();

    for (category, counts) in table.iter() {
        let expected = dataset
            .records()
            .iter()
            .filter(|r| r.age() == Some(category))
            .count();
        assert_eq!(counts.total(), expected);
        assert_eq!(table.row_total(category), expected);
    }
    assert_eq!(table.total(), 6);

    let order: Vec<String> = table.iter().map(|(c, _)| c.code()).collect();
    assert_eq!(order, vec!["1", "2", "3"]);
}

/// Percentages of every row add up to 100
#[test]
fn test_percentages_sum_to_100() {
    let rows = [
        Respondent::canada(1).political(1.0),
        Respondent::canada(2).political(1.0),
        Respondent::canada(2).political(1.0),
        Respondent::canada(3).political(5.0),
        Respondent::canada(1).political(3.0),
        Respondent::canada(3).political(3.0),
        Respondent::canada(2).political(3.0),
    ];

    let percentages = aggregate(&recoded(&rows), Covariate::PoliticalOrientation)
        .unwrap()
        .percentages();
    assert_eq!(percentages.len(), 3);
    for (_, shares) in percentages.rows() {
        let sum: f64 = Support::ALL.iter().map(|s| shares[s]).sum();
        assert!((sum - 100.0).abs() < 0.01);
    }
}

/// Relabelled groups keep the order of their codes
#[test]
fn test_labels_do_not_change_group_order() {
    let rows = [
        Respondent::canada(3).education("4"),
        Respondent::canada(1).education("1"),
        Respondent::canada(2).education("3"),
    ];

    let labelled = recode_values(&recoded(&rows), &ValueMaps::survey_defaults());
    let table = aggregate(&labelled, Covariate::Education).unwrap();
    let labels: Vec<&str> = table.iter().map(|(c, _)| c.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Did not attend school",
            "Secondary education",
            "Higher education"
        ]
    );
}
