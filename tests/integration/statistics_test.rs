use carbon_survey::algorithm::statistics::{default_plan, mann_whitney_u, spearman};
use carbon_survey::pipeline::run_statistics;
use carbon_survey::{Covariate, StatisticalTestRunner, TestKind};

use crate::utils::{Respondent, recoded};

fn respondents() -> Vec<Respondent> {
    vec![
        Respondent::canada(1).sex("0").residence("0").political(5.0).age(4.0),
        Respondent::canada(1).sex("0").residence("1").political(4.0).age(3.0),
        Respondent::canada(2).sex("1").residence("0").political(3.0).age(3.0),
        Respondent::canada(3).sex("1").residence("1").political(1.0).age(1.0),
        Respondent::canada(3).sex("1").residence("1").political(2.0).age(2.0),
        Respondent::canada(2).sex("0").residence("0").political(3.0),
    ]
}

/// The runner's two-sample test matches a direct call on the groups
#[test]
fn test_sex_test_compares_codes_zero_and_one() {
    let dataset = recoded(&respondents());
    let outcome = StatisticalTestRunner::new(&dataset)
        .annotation_for(Covariate::Sex)
        .unwrap();

    // Support codes of sex "0" then sex "1"
    let direct = mann_whitney_u(&[1, 1, 2], &[2, 3, 3]).unwrap();
    assert_eq!(outcome.kind(), TestKind::MannWhitney);
    assert!((outcome.statistic() - direct.statistic()).abs() < 1e-12);
    assert!((outcome.p_value() - direct.p_value()).abs() < 1e-12);
    assert_eq!(outcome.observations(), 6);
}

/// Correlations only use respondents with a value
#[test]
fn test_age_correlation_drops_missing() {
    let dataset = recoded(&respondents());
    let outcome = StatisticalTestRunner::new(&dataset)
        .annotation_for(Covariate::Age)
        .unwrap();

    let direct = spearman(&[1, 1, 2, 3, 3], &[4, 3, 3, 1, 2]).unwrap();
    assert_eq!(outcome.observations(), 5);
    assert!((outcome.statistic() - direct.statistic()).abs() < 1e-12);
    assert!(outcome.statistic() < 0.0);
}

/// Report blocks appear in plan order and failed tests do not stop the run
#[test]
fn test_report_order() {
    let dataset = recoded(&respondents());
    let report = run_statistics(&dataset);

    // Religiosity, Education and Income have no data
    assert_eq!(report.failures(), 3);
    let names: Vec<&str> = report.results().map(|(test, _)| test.name.as_str()).collect();
    let planned: Vec<String> = default_plan().into_iter().map(|t| t.name).collect();
    assert_eq!(names, planned);

    let text = report.to_string();
    let positions: Vec<usize> = [
        "Mann-Whitney U Tests:",
        "Sex U-statistic:",
        "Sex P-value:",
        "Location U-statistic:",
        "Spearman's Rank Correlation Tests:",
        "Political Spearman's Rank Correlation:",
        "Age Spearman's Rank Correlation:",
        "Age P-value:",
    ]
    .iter()
    .map(|needle| text.find(needle).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
