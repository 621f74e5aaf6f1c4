//! The fixed sequence of tests run by the statistics pipeline.

use std::fmt;

use super::{TestKind, TestOutcome, format_float, mann_whitney_u, spearman};
use crate::error::{Result, SurveyError};
use crate::models::{Category, Covariate, RecodedDataset, Support};

/// One entry of the test plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTest {
    /// Name used in the report, e.g. "Location"
    pub name: String,
    pub covariate: Covariate,
    pub kind: TestKind,
}

impl PlannedTest {
    #[must_use]
    pub fn new(name: &str, covariate: Covariate, kind: TestKind) -> Self {
        Self {
            name: name.to_string(),
            covariate,
            kind,
        }
    }
}

/// Sex and Location as two-sample tests, then five rank correlations
#[must_use]
pub fn default_plan() -> Vec<PlannedTest> {
    vec![
        PlannedTest::new("Sex", Covariate::Sex, TestKind::MannWhitney),
        PlannedTest::new("Location", Covariate::LivingArea, TestKind::MannWhitney),
        PlannedTest::new("Religiosity", Covariate::Religiosity, TestKind::Spearman),
        PlannedTest::new("Education", Covariate::Education, TestKind::Spearman),
        PlannedTest::new("Political", Covariate::PoliticalOrientation, TestKind::Spearman),
        PlannedTest::new("Age", Covariate::Age, TestKind::Spearman),
        PlannedTest::new("Income", Covariate::Income, TestKind::Spearman),
    ]
}

/// Codes of the two groups compared by the two-sample tests
const TWO_SAMPLE_CODES: (&str, &str) = ("0", "1");

/// Runs tests of support against covariates of one dataset
#[derive(Debug, Clone, Copy)]
pub struct StatisticalTestRunner<'a> {
    dataset: &'a RecodedDataset,
}

impl<'a> StatisticalTestRunner<'a> {
    #[must_use]
    pub fn new(dataset: &'a RecodedDataset) -> Self {
        Self { dataset }
    }

    /// Run a single test; respondents missing the covariate are left out
    pub fn run(&self, test: &PlannedTest) -> Result<TestOutcome> {
        match test.kind {
            TestKind::MannWhitney => self.two_sample(test.covariate),
            TestKind::Spearman => self.correlation(test.covariate),
        }
    }

    /// The test that annotates a chart of `covariate`
    ///
    /// Two-group covariates get a Mann-Whitney test, ordered ones a rank
    /// correlation.
    pub fn annotation_for(&self, covariate: Covariate) -> Result<TestOutcome> {
        match covariate {
            Covariate::Sex | Covariate::LivingArea => self.two_sample(covariate),
            _ => self.correlation(covariate),
        }
    }

    /// Run every test of `plan`, keeping failures next to successes
    #[must_use]
    pub fn run_all(&self, plan: &[PlannedTest]) -> TestReport {
        let results = plan
            .iter()
            .map(|test| {
                let outcome = self.run(test);
                if let Err(e) = &outcome {
                    log::error!("{} test failed: {e}", test.name);
                }
                (test.clone(), outcome)
            })
            .collect();
        TestReport { results }
    }

    fn two_sample(&self, covariate: Covariate) -> Result<TestOutcome> {
        let (first_code, second_code) = TWO_SAMPLE_CODES;
        let sample = |code: &str| -> Vec<Support> {
            self.dataset
                .with_covariate(covariate)
                .filter(|(_, category)| category.code() == code)
                .map(|(record, _)| record.support())
                .collect()
        };

        let (first, second) = (sample(first_code), sample(second_code));
        if first.is_empty() || second.is_empty() {
            return Err(SurveyError::empty_group(format!(
                "{} (codes {first_code} and {second_code})",
                self.dataset.field_name(covariate)
            )));
        }
        mann_whitney_u(&first, &second)
    }

    fn correlation(&self, covariate: Covariate) -> Result<TestOutcome> {
        let (levels, support): (Vec<&Category>, Vec<Support>) = self
            .dataset
            .with_covariate(covariate)
            .map(|(record, category)| (category, record.support()))
            .unzip();

        if levels.is_empty() {
            return Err(SurveyError::empty_group(self.dataset.field_name(covariate)));
        }
        spearman(&support, &levels)
    }
}

/// Outcomes of a test plan, in plan order
#[derive(Debug)]
pub struct TestReport {
    results: Vec<(PlannedTest, Result<TestOutcome>)>,
}

impl TestReport {
    pub fn results(&self) -> impl Iterator<Item = (&PlannedTest, &Result<TestOutcome>)> {
        self.results.iter().map(|(test, outcome)| (test, outcome))
    }

    /// Number of tests that could not be computed
    #[must_use]
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }

    fn write_kind(&self, f: &mut fmt::Formatter<'_>, kind: TestKind) -> fmt::Result {
        let statistic_name = match kind {
            TestKind::MannWhitney => "U-statistic",
            TestKind::Spearman => "Spearman's Rank Correlation",
        };

        for (test, outcome) in self.results.iter().filter(|(t, _)| t.kind == kind) {
            match outcome {
                Ok(outcome) => {
                    writeln!(
                        f,
                        "{} {statistic_name}: {}",
                        test.name,
                        format_float(outcome.statistic())
                    )?;
                    writeln!(f, "{} P-value: {}", test.name, format_float(outcome.p_value()))?;
                }
                Err(e) => writeln!(f, "{} {statistic_name}: not computed ({e})", test.name)?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mann-Whitney U Tests:")?;
        writeln!(f)?;
        self.write_kind(f, TestKind::MannWhitney)?;
        writeln!(f, "Spearman's Rank Correlation Tests:")?;
        writeln!(f)?;
        self.write_kind(f, TestKind::Spearman)
    }
}
