//! Rank-based statistical tests of support against the covariates
//!
//! The tests themselves live in [`mann_whitney`] and [`spearman`]; the
//! [`runner`] module turns a [`crate::models::RecodedDataset`] into the fixed
//! sequence of tests reported by the statistics pipeline.

pub mod mann_whitney;
pub mod rank;
pub mod runner;
pub mod spearman;

pub use mann_whitney::mann_whitney_u;
pub use runner::{PlannedTest, StatisticalTestRunner, TestReport, default_plan};
pub use spearman::spearman;

/// The two test families used by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    /// Two independent samples, statistic U
    MannWhitney,
    /// Paired samples, statistic rho
    Spearman,
}

/// Result of one test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    kind: TestKind,
    statistic: f64,
    p_value: f64,
    observations: usize,
}

impl TestOutcome {
    #[must_use]
    pub fn new(kind: TestKind, statistic: f64, p_value: f64, observations: usize) -> Self {
        Self {
            kind,
            statistic,
            p_value,
            observations,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TestKind {
        self.kind
    }

    /// U for Mann-Whitney, rho for Spearman
    #[must_use]
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Two-sided p-value
    #[must_use]
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    #[must_use]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Short text for chart annotations
    #[must_use]
    pub fn summary(&self) -> String {
        match self.kind {
            TestKind::MannWhitney => format!("Mann-Whitney U P-Value {}", p_clause(self.p_value)),
            TestKind::Spearman => format!(
                "Spearman\u{2019}s Rank Correlation: {:.3} (P {})",
                self.statistic,
                p_clause(self.p_value)
            ),
        }
    }
}

fn p_clause(p_value: f64) -> String {
    if p_value < 0.001 {
        "< 0.001".to_string()
    } else {
        format!("= {p_value:.3}")
    }
}

/// Shortest round-trip rendering of a float with a two-digit signed exponent
///
/// `707277.0`, `0.23144956228456004`, `3.3569456524959816e-07`
#[must_use]
pub fn format_float(value: f64) -> String {
    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
