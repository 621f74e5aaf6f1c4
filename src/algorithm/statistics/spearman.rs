//! Spearman rank correlation with a two-sided t-test.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::rank::average_ranks;
use super::{TestKind, TestOutcome};
use crate::error::{Result, SurveyError};

/// Correlate two paired samples by rank
///
/// # Errors
///
/// Returns [`SurveyError::Statistics`] if the samples differ in length, have
/// fewer than three pairs, or either one is constant.
#[allow(clippy::cast_precision_loss)]
pub fn spearman<X: Ord, Y: Ord>(x: &[X], y: &[Y]) -> Result<TestOutcome> {
    if x.len() != y.len() {
        return Err(SurveyError::statistics(format!(
            "Spearman correlation needs paired samples, got {} and {} values",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < 3 {
        return Err(SurveyError::statistics(format!(
            "Spearman correlation needs at least 3 pairs, got {n}"
        )));
    }

    let rho = pearson(&average_ranks(x), &average_ranks(y)).ok_or_else(|| {
        SurveyError::statistics("Spearman correlation is undefined for a constant sample")
    })?;

    let df = (n - 2) as f64;
    let p_value = if rho.abs() >= 1.0 {
        0.0
    } else {
        let t = rho * (df / ((1.0 - rho) * (1.0 + rho))).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| SurveyError::statistics(format!("Student's t distribution: {e}")))?;
        (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0)
    };

    Ok(TestOutcome::new(TestKind::Spearman, rho, p_value, n))
}

/// Pearson correlation, `None` when either side has zero variance
#[allow(clippy::cast_precision_loss)]
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
