//! Two-sided Mann-Whitney U test.

use statrs::distribution::{ContinuousCDF, Normal};

use super::rank::{average_ranks, tie_sizes};
use super::{TestKind, TestOutcome};
use crate::error::{Result, SurveyError};

/// Largest sample size for which the exact null distribution is always used
const EXACT_LIMIT: usize = 8;

/// Compare two independent samples
///
/// The statistic is U of the first sample. The exact null distribution is
/// used when there are no ties and at least one sample has at most eight
/// observations; otherwise the normal approximation with tie and continuity
/// corrections.
///
/// # Errors
///
/// Returns [`SurveyError::Statistics`] if a sample is empty or every
/// observation is tied.
#[allow(clippy::cast_precision_loss)]
pub fn mann_whitney_u<T: Ord + Clone>(x: &[T], y: &[T]) -> Result<TestOutcome> {
    let (n1, n2) = (x.len(), y.len());
    if n1 == 0 || n2 == 0 {
        return Err(SurveyError::statistics(
            "Mann-Whitney U needs two non-empty samples",
        ));
    }

    let combined: Vec<T> = x.iter().chain(y).cloned().collect();
    let ranks = average_ranks(&combined);
    let rank_sum: f64 = ranks[..n1].iter().sum();
    let u1 = rank_sum - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = (n1 * n2) as f64 - u1;
    let u = u1.max(u2);

    let ties = tie_sizes(&combined);
    let has_ties = ties.iter().any(|&t| t > 1);

    let p_value = if !has_ties && n1.min(n2) <= EXACT_LIMIT {
        exact_p_value(n1, n2, u)
    } else {
        asymptotic_p_value(n1, n2, u, &ties)?
    };

    Ok(TestOutcome::new(
        TestKind::MannWhitney,
        u1,
        p_value.clamp(0.0, 1.0),
        n1 + n2,
    ))
}

/// Number of arrangements giving each U for samples of size `m` and `n`
///
/// These are the coefficients of the Gaussian binomial `[m + n choose m]`,
/// built one factor `(1 - q^(n+i)) / (1 - q^i)` at a time.
fn u_frequencies(m: usize, n: usize) -> Vec<f64> {
    let degree = m * n;
    let mut coeffs = vec![0.0; degree + 1];
    coeffs[0] = 1.0;

    for i in 1..=m {
        let shift = n + i;
        for k in (shift..=degree).rev() {
            coeffs[k] -= coeffs[k - shift];
        }
        for k in i..=degree {
            coeffs[k] += coeffs[k - i];
        }
    }

    coeffs
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn exact_p_value(n1: usize, n2: usize, u: f64) -> f64 {
    let freqs = u_frequencies(n1.min(n2), n1.max(n2));
    let total: f64 = freqs.iter().sum();
    let at_least = u.round() as usize;
    let upper: f64 = freqs.iter().skip(at_least).sum();
    2.0 * upper / total
}

#[allow(clippy::cast_precision_loss)]
fn asymptotic_p_value(n1: usize, n2: usize, u: f64, ties: &[usize]) -> Result<f64> {
    let n = (n1 + n2) as f64;
    let tie_term: f64 = ties
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum();

    let mean = (n1 * n2) as f64 / 2.0;
    let variance = (n1 * n2) as f64 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if variance <= 0.0 || !variance.is_finite() {
        return Err(SurveyError::statistics(
            "Mann-Whitney U is undefined when every observation is tied",
        ));
    }

    let z = (u - mean - 0.5) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| SurveyError::statistics(format!("Normal distribution: {e}")))?;
    Ok(2.0 * normal.sf(z))
}
