//! Ranking helpers shared by the rank-based tests.

use itertools::Itertools;

/// 1-based ranks with ties given the mean of the ranks they span
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_ranks<T: Ord>(values: &[T]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }

    ranks
}

/// Sizes of the groups of equal values, in value order
#[must_use]
pub fn tie_sizes<T: Ord>(values: &[T]) -> Vec<usize> {
    values
        .iter()
        .sorted()
        .dedup_with_count()
        .map(|(count, _)| count)
        .collect()
}
