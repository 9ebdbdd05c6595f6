//! Wilcoxon signed-rank test
//!
//! Two-sided paired-sample significance test for a systematic difference
//! between two related samples, without assuming normality of the
//! differences. The p-value uses the normal approximation of the signed-rank
//! statistic with midranks for ties and a tie-corrected variance.
//!
//! Observations are paired by position. Pairs with a non-finite member are
//! skipped rather than propagated, and zero differences are dropped before
//! ranking (the classic Wilcoxon treatment). When nothing rankable remains,
//! or when the rank variance degenerates to zero, there is no test to run
//! and the result is `None`.

use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided Wilcoxon signed-rank test on paired observations.
///
/// # Arguments
///
/// * `sample_a` - First group's values, paired by position with `sample_b`
/// * `sample_b` - Second group's values
///
/// # Returns
///
/// The two-sided p-value, or `None` when the samples have mismatched
/// lengths, no usable pairs remain after dropping non-finite and zero
/// differences, or the variance of the rank statistic is zero.
///
/// # Examples
///
/// ```
/// use lexis_stats::wilcoxon::wilcoxon_signed_rank;
///
/// // A systematic shift produces a small p-value.
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let b = [2.5, 3.5, 4.5, 5.5, 6.5, 7.5, 8.5, 9.5];
/// let p = wilcoxon_signed_rank(&a, &b).unwrap();
/// assert!(p < 0.05);
///
/// // Identical samples leave no nonzero differences to rank.
/// assert_eq!(wilcoxon_signed_rank(&a, &a), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn wilcoxon_signed_rank(sample_a: &[f64], sample_b: &[f64]) -> Option<f64> {
    if sample_a.len() != sample_b.len() {
        return None;
    }

    let diffs = sample_a
        .iter()
        .zip(sample_b)
        .map(|(a, b)| a - b)
        .filter(|d| d.is_finite() && *d != 0.0)
        .collect::<Vec<_>>();
    if diffs.is_empty() {
        return None;
    }

    let n = diffs.len() as f64;
    let ranks = midranks(&diffs);

    // Sum of ranks of the positive differences.
    let w_plus = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, rank)| *rank)
        .sum::<f64>();

    let mean = n * (n + 1.0) / 4.0;
    let mut variance = n * (n + 1.0) * (2.0 * n + 1.0) / 24.0;
    variance -= tie_correction(&ranks) / 48.0;
    if variance <= 0.0 {
        return None;
    }

    let z = (w_plus - mean) / variance.sqrt();
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    let p = 2.0 * (1.0 - normal.cdf(z.abs()));
    Some(p.clamp(0.0, 1.0))
}

/// Ranks of the absolute differences, assigning tied values the mean of the
/// ranks they span (midranks).
#[expect(clippy::cast_precision_loss)]
fn midranks(diffs: &[f64]) -> Vec<f64> {
    let mut order = (0..diffs.len()).collect::<Vec<_>>();
    order.sort_by(|&i, &j| diffs[i].abs().total_cmp(&diffs[j].abs()));

    let mut ranks = vec![0.0; diffs.len()];
    let mut pos = 0;
    while pos < order.len() {
        let mut end = pos;
        while end + 1 < order.len()
            && diffs[order[end + 1]].abs() == diffs[order[pos]].abs()
        {
            end += 1;
        }
        // Positions pos..=end hold ranks pos+1..=end+1; ties share the mean.
        let rank = (pos + end + 2) as f64 / 2.0;
        for &idx in &order[pos..=end] {
            ranks[idx] = rank;
        }
        pos = end + 1;
    }
    ranks
}

/// Tie correction term `Σ (t³ − t)` over groups of tied ranks.
#[expect(clippy::cast_precision_loss)]
fn tie_correction(ranks: &[f64]) -> f64 {
    let mut sorted = ranks.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut correction = 0.0;
    let mut pos = 0;
    while pos < sorted.len() {
        let mut end = pos;
        while end + 1 < sorted.len() && sorted[end + 1] == sorted[pos] {
            end += 1;
        }
        let t = (end - pos + 1) as f64;
        correction += t.powi(3) - t;
        pos = end + 1;
    }
    correction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_p_value() {
        // diffs: -1, -1, -1, -1, -2; W+ = 0, n = 5
        // mean = 7.5, var = 13.75 - 60/48 = 12.5, z = -2.1213, p ≈ 0.0339
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 3.0, 4.0, 5.0, 7.0];
        let p = wilcoxon_signed_rank(&a, &b).unwrap();
        assert!((p - 0.0339).abs() < 0.001, "p = {p}");
    }

    #[test]
    fn test_symmetric_in_group_order() {
        let a = [1.0, 5.0, 2.0, 8.0, 3.0, 9.0];
        let b = [2.0, 4.0, 4.0, 9.0, 1.0, 12.0];
        assert_eq!(
            wilcoxon_signed_rank(&a, &b),
            wilcoxon_signed_rank(&b, &a)
        );
    }

    #[test]
    fn test_mismatched_lengths() {
        assert_eq!(wilcoxon_signed_rank(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_identical_samples_have_no_test() {
        let a = [1.0, 2.0, 3.0];
        assert_eq!(wilcoxon_signed_rank(&a, &a), None);
    }

    #[test]
    fn test_nan_pairs_skipped() {
        // The NaN pair is dropped; remaining diffs match test_known_p_value.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN];
        let b = [2.0, 3.0, 4.0, 5.0, 7.0, 1.0];
        let p = wilcoxon_signed_rank(&a, &b).unwrap();
        assert!((p - 0.0339).abs() < 0.001);
    }

    #[test]
    fn test_balanced_differences_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 1.0, 4.0, 3.0];
        let p = wilcoxon_signed_rank(&a, &b).unwrap();
        assert!(p > 0.9);
    }

    #[test]
    fn test_p_value_in_unit_interval() {
        let a = [10.0, 20.0, 30.0, 40.0, 50.0];
        let b = [11.0, 19.0, 35.0, 38.0, 55.0];
        let p = wilcoxon_signed_rank(&a, &b).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
