//! Effect-size statistics
//!
//! Two complementary measures of how far apart two groups sit:
//!
//! - [`cohens_d`]: the pooled-standard-deviation standardized mean
//!   difference. Zero spread in both groups means no standardized effect,
//!   so a zero pooled SD yields exactly `0.0` rather than NaN.
//! - [`normalized_mean_difference`]: the raw mean difference scaled by the
//!   combined value range of both groups. A zero range leaves the quantity
//!   undefined and yields NaN, which the ranking step filters out. The two
//!   zero-denominator policies are deliberately distinct.

use crate::descriptive::DescriptiveStats;

/// Cohen's d standardized mean difference between two groups.
///
/// `d = (mean_a − mean_b) / s_pooled` with
/// `s_pooled = sqrt(((n_a−1)·s_a² + (n_b−1)·s_b²) / (n_a + n_b − 2))`,
/// using sample (n−1) variances.
///
/// # Returns
///
/// The effect size; exactly `0.0` when the pooled standard deviation is 0.
/// `None` when either group has no finite values or the pooled variance is
/// undefined (fewer than two values overall).
///
/// # Examples
///
/// ```
/// use lexis_stats::effect_size::cohens_d;
///
/// let a = [2.0, 4.0, 6.0];
/// let b = [1.0, 3.0, 5.0];
/// let d = cohens_d(&a, &b).unwrap();
/// assert!((d - 0.5).abs() < 1e-12);
///
/// // Identical constant groups: zero spread, zero effect.
/// assert_eq!(cohens_d(&[3.0, 3.0], &[3.0, 3.0]), Some(0.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn cohens_d(group_a: &[f64], group_b: &[f64]) -> Option<f64> {
    let stats_a = DescriptiveStats::new(group_a.iter().copied())?;
    let stats_b = DescriptiveStats::new(group_b.iter().copied())?;
    let n_a = stats_a.count as f64;
    let n_b = stats_b.count as f64;
    if n_a + n_b < 3.0 {
        return None;
    }

    let pooled_variance = ((n_a - 1.0) * stats_a.variance + (n_b - 1.0) * stats_b.variance)
        / (n_a + n_b - 2.0);
    let s_pooled = pooled_variance.sqrt();
    if s_pooled == 0.0 {
        return Some(0.0);
    }
    Some((stats_a.mean - stats_b.mean) / s_pooled)
}

/// Mean difference normalized by the combined value range of both groups.
///
/// `(mean_a − mean_b) / (max(max_a, max_b) − min(min_a, min_b))`.
///
/// # Returns
///
/// The normalized difference; NaN when the combined range is zero (every
/// value in both groups identical). `None` when either group has no finite
/// values.
///
/// # Examples
///
/// ```
/// use lexis_stats::effect_size::normalized_mean_difference;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [3.0, 4.0, 5.0];
/// let diff = normalized_mean_difference(&a, &b).unwrap();
/// assert!((diff - (-0.5)).abs() < 1e-12);
///
/// // Zero combined range is undefined, not an error.
/// let flat = normalized_mean_difference(&[2.0, 2.0], &[2.0, 2.0]).unwrap();
/// assert!(flat.is_nan());
/// ```
#[must_use]
pub fn normalized_mean_difference(group_a: &[f64], group_b: &[f64]) -> Option<f64> {
    let stats_a = DescriptiveStats::new(group_a.iter().copied())?;
    let stats_b = DescriptiveStats::new(group_b.iter().copied())?;

    let range = stats_a.max.max(stats_b.max) - stats_a.min.min(stats_b.min);
    Some((stats_a.mean - stats_b.mean) / range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohens_d_sign_follows_group_order() {
        let a = [5.0, 6.0, 7.0];
        let b = [1.0, 2.0, 3.0];
        let d_ab = cohens_d(&a, &b).unwrap();
        let d_ba = cohens_d(&b, &a).unwrap();
        assert!(d_ab > 0.0);
        assert!((d_ab + d_ba).abs() < 1e-12);
    }

    #[test]
    fn test_cohens_d_identical_values_is_exactly_zero() {
        let a = [4.2, 4.2, 4.2, 4.2];
        let d = cohens_d(&a, &a).unwrap();
        assert_eq!(d, 0.0);
        assert!(!d.is_nan());
    }

    #[test]
    fn test_cohens_d_empty_group() {
        assert_eq!(cohens_d(&[], &[1.0, 2.0]), None);
    }

    #[test]
    fn test_cohens_d_pooled_formula() {
        // a: mean 4, sample var 4; b: mean 2, sample var 1
        // pooled var = (2*4 + 2*1) / 4 = 2.5
        let a = [2.0, 4.0, 6.0];
        let b = [1.0, 2.0, 3.0];
        let expected = 2.0 / 2.5_f64.sqrt();
        let d = cohens_d(&a, &b).unwrap();
        assert!((d - expected).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_difference_uses_combined_range() {
        // means 2 and 4, combined range 1..=5 = 4
        let a = [1.0, 3.0];
        let b = [3.0, 5.0];
        let diff = normalized_mean_difference(&a, &b).unwrap();
        assert!((diff - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_difference_zero_range_is_nan() {
        let diff = normalized_mean_difference(&[1.0], &[1.0]).unwrap();
        assert!(diff.is_nan());
    }
}
