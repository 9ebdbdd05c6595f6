/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency, dispersion,
/// and spread for a dataset of `f64` values. Variance and standard deviation
/// use the sample (n−1) definition, since every downstream consumer (Cohen's
/// d, range normalization) is defined over sample estimates.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    pub median: f64,
    /// The sample (n−1) variance of the dataset; 0 for a single value.
    pub variance: f64,
    /// The sample standard deviation of the dataset.
    pub std_dev: f64,
    /// The number of values in the dataset.
    pub count: usize,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Non-finite values are dropped before computing, so a dataset
    /// containing NaN cells still summarizes its finite part.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one finite value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use lexis_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().copied().sum::<f64>() / n;
        let median = sorted_values[count / 2];
        let variance = if count < 2 {
            0.0
        } else {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        };
        let std_dev = variance.sqrt();

        Some(Self {
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
            count,
        })
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses the nearest-rank method: for a dataset with n values, the k-th
/// percentile is the value at position `floor(n * k / 100)`, clamped to the
/// last index.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0)
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use lexis_stats::descriptive::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 100.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let idx = ((sorted_values.len() as f64 * percentile) / 100.0) as usize;
    let idx = idx.min(sorted_values.len() - 1);
    sorted_values[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert!(DescriptiveStats::new([]).is_none());
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([7.0]).unwrap();
        assert_eq!(stats.min, 7.0);
        assert_eq!(stats.max, 7.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn test_sample_variance() {
        // Sample variance of [2, 4, 6] is ((2-4)^2 + 0 + (6-4)^2) / 2 = 4
        let stats = DescriptiveStats::new([2.0, 4.0, 6.0]).unwrap();
        assert!((stats.variance - 4.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_values_dropped() {
        let stats = DescriptiveStats::new([1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
    }

    #[test]
    fn test_all_nan_is_empty() {
        assert!(DescriptiveStats::new([f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_percentile_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }
}
