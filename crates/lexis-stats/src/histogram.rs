use std::ops::Range;

use crate::descriptive::compute_percentile;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range into bins and counts the frequency of
/// values falling into each bin. The main range uses percentile-based
/// clipping (P5–P95) to keep outliers from flattening the visible
/// distribution, with dedicated underflow/overflow bins capturing the tails.
///
/// Explicit bounds let callers bin several datasets over one shared range,
/// which is what distribution overlays need to be comparable across groups.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram. May include underflow and overflow
    /// bins at the start and end to capture values outside the main range.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// Non-finite values are dropped. When `explicit_min`/`explicit_max` are
    /// given they override the percentile-derived bounds, so several groups
    /// can share one binning.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lexis_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 5, None, None);
    /// assert!(!histogram.bins.is_empty());
    /// let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
    /// assert_eq!(total, 10);
    /// ```
    #[must_use]
    pub fn new<I>(
        values: I,
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins, explicit_min, explicit_max)
    }

    /// Creates a histogram from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        if sorted_values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        // Hard bounds: actual data range. Soft bounds: P5–P95, constraining
        // the main bins to the central distribution.
        let hard_min = *sorted_values.first().unwrap();
        let hard_max = *sorted_values.last().unwrap();
        let soft_min = explicit_min.unwrap_or_else(|| compute_percentile(sorted_values, 5.0));
        let soft_max = explicit_max.unwrap_or_else(|| compute_percentile(sorted_values, 95.0));

        let mut range = soft_max - soft_min;
        if range < f64::EPSILON {
            // Distribution concentrated at a single value.
            range = 1.0;
        }
        let bin_width = range / num_bins as f64;

        // Strict comparison keeps a value sitting exactly on the upper bound
        // inside the last main bin, so datasets binned over shared explicit
        // bounds produce the same bin layout.
        let has_underflow = hard_min < soft_min;
        let has_overflow = hard_max > soft_min + range;

        let mut bins = vec![];
        if has_underflow {
            bins.push(HistogramBin {
                range: hard_min..soft_min,
                count: 0,
            });
        }
        for bin_idx in 0..num_bins {
            let bin_start = soft_min + bin_idx as f64 * bin_width;
            let bin_end = soft_min + (bin_idx + 1) as f64 * bin_width;
            bins.push(HistogramBin {
                range: bin_start..bin_end,
                count: 0,
            });
        }
        if has_overflow {
            bins.push(HistogramBin {
                range: soft_min + range..hard_max,
                count: 0,
            });
        }

        for &val in sorted_values {
            let normalized_position = (val - soft_min) / bin_width;
            let idx = if normalized_position < 0.0 {
                0
            } else if normalized_position >= num_bins as f64 {
                if has_overflow {
                    num_bins + usize::from(has_underflow)
                } else {
                    // Value sits exactly on the upper bound of the last bin.
                    num_bins - 1 + usize::from(has_underflow)
                }
            } else {
                (normalized_position.floor() as usize) + usize::from(has_underflow)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Largest bin count, for scaling rendered bars.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::new([], 5, None, None);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_all_values_counted() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let histogram = Histogram::new(values, 4, None, None);
        let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_nan_values_dropped() {
        let values = [1.0, f64::NAN, 3.0];
        let histogram = Histogram::new(values, 2, None, None);
        let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_shared_explicit_bounds() {
        let group_a = [1.0, 2.0, 3.0];
        let group_b = [7.0, 8.0, 9.0];
        let hist_a = Histogram::new(group_a, 4, Some(0.0), Some(10.0));
        let hist_b = Histogram::new(group_b, 4, Some(0.0), Some(10.0));
        // Same bounds and bin count produce directly comparable main bins.
        assert_eq!(hist_a.bins.len(), hist_b.bins.len());
        for (a, b) in hist_a.bins.iter().zip(&hist_b.bins) {
            assert_eq!(a.range.start, b.range.start);
        }
    }

    #[test]
    fn test_single_value_distribution() {
        let histogram = Histogram::new([4.0, 4.0, 4.0], 3, None, None);
        let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_max_count() {
        let histogram = Histogram::new([1.0, 1.0, 1.0, 9.0], 2, Some(0.0), Some(10.0));
        assert_eq!(histogram.max_count(), 3);
    }
}
