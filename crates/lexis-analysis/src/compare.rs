//! Feature-wise group comparison
//!
//! Computes, per feature column present in both groups, a two-sided paired
//! significance test and two effect-size statistics. Preconditions are
//! checked per feature: a feature with mismatched group sizes, all-missing
//! paired values, or degenerate variance is omitted from the result map
//! rather than aborting the whole comparison.
//!
//! Statistic maps are ordered `(feature, value)` pairs; p-values are
//! returned ascending, effect sizes in the requested feature order (rank
//! them with [`lexis_stats::ranking`]).

use serde::Serialize;

use lexis_stats::{
    effect_size::{cohens_d, normalized_mean_difference as nmd},
    ranking::sort_by_pvalue,
    wilcoxon::wilcoxon_signed_rank,
};

use crate::group::GroupTable;

/// Per-feature Wilcoxon signed-rank p-values, ordered ascending.
///
/// The two groups' values are treated as paired observations by position.
/// Features missing from either group or failing the test's preconditions
/// are omitted.
///
/// # Examples
///
/// ```
/// use lexis_analysis::{compare::paired_significance, group::GroupTable};
///
/// let group_a = GroupTable {
///     label: "male".to_owned(),
///     columns: vec![("hedges".to_owned(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])],
/// };
/// let group_b = GroupTable {
///     label: "female".to_owned(),
///     columns: vec![("hedges".to_owned(), vec![2.0, 3.0, 4.0, 5.0, 6.0, 8.0])],
/// };
/// let pvalues = paired_significance(&group_a, &group_b, &["hedges".to_owned()]);
/// assert_eq!(pvalues.len(), 1);
/// assert!(pvalues[0].1 < 0.05);
/// ```
#[must_use]
pub fn paired_significance(
    group_a: &GroupTable,
    group_b: &GroupTable,
    feature_columns: &[String],
) -> Vec<(String, f64)> {
    let pvalues = for_each_feature(group_a, group_b, feature_columns, |a, b| {
        wilcoxon_signed_rank(a, b)
    });
    sort_by_pvalue(pvalues)
}

/// Per-feature Cohen's d (pooled standard deviation), `group_a` minus
/// `group_b`, in requested feature order.
#[must_use]
pub fn effect_size(
    group_a: &GroupTable,
    group_b: &GroupTable,
    feature_columns: &[String],
) -> Vec<(String, f64)> {
    for_each_feature(group_a, group_b, feature_columns, |a, b| cohens_d(a, b))
}

/// Per-feature mean difference normalized by the combined value range, in
/// requested feature order. Zero-range features yield NaN entries, which
/// [`lexis_stats::ranking::rank_by_magnitude`] filters out.
#[must_use]
pub fn normalized_mean_difference(
    group_a: &GroupTable,
    group_b: &GroupTable,
    feature_columns: &[String],
) -> Vec<(String, f64)> {
    for_each_feature(group_a, group_b, feature_columns, |a, b| nmd(a, b))
}

fn for_each_feature(
    group_a: &GroupTable,
    group_b: &GroupTable,
    feature_columns: &[String],
    statistic: impl Fn(&[f64], &[f64]) -> Option<f64>,
) -> Vec<(String, f64)> {
    feature_columns
        .iter()
        .filter_map(|feature| {
            let a = group_a.column(feature)?;
            let b = group_b.column(feature)?;
            let value = statistic(a, b)?;
            Some((feature.clone(), value))
        })
        .collect()
}

/// All three statistic maps for one group comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// First group's label (the positive direction of the differences).
    pub group_a: String,
    /// Second group's label.
    pub group_b: String,
    /// Wilcoxon signed-rank p-values, ascending.
    pub p_values: Vec<(String, f64)>,
    /// Cohen's d per feature, requested order.
    pub effect_sizes: Vec<(String, f64)>,
    /// Normalized mean differences per feature, requested order.
    pub normalized_mean_differences: Vec<(String, f64)>,
}

impl ComparisonReport {
    /// Runs all three statistics over the features present in both groups.
    #[must_use]
    pub fn compute(
        group_a: &GroupTable,
        group_b: &GroupTable,
        feature_columns: &[String],
    ) -> Self {
        Self {
            group_a: group_a.label.clone(),
            group_b: group_b.label.clone(),
            p_values: paired_significance(group_a, group_b, feature_columns),
            effect_sizes: effect_size(group_a, group_b, feature_columns),
            normalized_mean_differences: normalized_mean_difference(
                group_a,
                group_b,
                feature_columns,
            ),
        }
    }
}
