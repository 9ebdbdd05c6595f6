//! Ordering statistic maps
//!
//! Statistic maps are ordered `(feature, value)` pairs; insertion order is
//! the tie-break, so both orderings here are stable sorts.

/// Ranks a statistic map by descending absolute value.
///
/// NaN entries are dropped entirely; entries with equal magnitude keep their
/// original relative order.
///
/// # Examples
///
/// ```
/// use lexis_stats::ranking::rank_by_magnitude;
///
/// let stats = vec![
///     ("a".to_owned(), 0.5),
///     ("b".to_owned(), -0.9),
///     ("c".to_owned(), f64::NAN),
///     ("d".to_owned(), 0.9),
/// ];
/// let ranked = rank_by_magnitude(stats);
/// let names: Vec<_> = ranked.iter().map(|(name, _)| name.as_str()).collect();
/// assert_eq!(names, ["b", "d", "a"]);
/// ```
#[must_use]
pub fn rank_by_magnitude(statistics: Vec<(String, f64)>) -> Vec<(String, f64)> {
    let mut ranked = statistics
        .into_iter()
        .filter(|(_, value)| !value.is_nan())
        .collect::<Vec<_>>();
    ranked.sort_by(|(_, a), (_, b)| b.abs().total_cmp(&a.abs()));
    ranked
}

/// Orders a p-value map ascending, stable on ties.
#[must_use]
pub fn sort_by_pvalue(pvalues: Vec<(String, f64)>) -> Vec<(String, f64)> {
    let mut sorted = pvalues;
    sorted.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    sorted
}
