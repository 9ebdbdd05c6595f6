//! Plotting collaborator interface
//!
//! The comparison pipeline hands fully prepared, render-agnostic chart data
//! to a [`FeaturePlotter`] implementation: per-feature distribution overlays
//! for the significant features, and a ranked bar chart of a statistic map.
//! Rendering itself (text, image, whatever) lives with the implementation,
//! outside this crate.
//!
//! Group styling is an explicit configuration table ([`PlotConfig`]) passed
//! in by the caller — there is no process-wide group-to-color mapping.

use std::io;

use lexis_stats::histogram::Histogram;

use crate::group::GroupTable;

/// Display style for one group.
#[derive(Debug, Clone)]
pub struct GroupStyle {
    /// Group label as it appears in the label column.
    pub label: String,
    /// Color name or code, interpreted by the renderer.
    pub color: String,
}

/// Explicit plotting configuration.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Per-group styles, first entry styling the positive bar direction.
    pub styles: Vec<GroupStyle>,
    /// Features with a p-value at or above this threshold are not plotted.
    pub significance_threshold: f64,
    /// Number of main histogram bins per distribution overlay.
    pub num_bins: usize,
}

impl PlotConfig {
    /// Style for a group label; falls back to an unstyled gray entry.
    #[must_use]
    pub fn style_for(&self, label: &str) -> GroupStyle {
        self.styles
            .iter()
            .find(|style| style.label == label)
            .cloned()
            .unwrap_or_else(|| GroupStyle {
                label: label.to_owned(),
                color: "gray".to_owned(),
            })
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            styles: vec![],
            significance_threshold: 0.05,
            num_bins: 20,
        }
    }
}

/// One group's binned distribution within an overlay.
#[derive(Debug, Clone)]
pub struct GroupSeries {
    pub label: String,
    pub color: String,
    pub histogram: Histogram,
}

/// Distribution overlay for one feature: each group's histogram binned over
/// one shared value range so the shapes are directly comparable.
#[derive(Debug, Clone)]
pub struct DistributionOverlay {
    pub feature: String,
    pub p_value: f64,
    pub series: Vec<GroupSeries>,
}

impl DistributionOverlay {
    /// Builds the overlay for one feature across the given groups.
    ///
    /// Returns `None` when no group has a finite value for the feature
    /// (nothing to bin).
    #[must_use]
    pub fn build(
        feature: &str,
        p_value: f64,
        groups: &[&GroupTable],
        config: &PlotConfig,
    ) -> Option<Self> {
        let finite = |values: &[f64]| {
            values
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect::<Vec<_>>()
        };
        let all_values = groups
            .iter()
            .filter_map(|group| group.column(feature))
            .flat_map(|values| finite(values))
            .collect::<Vec<_>>();
        let min = all_values.iter().copied().min_by(f64::total_cmp)?;
        let max = all_values.iter().copied().max_by(f64::total_cmp)?;

        let series = groups
            .iter()
            .filter_map(|group| {
                let values = group.column(feature)?;
                let style = config.style_for(&group.label);
                Some(GroupSeries {
                    label: group.label.clone(),
                    color: style.color,
                    histogram: Histogram::new(
                        values.iter().copied(),
                        config.num_bins,
                        Some(min),
                        Some(max),
                    ),
                })
            })
            .collect::<Vec<_>>();
        (!series.is_empty()).then_some(Self {
            feature: feature.to_owned(),
            p_value,
            series,
        })
    }
}

/// Overlays for every feature significant under the configured threshold.
///
/// `pvalues` is an ascending statistic map (see
/// [`crate::compare::paired_significance`]); the overlay order follows it.
#[must_use]
pub fn significant_overlays(
    groups: &[&GroupTable],
    pvalues: &[(String, f64)],
    config: &PlotConfig,
) -> Vec<DistributionOverlay> {
    pvalues
        .iter()
        .filter(|(_, p)| *p < config.significance_threshold)
        .filter_map(|(feature, p)| DistributionOverlay::build(feature, *p, groups, config))
        .collect()
}

/// One bar of a ranked bar chart.
#[derive(Debug, Clone)]
pub struct BarEntry {
    pub feature: String,
    pub value: f64,
    pub color: String,
}

/// A ranked bar chart of a statistic map (largest magnitude first).
#[derive(Debug, Clone)]
pub struct RankedBarChart {
    pub title: String,
    pub entries: Vec<BarEntry>,
}

impl RankedBarChart {
    /// Builds a chart from an already-ranked statistic map.
    ///
    /// Positive values take the first configured group style's color,
    /// negative values the second (a positive `group_a − group_b` statistic
    /// means the first group dominates that feature).
    #[must_use]
    pub fn from_ranked(title: &str, ranked: &[(String, f64)], config: &PlotConfig) -> Self {
        let color_for = |value: f64| {
            let index = usize::from(value <= 0.0);
            config
                .styles
                .get(index)
                .map_or_else(|| "gray".to_owned(), |style| style.color.clone())
        };
        let entries = ranked
            .iter()
            .map(|(feature, value)| BarEntry {
                feature: feature.clone(),
                value: *value,
                color: color_for(*value),
            })
            .collect();
        Self {
            title: title.to_owned(),
            entries,
        }
    }
}

/// Renderer for prepared chart data.
pub trait FeaturePlotter {
    /// Renders one distribution overlay per significant feature.
    fn plot_distributions(&mut self, overlays: &[DistributionOverlay]) -> io::Result<()>;

    /// Renders a ranked bar chart.
    fn plot_ranked_bars(&mut self, chart: &RankedBarChart) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, values: &[f64]) -> GroupTable {
        GroupTable {
            label: label.to_owned(),
            columns: vec![("x".to_owned(), values.to_vec())],
        }
    }

    fn config() -> PlotConfig {
        PlotConfig {
            styles: vec![
                GroupStyle {
                    label: "male".to_owned(),
                    color: "skyblue".to_owned(),
                },
                GroupStyle {
                    label: "female".to_owned(),
                    color: "hotpink".to_owned(),
                },
            ],
            significance_threshold: 0.05,
            num_bins: 4,
        }
    }

    #[test]
    fn test_overlay_uses_shared_bounds() {
        let a = group("male", &[1.0, 2.0, 3.0]);
        let b = group("female", &[7.0, 8.0, 9.0]);
        let overlay = DistributionOverlay::build("x", 0.01, &[&a, &b], &config()).unwrap();
        assert_eq!(overlay.series.len(), 2);
        let starts = |series: &GroupSeries| {
            series
                .histogram
                .bins
                .iter()
                .map(|bin| bin.range.start)
                .collect::<Vec<_>>()
        };
        assert_eq!(starts(&overlay.series[0]), starts(&overlay.series[1]));
    }

    #[test]
    fn test_overlay_styles_resolved_from_config() {
        let a = group("male", &[1.0, 2.0]);
        let overlay = DistributionOverlay::build("x", 0.01, &[&a], &config()).unwrap();
        assert_eq!(overlay.series[0].color, "skyblue");
    }

    #[test]
    fn test_unknown_group_falls_back_to_gray() {
        let a = group("unknown", &[1.0]);
        let overlay = DistributionOverlay::build("x", 0.01, &[&a], &config()).unwrap();
        assert_eq!(overlay.series[0].color, "gray");
    }

    #[test]
    fn test_significance_filter() {
        let a = group("male", &[1.0, 2.0]);
        let b = group("female", &[2.0, 3.0]);
        let pvalues = vec![("x".to_owned(), 0.2)];
        let overlays = significant_overlays(&[&a, &b], &pvalues, &config());
        assert!(overlays.is_empty());
    }

    #[test]
    fn test_all_nan_feature_yields_no_overlay() {
        let a = group("male", &[f64::NAN, f64::NAN]);
        assert!(DistributionOverlay::build("x", 0.01, &[&a], &config()).is_none());
    }

    #[test]
    fn test_bar_colors_by_sign() {
        let ranked = vec![("up".to_owned(), 0.4), ("down".to_owned(), -0.6)];
        let chart = RankedBarChart::from_ranked("t", &ranked, &config());
        assert_eq!(chart.entries[0].color, "skyblue");
        assert_eq!(chart.entries[1].color, "hotpink");
    }
}
