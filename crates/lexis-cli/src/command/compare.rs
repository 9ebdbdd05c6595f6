use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use lexis_analysis::{
    compare::ComparisonReport,
    features::DEFAULT_COMPARISON_FEATURES,
    group::{GroupSplit, split_groups},
};
use lexis_stats::ranking::rank_by_magnitude;
use tracing::warn;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    /// Path to a processed sheet CSV (output of `lexis process`)
    pub table: PathBuf,

    /// Column holding the group label
    #[arg(long, default_value = "gender")]
    pub label_column: String,

    /// The two group labels to compare, first minus second
    #[arg(long, value_delimiter = ',', num_args = 2, default_values = ["male", "female"])]
    pub groups: Vec<String>,

    /// Feature columns to compare (default: the derived feature set)
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Write the comparison report as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let (split, features) = load_groups(
        &arg.table,
        &arg.label_column,
        &arg.groups,
        &arg.features,
    )?;
    let GroupSplit {
        group_a, group_b, ..
    } = &split;

    if group_a.row_count() != group_b.row_count() {
        warn!(
            "group sizes differ ({} vs {}); the paired significance test is skipped",
            group_a.row_count(),
            group_b.row_count()
        );
    }

    let report = ComparisonReport::compute(group_a, group_b, &features);

    println!(
        "Feature comparison: {} (n={}) vs {} (n={})",
        group_a.label,
        group_a.row_count(),
        group_b.label,
        group_b.row_count()
    );
    println!("==========================================\n");

    println!("Wilcoxon signed-rank test (two-sided, ascending p-value)");
    print_statistic_table("p-value", &report.p_values, true);
    println!();

    println!("Cohen's d ({} - {}, ranked by magnitude)", group_a.label, group_b.label);
    print_statistic_table(
        "d",
        &rank_by_magnitude(report.effect_sizes.clone()),
        false,
    );
    println!();

    println!(
        "Normalized mean differences ({} - {}, ranked by magnitude)",
        group_a.label, group_b.label
    );
    print_statistic_table(
        "diff",
        &rank_by_magnitude(report.normalized_mean_differences.clone()),
        false,
    );
    println!();
    println!("Significance: *** p<0.001, ** p<0.01, * p<0.05");

    if let Some(path) = &arg.output {
        Output::save_json(&report, Some(path.clone()))?;
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Reads a processed table and splits it into the two requested groups,
/// returning the split plus the feature set actually retained.
pub(crate) fn load_groups(
    table_path: &Path,
    label_column: &str,
    groups: &[String],
    requested_features: &[String],
) -> anyhow::Result<(GroupSplit, Vec<String>)> {
    let table_name = table_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("table")
        .to_owned();
    let table = util::read_table_csv(table_path)?;

    let requested = if requested_features.is_empty() {
        DEFAULT_COMPARISON_FEATURES
            .iter()
            .map(|name| (*name).to_owned())
            .collect::<Vec<_>>()
    } else {
        requested_features.to_vec()
    };

    anyhow::ensure!(
        groups.len() == 2,
        "exactly two group labels are required, got {:?}",
        groups
    );
    let split = split_groups(
        &table,
        label_column,
        (&groups[0], &groups[1]),
        &requested,
        &table_name,
    )
    .with_context(|| format!("Failed to split groups in {}", table_path.display()))?;

    let features = split
        .group_a
        .feature_names()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    Ok((split, features))
}

fn print_statistic_table(value_col: &str, statistics: &[(String, f64)], with_stars: bool) {
    println!("  {:<28} {:>12}", "Feature", value_col);
    println!("  {}", "-".repeat(45));
    for (feature, value) in statistics {
        if with_stars {
            println!(
                "  {feature:<28} {value:>12.6} {}",
                significance_stars(*value)
            );
        } else {
            println!("  {feature:<28} {value:>12.4}");
        }
    }
    if statistics.is_empty() {
        println!("  (no features passed the statistic's preconditions)");
    }
}

/// Significance stars for a p-value.
pub(crate) fn significance_stars(p: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else {
        ""
    }
}
