use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Args;
use lexis_analysis::{
    compare::{normalized_mean_difference, paired_significance},
    plot::{
        DistributionOverlay, FeaturePlotter, GroupStyle, PlotConfig, RankedBarChart,
        significant_overlays,
    },
};
use lexis_stats::ranking::rank_by_magnitude;

use crate::command::compare::{load_groups, significance_stars};

const MAX_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Args)]
pub(crate) struct PlotArg {
    /// Path to a processed sheet CSV (output of `lexis process`)
    pub table: PathBuf,

    /// Column holding the group label
    #[arg(long, default_value = "gender")]
    pub label_column: String,

    /// The two group labels to compare, first minus second
    #[arg(long, value_delimiter = ',', num_args = 2, default_values = ["male", "female"])]
    pub groups: Vec<String>,

    /// Colors for the two groups, same order as --groups
    #[arg(long, value_delimiter = ',', num_args = 2, default_values = ["skyblue", "hotpink"])]
    pub colors: Vec<String>,

    /// Feature columns to plot (default: the derived feature set)
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Only plot distributions for features with p-value below this
    #[arg(long, default_value_t = 0.05)]
    pub p_value: f64,

    /// Number of histogram bins per distribution
    #[arg(long, default_value_t = 20)]
    pub bins: usize,

    /// Directory for chart text files (default: print to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let (split, features) = load_groups(
        &arg.table,
        &arg.label_column,
        &arg.groups,
        &arg.features,
    )?;

    let config = PlotConfig {
        styles: arg
            .groups
            .iter()
            .zip(&arg.colors)
            .map(|(label, color)| GroupStyle {
                label: label.clone(),
                color: color.clone(),
            })
            .collect(),
        significance_threshold: arg.p_value,
        num_bins: arg.bins,
    };

    let groups = [&split.group_a, &split.group_b];
    let pvalues = paired_significance(&split.group_a, &split.group_b, &features);
    let overlays = significant_overlays(&groups, &pvalues, &config);

    let ranked = rank_by_magnitude(normalized_mean_difference(
        &split.group_a,
        &split.group_b,
        &features,
    ));
    let chart = RankedBarChart::from_ranked(
        &format!(
            "Normalized mean differences ({} - {})",
            split.group_a.label, split.group_b.label
        ),
        &ranked,
        &config,
    );

    match &arg.output {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

            let distributions_path = dir.join("distributions.txt");
            let mut plotter = TextPlotter::new(fs::File::create(&distributions_path)?);
            plotter.plot_distributions(&overlays)?;
            eprintln!("Wrote {}", distributions_path.display());

            let chart_path = dir.join("ranked_differences.txt");
            let mut plotter = TextPlotter::new(fs::File::create(&chart_path)?);
            plotter.plot_ranked_bars(&chart)?;
            eprintln!("Wrote {}", chart_path.display());
        }
        None => {
            let stdout = io::stdout().lock();
            let mut plotter = TextPlotter::new(stdout);
            plotter.plot_distributions(&overlays)?;
            plotter.plot_ranked_bars(&chart)?;
        }
    }

    Ok(())
}

/// Renders chart data as aligned text with `#` bars.
struct TextPlotter<W> {
    writer: W,
}

impl<W> TextPlotter<W>
where
    W: Write,
{
    fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> FeaturePlotter for TextPlotter<W>
where
    W: Write,
{
    fn plot_distributions(&mut self, overlays: &[DistributionOverlay]) -> io::Result<()> {
        if overlays.is_empty() {
            writeln!(self.writer, "No features below the significance threshold")?;
            return Ok(());
        }
        for overlay in overlays {
            writeln!(
                self.writer,
                "{} (p = {:.6} {})",
                overlay.feature,
                overlay.p_value,
                significance_stars(overlay.p_value)
            )?;
            for series in &overlay.series {
                writeln!(self.writer, "  {} [{}]", series.label, series.color)?;
                let max_count = series.histogram.max_count().max(1);
                for bin in &series.histogram.bins {
                    let width =
                        usize::try_from(bin.count * MAX_BAR_WIDTH as u64 / max_count).unwrap_or(0);
                    writeln!(
                        self.writer,
                        "    {:>10.3}..{:<10.3} | {:<5} {}",
                        bin.range.start,
                        bin.range.end,
                        bin.count,
                        "#".repeat(width)
                    )?;
                }
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn plot_ranked_bars(&mut self, chart: &RankedBarChart) -> io::Result<()> {
        writeln!(self.writer, "{}", chart.title)?;
        let max_magnitude = chart
            .entries
            .iter()
            .map(|entry| entry.value.abs())
            .fold(0.0_f64, f64::max);
        for entry in &chart.entries {
            let width = if max_magnitude > 0.0 {
                scale_width(entry.value.abs(), max_magnitude)
            } else {
                0
            };
            writeln!(
                self.writer,
                "  {:>28} | {:>8.4} | {} [{}]",
                entry.feature,
                entry.value,
                "#".repeat(width),
                entry.color
            )?;
        }
        self.writer.flush()
    }
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_width(magnitude: f64, max_magnitude: f64) -> usize {
    ((magnitude / max_magnitude) * MAX_BAR_WIDTH as f64).round() as usize
}
