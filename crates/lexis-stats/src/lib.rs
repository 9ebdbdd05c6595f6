//! Statistical analysis utilities for the Lexis project.
//!
//! This crate provides the statistical tools used to compare feature
//! distributions between two groups of text samples:
//!
//! - **Descriptive statistics**: mean, median, sample variance, standard
//!   deviation, percentiles
//! - **Wilcoxon signed-rank test**: nonparametric two-sided paired test
//! - **Effect sizes**: pooled-standard-deviation Cohen's d and normalized
//!   mean differences
//! - **Ranking**: NaN-filtering, magnitude-ordered views of statistic maps
//! - **Histograms**: percentile-clipped frequency distributions for
//!   visualizing and overlaying group distributions
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`wilcoxon`]: Paired Wilcoxon signed-rank significance testing
//! - [`effect_size`]: Standardized and normalized mean differences
//! - [`ranking`]: Ordering statistic maps by magnitude or p-value
//! - [`histogram`]: Histogram construction for distribution overlays
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use lexis_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Testing for a paired difference
//!
//! ```
//! use lexis_stats::wilcoxon::wilcoxon_signed_rank;
//!
//! let a = [1.2, 3.1, 4.0, 2.2, 5.5, 1.9];
//! let b = [2.0, 3.5, 4.1, 3.0, 6.0, 2.4];
//! let p = wilcoxon_signed_rank(&a, &b).unwrap();
//! assert!(p > 0.0 && p <= 1.0);
//! ```
//!
//! ## Ranking effect sizes
//!
//! ```
//! use lexis_stats::ranking::rank_by_magnitude;
//!
//! let stats = vec![
//!     ("hedges".to_owned(), 0.2),
//!     ("certainty".to_owned(), -0.8),
//! ];
//! let ranked = rank_by_magnitude(stats);
//! assert_eq!(ranked[0].0, "certainty");
//! ```

pub mod descriptive;
pub mod effect_size;
pub mod histogram;
pub mod ranking;
pub mod wilcoxon;
