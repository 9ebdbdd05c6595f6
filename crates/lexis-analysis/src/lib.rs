//! Linguistic feature derivation and group comparison for LIWC-style data
//!
//! This crate turns tables of raw text responses plus externally supplied
//! lexical-category counts into derived linguistic features, then compares
//! the feature distributions of two groups of authors.
//!
//! # Overview
//!
//! The analysis pipeline has two halves:
//!
//! ## Feature Derivation Workflow
//!
//! 1. **Load a table** ([`table::FeatureTable`]): one sheet of samples,
//!    columns keyed by name
//! 2. **Derive features** ([`features::FeatureExtractor`]): per-row scalar
//!    features (sentence count, abstraction, polysyllables, lexical
//!    diversity, reading difficulty, category renames)
//! 3. **Process sheets** ([`sheet::SheetProcessor`]): apply the extractor to
//!    every row, appending derived columns; failed sheets are reported, not
//!    fatal
//!
//! ## Comparison Workflow
//!
//! 1. **Split groups** ([`group::split_groups`]): partition a processed
//!    table by a categorical label, restricted to the requested feature
//!    columns
//! 2. **Compare** ([`compare`]): per-feature Wilcoxon signed-rank p-values,
//!    Cohen's d effect sizes, and normalized mean differences
//! 3. **Plot** ([`plot`]): distribution overlays and ranked bar charts,
//!    rendered by a [`plot::FeaturePlotter`] implementation
//!
//! # Examples
//!
//! ## Deriving features for one row
//!
//! ```
//! use lexis_analysis::features::{FeatureExtractor, LexicalCategories};
//! use lexis_lexicon::{dictionary::PronouncingDictionary, segment::UnicodeSegmenter};
//!
//! let extractor = FeatureExtractor::new(PronouncingDictionary::empty(), UnicodeSegmenter);
//! let categories = LexicalCategories {
//!     descriptive_action: 1.0,
//!     indirect_action: 0.0,
//!     stative: 0.0,
//!     adjective: 0.0,
//!     ..LexicalCategories::default()
//! };
//! let derived = extractor.extract("One sentence. Another one.", &categories);
//! assert_eq!(derived.sentence_count, 2);
//! assert_eq!(derived.abstraction, 1.0);
//! ```

pub mod compare;
pub mod features;
pub mod group;
pub mod plot;
pub mod sheet;
pub mod table;
