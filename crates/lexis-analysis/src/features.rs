//! Per-row derived feature computation
//!
//! Each text sample yields a fixed set of named scalar features, computed
//! from the raw response text plus externally supplied lexical-category
//! counts. Every feature is deterministic given its inputs; no state is
//! carried between rows.
//!
//! # Edge-Case Policy
//!
//! Division by zero in `abstraction` yields NaN (IEEE semantics) and
//! `reading_difficulty` is NaN exactly when the sentence count is zero.
//! Neither is an error; the ranking step filters NaN statistics out later.
//! Text with zero word tokens has a lexical diversity of exactly 1.0 — an
//! explicit policy choice, not a numeric accident.

use std::collections::HashSet;

use lexis_lexicon::{
    dictionary::PronouncingDictionary,
    segment::{self, SentenceSegmenter},
};

/// Derived feature column names, in the order they are appended to a sheet.
pub mod names {
    pub const SENTENCE_COUNT: &str = "sentence_count";
    pub const ABSTRACTION: &str = "abstraction";
    pub const POLYSYLLABLE_COUNT: &str = "polysyllable_count";
    pub const UNIQUE_WORDS: &str = "unique_words_cnt";
    pub const UNNORMALIZED_UNIQUE_WORDS: &str = "unnormalized_unique_words";
    pub const LEXICAL_DIVERSITY: &str = "lexical_diversity";
    pub const READING_DIFFICULTY: &str = "reading_difficulty";
    pub const ANALYTICAL: &str = "analytical";
    pub const SELF_REFERENCES: &str = "self_references";
    pub const CERTAINTY: &str = "certainty";
    pub const EMOTIONALITY: &str = "emotionality";
    pub const HEDGES: &str = "hedges";
}

/// The derived features compared between groups by default.
pub const DEFAULT_COMPARISON_FEATURES: &[&str] = &[
    names::SENTENCE_COUNT,
    names::ABSTRACTION,
    names::POLYSYLLABLE_COUNT,
    names::LEXICAL_DIVERSITY,
    names::READING_DIFFICULTY,
    names::ANALYTICAL,
    names::SELF_REFERENCES,
    names::CERTAINTY,
    names::EMOTIONALITY,
    names::HEDGES,
];

/// Alias priority lists for the externally supplied columns.
///
/// Source sheets vary the casing of LIWC column names; each logical field
/// declares the acceptable spellings in priority order (first match wins).
pub mod aliases {
    pub const RESPONSE: &[&str] = &["response", "Response", "text"];
    pub const DESCRIPTIVE_ACTION: &[&str] = &["DAV", "dav"];
    pub const INDIRECT_ACTION: &[&str] = &["IAV", "iav"];
    pub const STATIVE: &[&str] = &["SV", "sv"];
    pub const ADJECTIVE: &[&str] = &["adj", "Adj"];
    pub const ANALYTIC: &[&str] = &["analytic", "Analytic"];
    pub const IMPERSONAL_PRONOUN: &[&str] = &["ipron", "Ipron"];
    pub const CERTITUDE: &[&str] = &["certitude", "Certitude"];
    pub const EMOTION: &[&str] = &["emotion", "Emotion"];
    pub const HEDGE: &[&str] = &["hedge", "Hedge"];
    pub const UNIQUE_WORDS: &[&str] = &["unique_words_cnt"];
}

/// Externally supplied lexical-category counts for one sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalCategories {
    /// Descriptive action verb count (`DAV`).
    pub descriptive_action: f64,
    /// Indirect action verb count (`IAV`).
    pub indirect_action: f64,
    /// Stative verb count (`SV`).
    pub stative: f64,
    /// Adjective count (`adj`).
    pub adjective: f64,
    /// Analytic-style score (`Analytic`).
    pub analytic: f64,
    /// Impersonal pronoun count (`ipron`).
    pub impersonal_pronoun: f64,
    /// Certainty marker count (`certitude`).
    pub certitude: f64,
    /// Emotion marker count (`emotion`).
    pub emotion: f64,
    /// Hedge marker count (`Hedge`).
    pub hedge: f64,
}

/// Derived features for one text sample.
#[derive(Debug, Clone, Copy)]
pub struct DerivedFeatures {
    /// Number of sentences in the raw text; zero only for wordless text.
    pub sentence_count: usize,
    /// Weighted verb-category abstraction score; NaN when all four
    /// contributing counts are zero.
    pub abstraction: f64,
    /// Words whose best pronunciation has three or more stressed vowels.
    pub polysyllable_count: usize,
    /// Unique/total token ratio of the lower-cased text; 1.0 for text with
    /// no tokens.
    pub lexical_diversity: f64,
    /// Raw unique-token count variant of lexical diversity.
    pub unnormalized_unique_words: usize,
    /// SMOG-style reading difficulty; NaN when `sentence_count` is zero.
    pub reading_difficulty: f64,
    /// Rename of the analytic-style score.
    pub analytical: f64,
    /// Rename of the impersonal pronoun count.
    pub self_references: f64,
    /// Rename of the certainty marker count.
    pub certainty: f64,
    /// Rename of the emotion marker count.
    pub emotionality: f64,
    /// Rename of the hedge marker count.
    pub hedges: f64,
}

/// Computes the derived feature set for individual text samples.
#[derive(Debug, Clone)]
pub struct FeatureExtractor<S> {
    dictionary: PronouncingDictionary,
    segmenter: S,
}

impl<S> FeatureExtractor<S>
where
    S: SentenceSegmenter,
{
    #[must_use]
    pub fn new(dictionary: PronouncingDictionary, segmenter: S) -> Self {
        Self {
            dictionary,
            segmenter,
        }
    }

    /// Derives all features for one sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_analysis::features::{FeatureExtractor, LexicalCategories};
    /// use lexis_lexicon::{dictionary::PronouncingDictionary, segment::UnicodeSegmenter};
    ///
    /// let extractor = FeatureExtractor::new(PronouncingDictionary::empty(), UnicodeSegmenter);
    /// let derived = extractor.extract("cat cat dog", &LexicalCategories::default());
    /// assert!((derived.lexical_diversity - 2.0 / 3.0).abs() < 1e-12);
    /// assert_eq!(derived.unnormalized_unique_words, 2);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn extract(&self, text: &str, categories: &LexicalCategories) -> DerivedFeatures {
        let sentence_count = self.segmenter.sentence_count(text);
        let polysyllable_count = self.polysyllable_count(text);

        let tokens = segment::words_lowercase(text);
        let total_tokens = tokens.len();
        let unique_tokens = tokens.iter().collect::<HashSet<_>>().len();
        let lexical_diversity = if total_tokens == 0 {
            1.0
        } else {
            unique_tokens as f64 / total_tokens as f64
        };

        DerivedFeatures {
            sentence_count,
            abstraction: abstraction(categories),
            polysyllable_count,
            lexical_diversity,
            unnormalized_unique_words: unique_tokens,
            reading_difficulty: reading_difficulty(polysyllable_count, sentence_count),
            analytical: categories.analytic,
            self_references: categories.impersonal_pronoun,
            certainty: categories.certitude,
            emotionality: categories.emotion,
            hedges: categories.hedge,
        }
    }

    /// Number of polysyllabic word tokens in the text.
    ///
    /// Tokens keep their original casing: the dictionary lookup is
    /// case-sensitive, and a miss simply contributes zero syllables.
    #[must_use]
    pub fn polysyllable_count(&self, text: &str) -> usize {
        segment::words(text)
            .into_iter()
            .filter(|word| self.dictionary.is_polysyllabic(word))
            .count()
    }
}

/// Weighted average of the four verb/adjective category counts with weights
/// 1/2/3/4, normalized by their plain sum.
///
/// NaN (0/0) when all four counts are zero.
fn abstraction(categories: &LexicalCategories) -> f64 {
    let LexicalCategories {
        descriptive_action,
        indirect_action,
        stative,
        adjective,
        ..
    } = *categories;
    let weighted = descriptive_action + 2.0 * indirect_action + 3.0 * stative + 4.0 * adjective;
    weighted / (descriptive_action + indirect_action + stative + adjective)
}

/// `1.043 · sqrt(polysyllables) · 30 / sentences + 3.1291`; NaN when the
/// text has no sentences.
#[expect(clippy::cast_precision_loss)]
fn reading_difficulty(polysyllable_count: usize, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return f64::NAN;
    }
    1.043 * (polysyllable_count as f64).sqrt() * 30.0 / sentence_count as f64 + 3.1291
}
