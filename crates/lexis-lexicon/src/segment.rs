//! Sentence segmentation and word tokenization
//!
//! Sentence boundary detection sits behind the [`SentenceSegmenter`] trait so
//! the feature pipeline can be exercised against a deterministic segmenter in
//! tests. The default implementation, [`UnicodeSegmenter`], uses UAX #29
//! sentence boundaries.
//!
//! Word tokenization extracts maximal runs of word characters (letters,
//! digits, underscore), matching `\b\w+\b` semantics. Two variants exist:
//! [`words`] preserves the original casing (used for dictionary lookup, which
//! is case-sensitive) and [`words_lowercase`] lower-cases the text first
//! (used for lexical diversity).

use std::sync::OnceLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Sentence boundary detector.
///
/// Implementations must guarantee that text containing no word characters
/// (empty string, whitespace, bare punctuation) counts zero sentences.
pub trait SentenceSegmenter {
    /// Splits text into sentence spans.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Number of sentences in the text.
    fn sentence_count(&self, text: &str) -> usize {
        self.segment(text).len()
    }
}

/// UAX #29 sentence segmentation.
///
/// Segments that contain no word character (trailing whitespace runs,
/// stray punctuation) are not counted as sentences.
///
/// # Examples
///
/// ```
/// use lexis_lexicon::segment::{SentenceSegmenter, UnicodeSegmenter};
///
/// let segmenter = UnicodeSegmenter;
/// let sentences = segmenter.segment("She arrived early. He sat down.");
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(segmenter.sentence_count("..."), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds()
            .filter(|segment| segment.chars().any(char::is_alphanumeric))
            .collect()
    }
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"))
}

/// Word tokens in original casing.
///
/// # Examples
///
/// ```
/// use lexis_lexicon::segment::words;
///
/// assert_eq!(words("The cat, the Dog."), ["The", "cat", "the", "Dog"]);
/// assert!(words("!?.").is_empty());
/// ```
#[must_use]
pub fn words(text: &str) -> Vec<&str> {
    word_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Word tokens of the lower-cased text.
#[must_use]
pub fn words_lowercase(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_count_basic() {
        let segmenter = UnicodeSegmenter;
        assert_eq!(segmenter.sentence_count("One. Two. Three."), 3);
        assert_eq!(segmenter.sentence_count("No terminator"), 1);
    }

    #[test]
    fn test_sentence_count_zero_only_for_wordless_text() {
        let segmenter = UnicodeSegmenter;
        assert_eq!(segmenter.sentence_count(""), 0);
        assert_eq!(segmenter.sentence_count("   "), 0);
        assert_eq!(segmenter.sentence_count("?!... --"), 0);
        assert!(segmenter.sentence_count("x") > 0);
    }

    #[test]
    fn test_segment_spans_cover_words() {
        let segmenter = UnicodeSegmenter;
        let spans = segmenter.segment("First one here. Second one there.");
        assert_eq!(spans.len(), 2);
        assert!(spans[0].contains("First"));
        assert!(spans[1].contains("Second"));
    }

    #[test]
    fn test_words_preserve_case() {
        assert_eq!(words("Hello World"), ["Hello", "World"]);
    }

    #[test]
    fn test_words_lowercase() {
        assert_eq!(words_lowercase("Cat CAT cat!"), ["cat", "cat", "cat"]);
    }

    #[test]
    fn test_words_split_on_punctuation_and_digits_kept() {
        assert_eq!(words("it's 2-fold"), ["it", "s", "2", "fold"]);
    }
}
