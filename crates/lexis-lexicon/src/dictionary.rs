//! Pronouncing dictionary lookup
//!
//! This module parses a CMU-style pronouncing dictionary and answers
//! syllable-structure queries about individual words.
//!
//! # Dictionary Format
//!
//! The expected format is one entry per line, word first, phonemes after:
//!
//! ```text
//! ;;; comment lines start with three semicolons
//! abandon  AH0 B AE1 N D AH0 N
//! abandon(1)  AH0 B AE1 N D IH0 N
//! ```
//!
//! Alternate pronunciations carry a parenthesized suffix (`word(1)`,
//! `word(2)`, ...) and are folded into the same entry. Vowel phonemes end in
//! a digit marking lexical stress (`AH0`, `AE1`, ...); consonants do not.
//! Counting digit-final phonemes therefore counts syllables.
//!
//! Lookup is case-sensitive to the dictionary's own key casing. A word that
//! is not in the dictionary simply has no known pronunciation; it is treated
//! as having zero syllables rather than as an error.

use std::{collections::HashMap, fs, io, path::Path};

/// A single candidate pronunciation: an ordered sequence of phonemes.
pub type Pronunciation = Vec<String>;

/// Threshold (in stressed-vowel phonemes) above which a word counts as
/// polysyllabic.
const POLYSYLLABLE_THRESHOLD: usize = 3;

/// A pronouncing dictionary mapping words to candidate pronunciations.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl PronouncingDictionary {
    /// Creates an empty dictionary.
    ///
    /// Every lookup misses, so every word reports zero syllables. Used when
    /// no dictionary file is supplied.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a dictionary from a CMU-format file.
    pub fn load<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parses dictionary entries from CMU-format text.
    ///
    /// Lines starting with `;;;` and lines without phonemes are skipped.
    /// Alternate pronunciations (`word(1)`) are merged under the base word.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_lexicon::dictionary::PronouncingDictionary;
    ///
    /// let dict = PronouncingDictionary::parse(
    ///     ";;; header\n\
    ///      the  DH AH0\n\
    ///      the(1)  DH IY0\n",
    /// );
    /// assert_eq!(dict.pronunciations("the").map(<[_]>::len), Some(2));
    /// ```
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries: HashMap<String, Vec<Pronunciation>> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let phonemes = parts.map(str::to_owned).collect::<Vec<_>>();
            if phonemes.is_empty() {
                continue;
            }
            let word = strip_variant_suffix(word);
            entries.entry(word.to_owned()).or_default().push(phonemes);
        }
        Self { entries }
    }

    /// Number of distinct words in the dictionary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate pronunciations for a word, or `None` when the word is not
    /// in the dictionary. Case-sensitive to the dictionary's key casing.
    #[must_use]
    pub fn pronunciations(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Count of stressed-vowel phonemes in a word, maximized over its
    /// candidate pronunciations. Zero for words not in the dictionary.
    ///
    /// A phoneme counts as a stressed vowel when its final character is an
    /// ASCII digit (the CMU stress marker).
    #[must_use]
    pub fn stressed_vowel_count(&self, word: &str) -> usize {
        self.pronunciations(word)
            .into_iter()
            .flatten()
            .map(|pronunciation| {
                pronunciation
                    .iter()
                    .filter(|phoneme| phoneme.ends_with(|c: char| c.is_ascii_digit()))
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    /// Whether a word has at least one pronunciation with three or more
    /// stressed-vowel phonemes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_lexicon::dictionary::PronouncingDictionary;
    ///
    /// let dict = PronouncingDictionary::parse(
    ///     "cat  K AE1 T\n\
    ///      banana  B AH0 N AE1 N AH0\n",
    /// );
    /// assert!(!dict.is_polysyllabic("cat"));
    /// assert!(dict.is_polysyllabic("banana"));
    /// ```
    #[must_use]
    pub fn is_polysyllabic(&self, word: &str) -> bool {
        self.stressed_vowel_count(word) >= POLYSYLLABLE_THRESHOLD
    }
}

/// Strips the `(N)` alternate-pronunciation suffix from a dictionary key.
fn strip_variant_suffix(word: &str) -> &str {
    word.strip_suffix(')')
        .and_then(|rest| {
            let open = rest.rfind('(')?;
            rest[open + 1..]
                .chars()
                .all(|c| c.is_ascii_digit())
                .then(|| &rest[..open])
        })
        .unwrap_or(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
;;; comment line
cat  K AE1 T
dog  D AO1 G
banana  B AH0 N AE1 N AH0
tomato  T AH0 M EY1 T OW2
tomato(1)  T AH0 M AA1 T OW2
read  R EH1 D
read(1)  R IY1 D
";

    fn sample() -> PronouncingDictionary {
        PronouncingDictionary::parse(SAMPLE)
    }

    #[test]
    fn test_parse_merges_variants() {
        let dict = sample();
        assert_eq!(dict.len(), 5);
        assert_eq!(dict.pronunciations("tomato").map(<[_]>::len), Some(2));
        assert_eq!(dict.pronunciations("read").map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_comments_skipped() {
        let dict = PronouncingDictionary::parse(";;; only a comment\n");
        assert!(dict.is_empty());
    }

    #[test]
    fn test_missing_word_has_zero_syllables() {
        let dict = sample();
        assert_eq!(dict.pronunciations("zebra"), None);
        assert_eq!(dict.stressed_vowel_count("zebra"), 0);
        assert!(!dict.is_polysyllabic("zebra"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dict = sample();
        assert!(dict.pronunciations("cat").is_some());
        assert!(dict.pronunciations("Cat").is_none());
    }

    #[test]
    fn test_stressed_vowel_count_uses_best_pronunciation() {
        let dict = PronouncingDictionary::parse(
            "fire  F AY1 R\n\
             fire(1)  F AY1 ER0\n",
        );
        assert_eq!(dict.stressed_vowel_count("fire"), 2);
    }

    #[test]
    fn test_polysyllable_threshold() {
        let dict = sample();
        assert!(!dict.is_polysyllabic("cat")); // 1 vowel
        assert!(!dict.is_polysyllabic("read")); // 1 vowel either way
        assert!(dict.is_polysyllabic("banana")); // 3 vowels
        assert!(dict.is_polysyllabic("tomato")); // 3 vowels
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = PronouncingDictionary::empty();
        assert!(dict.is_empty());
        assert_eq!(dict.stressed_vowel_count("anything"), 0);
    }
}
