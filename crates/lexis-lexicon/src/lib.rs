//! Phonetic dictionary lookup and text segmentation for the Lexis project.
//!
//! This crate provides the two text-level collaborators the feature
//! extraction pipeline depends on:
//!
//! - **Pronouncing dictionary** ([`dictionary`]): maps words to candidate
//!   pronunciations (sequences of phonemes) and classifies words as
//!   polysyllabic by counting stress-marked vowel phonemes.
//! - **Segmentation** ([`segment`]): sentence boundary detection behind the
//!   [`segment::SentenceSegmenter`] trait, plus word tokenization used for
//!   lexical diversity.
//!
//! # Examples
//!
//! ## Looking up pronunciations
//!
//! ```
//! use lexis_lexicon::dictionary::PronouncingDictionary;
//!
//! let dict = PronouncingDictionary::parse("beautiful  B Y UW1 T AH0 F AH0 L\n");
//! assert!(dict.is_polysyllabic("beautiful"));
//! assert!(!dict.is_polysyllabic("unknown-word"));
//! ```
//!
//! ## Counting sentences
//!
//! ```
//! use lexis_lexicon::segment::{SentenceSegmenter, UnicodeSegmenter};
//!
//! let segmenter = UnicodeSegmenter;
//! assert_eq!(segmenter.sentence_count("It works. Really well."), 2);
//! assert_eq!(segmenter.sentence_count(""), 0);
//! ```

pub mod dictionary;
pub mod segment;
