//! Sheet processing
//!
//! Applies the per-row feature extractor across a whole [`FeatureTable`],
//! appending the derived columns, and drives batch runs over many sheets.
//!
//! A sheet that cannot be processed (a required lexical-category column
//! missing under every declared alias, a malformed row) fails with a
//! [`SheetError`] labeled with the sheet name. Batch runs log the failure
//! and continue with the remaining sheets; one broken sheet must never take
//! the batch down.

use lexis_lexicon::segment::SentenceSegmenter;
use tracing::warn;

use crate::{
    features::{FeatureExtractor, LexicalCategories, aliases, names},
    table::{Cell, FeatureTable, TableError},
};

/// Sheets with this name hold prompt/source metadata, not responses, and are
/// skipped during batch processing.
pub const SOURCE_SHEET: &str = "source";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SheetError {
    #[display("Sheet '{sheet}': no column found for '{field}' (tried {aliases:?})")]
    MissingColumn {
        sheet: String,
        field: &'static str,
        aliases: &'static [&'static str],
    },
    #[display("Sheet '{sheet}': row {row} has a non-text '{column}' value")]
    MalformedRow {
        sheet: String,
        row: usize,
        column: String,
    },
    #[display("Sheet '{sheet}': {source}")]
    Column {
        sheet: String,
        source: TableError,
    },
}

impl SheetError {
    /// Name of the sheet the error occurred in.
    #[must_use]
    pub fn sheet(&self) -> &str {
        match self {
            SheetError::MissingColumn { sheet, .. }
            | SheetError::MalformedRow { sheet, .. }
            | SheetError::Column { sheet, .. } => sheet,
        }
    }
}

/// Applies a [`FeatureExtractor`] across every row of a sheet.
#[derive(Debug, Clone)]
pub struct SheetProcessor<S> {
    extractor: FeatureExtractor<S>,
}

impl<S> SheetProcessor<S>
where
    S: SentenceSegmenter,
{
    #[must_use]
    pub fn new(extractor: FeatureExtractor<S>) -> Self {
        Self { extractor }
    }

    /// Processes one sheet, appending all derived feature columns.
    ///
    /// The text column and every lexical-category column must resolve
    /// through their alias lists. An existing `unique_words_cnt` column is
    /// reused as the lexical diversity source; otherwise the computed ratio
    /// is appended under that name.
    pub fn process(&self, sheet_name: &str, table: &mut FeatureTable) -> Result<(), SheetError> {
        let text_column = resolve_required(table, sheet_name, "response", aliases::RESPONSE)?;
        let categories = CategoryColumns::resolve(table, sheet_name)?;

        let text_cells = table
            .column(&text_column)
            .expect("resolved column exists")
            .to_vec();
        let mut texts = Vec::with_capacity(text_cells.len());
        for (row, cell) in text_cells.iter().enumerate() {
            let text = match cell {
                Cell::Text(text) => text.as_str(),
                Cell::Empty => "",
                Cell::Number(_) => {
                    return Err(SheetError::MalformedRow {
                        sheet: sheet_name.to_owned(),
                        row,
                        column: text_column,
                    });
                }
            };
            texts.push(text);
        }

        let derived = texts
            .iter()
            .enumerate()
            .map(|(row, text)| self.extractor.extract(text, &categories.row(row)))
            .collect::<Vec<_>>();

        // Reuse an externally supplied unique-word count when present;
        // otherwise append the computed ratio under the same name.
        let precomputed_diversity = table
            .resolve_alias(aliases::UNIQUE_WORDS)
            .map(str::to_owned)
            .and_then(|column| table.numeric_column(&column));
        let diversity = match &precomputed_diversity {
            Some(values) => values.clone(),
            None => derived.iter().map(|d| d.lexical_diversity).collect(),
        };

        let push = |table: &mut FeatureTable, name: &str, values: Vec<f64>| {
            table
                .push_numeric_column(name, values)
                .map_err(|source| SheetError::Column {
                    sheet: sheet_name.to_owned(),
                    source,
                })
        };

        push(
            table,
            names::SENTENCE_COUNT,
            derived.iter().map(|d| to_f64(d.sentence_count)).collect(),
        )?;
        push(
            table,
            names::ABSTRACTION,
            derived.iter().map(|d| d.abstraction).collect(),
        )?;
        push(
            table,
            names::POLYSYLLABLE_COUNT,
            derived
                .iter()
                .map(|d| to_f64(d.polysyllable_count))
                .collect(),
        )?;
        if precomputed_diversity.is_none() {
            push(table, names::UNIQUE_WORDS, diversity.clone())?;
        }
        push(
            table,
            names::UNNORMALIZED_UNIQUE_WORDS,
            derived
                .iter()
                .map(|d| to_f64(d.unnormalized_unique_words))
                .collect(),
        )?;
        push(table, names::LEXICAL_DIVERSITY, diversity)?;
        push(
            table,
            names::READING_DIFFICULTY,
            derived.iter().map(|d| d.reading_difficulty).collect(),
        )?;
        push(
            table,
            names::ANALYTICAL,
            derived.iter().map(|d| d.analytical).collect(),
        )?;
        push(
            table,
            names::SELF_REFERENCES,
            derived.iter().map(|d| d.self_references).collect(),
        )?;
        push(
            table,
            names::CERTAINTY,
            derived.iter().map(|d| d.certainty).collect(),
        )?;
        push(
            table,
            names::EMOTIONALITY,
            derived.iter().map(|d| d.emotionality).collect(),
        )?;
        push(
            table,
            names::HEDGES,
            derived.iter().map(|d| d.hedges).collect(),
        )?;

        Ok(())
    }

    /// Processes a batch of named sheets.
    ///
    /// The `source` metadata sheet is skipped. A failing sheet is logged
    /// (one warning, naming the sheet) and reported in the result vector;
    /// remaining sheets still process.
    #[must_use]
    pub fn process_batch(
        &self,
        sheets: Vec<(String, FeatureTable)>,
    ) -> Vec<(String, Result<FeatureTable, SheetError>)> {
        sheets
            .into_iter()
            .filter(|(name, _)| name != SOURCE_SHEET)
            .map(|(name, mut table)| {
                let result = match self.process(&name, &mut table) {
                    Ok(()) => Ok(table),
                    Err(err) => {
                        warn!("failed to process sheet '{name}': {err}");
                        Err(err)
                    }
                };
                (name, result)
            })
            .collect()
    }
}

/// Numeric values of the externally supplied category columns, resolved
/// through their alias lists.
#[derive(Debug)]
struct CategoryColumns {
    descriptive_action: Vec<f64>,
    indirect_action: Vec<f64>,
    stative: Vec<f64>,
    adjective: Vec<f64>,
    analytic: Vec<f64>,
    impersonal_pronoun: Vec<f64>,
    certitude: Vec<f64>,
    emotion: Vec<f64>,
    hedge: Vec<f64>,
}

impl CategoryColumns {
    fn resolve(table: &FeatureTable, sheet: &str) -> Result<Self, SheetError> {
        let numeric = |field: &'static str,
                       aliases: &'static [&'static str]|
         -> Result<Vec<f64>, SheetError> {
            let column = resolve_required(table, sheet, field, aliases)?;
            Ok(table
                .numeric_column(&column)
                .expect("resolved column exists"))
        };
        Ok(Self {
            descriptive_action: numeric("DAV", aliases::DESCRIPTIVE_ACTION)?,
            indirect_action: numeric("IAV", aliases::INDIRECT_ACTION)?,
            stative: numeric("SV", aliases::STATIVE)?,
            adjective: numeric("adj", aliases::ADJECTIVE)?,
            analytic: numeric("analytic", aliases::ANALYTIC)?,
            impersonal_pronoun: numeric("ipron", aliases::IMPERSONAL_PRONOUN)?,
            certitude: numeric("certitude", aliases::CERTITUDE)?,
            emotion: numeric("emotion", aliases::EMOTION)?,
            hedge: numeric("hedge", aliases::HEDGE)?,
        })
    }

    fn row(&self, row: usize) -> LexicalCategories {
        LexicalCategories {
            descriptive_action: self.descriptive_action[row],
            indirect_action: self.indirect_action[row],
            stative: self.stative[row],
            adjective: self.adjective[row],
            analytic: self.analytic[row],
            impersonal_pronoun: self.impersonal_pronoun[row],
            certitude: self.certitude[row],
            emotion: self.emotion[row],
            hedge: self.hedge[row],
        }
    }
}

fn resolve_required(
    table: &FeatureTable,
    sheet: &str,
    field: &'static str,
    aliases: &'static [&'static str],
) -> Result<String, SheetError> {
    table
        .resolve_alias(aliases)
        .map(str::to_owned)
        .ok_or_else(|| SheetError::MissingColumn {
            sheet: sheet.to_owned(),
            field,
            aliases,
        })
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use lexis_lexicon::{dictionary::PronouncingDictionary, segment::UnicodeSegmenter};

    use super::*;

    fn processor() -> SheetProcessor<UnicodeSegmenter> {
        SheetProcessor::new(FeatureExtractor::new(
            PronouncingDictionary::parse("banana  B AH0 N AE1 N AH0\n"),
            UnicodeSegmenter,
        ))
    }

    fn category_columns(table: &mut FeatureTable, rows: usize) {
        for name in ["DAV", "IAV", "SV", "adj", "Analytic", "ipron", "certitude", "emotion", "Hedge"]
        {
            table
                .push_column(name, vec![Cell::Number(1.0); rows])
                .unwrap();
        }
    }

    fn sample_table() -> FeatureTable {
        let mut table = FeatureTable::new();
        table
            .push_column(
                "response",
                vec![
                    Cell::Text("A banana. Another banana.".to_owned()),
                    Cell::Text("cat cat dog".to_owned()),
                ],
            )
            .unwrap();
        category_columns(&mut table, 2);
        table
    }

    #[test]
    fn test_process_appends_derived_columns() {
        let mut table = sample_table();
        processor().process("models", &mut table).unwrap();

        for name in [
            names::SENTENCE_COUNT,
            names::ABSTRACTION,
            names::POLYSYLLABLE_COUNT,
            names::UNIQUE_WORDS,
            names::UNNORMALIZED_UNIQUE_WORDS,
            names::LEXICAL_DIVERSITY,
            names::READING_DIFFICULTY,
            names::ANALYTICAL,
            names::SELF_REFERENCES,
            names::CERTAINTY,
            names::EMOTIONALITY,
            names::HEDGES,
        ] {
            assert!(table.has_column(name), "missing column {name}");
        }

        let sentences = table.numeric_column(names::SENTENCE_COUNT).unwrap();
        assert_eq!(sentences, [2.0, 1.0]);
        let polysyllables = table.numeric_column(names::POLYSYLLABLE_COUNT).unwrap();
        assert_eq!(polysyllables, [2.0, 0.0]);
    }

    #[test]
    fn test_case_variant_aliases_resolve() {
        // sample_table uses "Analytic" and "Hedge"; processing must still
        // find them through the alias lists.
        let mut table = sample_table();
        processor().process("models", &mut table).unwrap();
        assert_eq!(
            table.numeric_column(names::ANALYTICAL).unwrap(),
            [1.0, 1.0]
        );
    }

    #[test]
    fn test_existing_unique_words_column_reused() {
        let mut table = FeatureTable::new();
        table
            .push_column("response", vec![Cell::Text("cat cat dog".to_owned())])
            .unwrap();
        table
            .push_column("unique_words_cnt", vec![Cell::Number(0.25)])
            .unwrap();
        category_columns(&mut table, 1);

        processor().process("models", &mut table).unwrap();
        assert_eq!(
            table.numeric_column(names::LEXICAL_DIVERSITY).unwrap(),
            [0.25]
        );
    }

    #[test]
    fn test_missing_category_column_names_sheet() {
        let mut table = FeatureTable::new();
        table
            .push_column("response", vec![Cell::Text("hi there".to_owned())])
            .unwrap();
        let err = processor().process("week1", &mut table).unwrap_err();
        assert_eq!(err.sheet(), "week1");
        assert!(matches!(err, SheetError::MissingColumn { .. }));
        assert!(err.to_string().contains("week1"));
    }

    #[test]
    fn test_numeric_response_is_malformed() {
        let mut table = FeatureTable::new();
        table
            .push_column("response", vec![Cell::Number(7.0)])
            .unwrap();
        category_columns(&mut table, 1);
        let err = processor().process("models", &mut table).unwrap_err();
        assert!(matches!(err, SheetError::MalformedRow { row: 0, .. }));
    }

    #[test]
    fn test_batch_continues_past_failed_sheet() {
        let good_a = sample_table();
        let mut bad = FeatureTable::new();
        bad.push_column("response", vec![Cell::Text("text".to_owned())])
            .unwrap();
        let good_b = sample_table();

        let results = processor().process_batch(vec![
            ("alpha".to_owned(), good_a),
            ("broken".to_owned(), bad),
            ("beta".to_owned(), good_b),
        ]);

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn test_batch_skips_source_sheet() {
        let results = processor().process_batch(vec![
            ("source".to_owned(), FeatureTable::new()),
            ("alpha".to_owned(), sample_table()),
        ]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "alpha");
    }
}
