//! Feature table model
//!
//! A [`FeatureTable`] is an ordered collection of named columns sharing one
//! row count — the in-memory form of a single spreadsheet sheet. Columns are
//! keyed by name, unique within a table, and preserve insertion order so
//! output files keep the source layout with derived columns appended at the
//! end.
//!
//! External lexical-category columns arrive under loosely standardized,
//! case-variant names (`analytic` vs `Analytic`). Rather than ad hoc
//! fallback chains, lookups go through [`FeatureTable::resolve_alias`] with
//! a declared priority list per logical field (see
//! [`features`](crate::features) for the lists).

/// A single cell of a feature table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A missing value.
    Empty,
}

impl Cell {
    /// The cell as a float: numbers directly, numeric-looking text parsed,
    /// everything else NaN.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Cell::Number(value) => *value,
            Cell::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
            Cell::Empty => f64::NAN,
        }
    }

    /// The cell as text, or `None` for non-text cells.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Number(_) | Cell::Empty => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    cells: Vec<Cell>,
}

/// An ordered, uniquely-named collection of equal-length columns.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    columns: Vec<Column>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("Column '{name}' already exists in the table")]
    DuplicateColumn { name: String },
    #[display("Column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl FeatureTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (0 for a table with no columns).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.cells.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Whether a column with this exact name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    /// The cells of a column, or `None` when absent.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.cells.as_slice())
    }

    /// A column cast to floats via [`Cell::as_number`].
    #[must_use]
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|cells| cells.iter().map(Cell::as_number).collect())
    }

    /// Resolves the first alias that names an existing column.
    ///
    /// Alias lists are ordered by priority; the first hit wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_analysis::table::{Cell, FeatureTable};
    ///
    /// let mut table = FeatureTable::new();
    /// table.push_column("Analytic", vec![Cell::Number(52.0)]).unwrap();
    /// assert_eq!(table.resolve_alias(&["analytic", "Analytic"]), Some("Analytic"));
    /// assert_eq!(table.resolve_alias(&["hedge", "Hedge"]), None);
    /// ```
    #[must_use]
    pub fn resolve_alias(&self, aliases: &[&str]) -> Option<&str> {
        for alias in aliases {
            if let Some(column) = self.columns.iter().find(|column| column.name == *alias) {
                return Some(column.name.as_str());
            }
        }
        None
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Fails when the name is already taken or the length does not match the
    /// existing row count (a non-empty table fixes the row count).
    pub fn push_column(&mut self, name: &str, cells: Vec<Cell>) -> Result<(), TableError> {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn {
                name: name.to_owned(),
            });
        }
        if !self.columns.is_empty() && cells.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                name: name.to_owned(),
                expected: self.row_count(),
                actual: cells.len(),
            });
        }
        self.columns.push(Column {
            name: name.to_owned(),
            cells,
        });
        Ok(())
    }

    /// Appends a numeric column.
    pub fn push_numeric_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), TableError> {
        self.push_column(name, values.into_iter().map(Cell::Number).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Cell> {
        values.iter().map(|v| Cell::Number(*v)).collect()
    }

    #[test]
    fn test_column_order_preserved() {
        let mut table = FeatureTable::new();
        table.push_column("b", numbers(&[1.0])).unwrap();
        table.push_column("a", numbers(&[2.0])).unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = FeatureTable::new();
        table.push_column("x", numbers(&[1.0])).unwrap();
        let err = table.push_column("x", numbers(&[2.0])).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut table = FeatureTable::new();
        table.push_column("x", numbers(&[1.0, 2.0])).unwrap();
        let err = table.push_column("y", numbers(&[1.0])).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { .. }));
    }

    #[test]
    fn test_numeric_cast() {
        let mut table = FeatureTable::new();
        table
            .push_column(
                "mixed",
                vec![
                    Cell::Number(1.5),
                    Cell::Text("2.5".to_owned()),
                    Cell::Text("n/a".to_owned()),
                    Cell::Empty,
                ],
            )
            .unwrap();
        let values = table.numeric_column("mixed").unwrap();
        assert_eq!(values[0], 1.5);
        assert_eq!(values[1], 2.5);
        assert!(values[2].is_nan());
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_alias_priority() {
        let mut table = FeatureTable::new();
        table.push_column("analytic", numbers(&[1.0])).unwrap();
        table.push_column("Analytic", numbers(&[2.0])).unwrap();
        // Lowercase listed first wins even though both exist.
        assert_eq!(
            table.resolve_alias(&["analytic", "Analytic"]),
            Some("analytic")
        );
    }
}
