//! Group partitioning
//!
//! Splits a processed feature table into two groups by a categorical label
//! column, restricted to a caller-specified feature-column set. Requested
//! columns absent from the table are dropped and reported — never silently
//! assumed zero — so downstream comparison only ever touches columns that
//! actually exist.

use derive_more::{Display, Error};
use tracing::warn;

use crate::table::FeatureTable;

/// One group's feature columns, cast to floats, in source row order.
#[derive(Debug, Clone)]
pub struct GroupTable {
    /// The group label this table was selected by.
    pub label: String,
    /// Retained feature columns, in requested order.
    pub columns: Vec<(String, Vec<f64>)>,
}

impl GroupTable {
    /// Values of one feature column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Number of rows in the group.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    /// Names of the retained feature columns.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}

/// Result of splitting a table into two groups.
#[derive(Debug)]
pub struct GroupSplit {
    pub group_a: GroupTable,
    pub group_b: GroupTable,
    /// Requested feature columns that were absent from the source table.
    pub missing_columns: Vec<String>,
}

#[derive(Debug, Display, Error)]
pub enum GroupError {
    #[display("Table '{table}': label column '{column}' not found")]
    MissingLabelColumn { table: String, column: String },
}

/// Splits `table` into two groups by the value of `label_column`.
///
/// `requested_columns` is filtered down to the columns actually present;
/// the set difference is reported in the result (and logged with the table
/// name), not raised. Retained columns are cast to floats. Both group
/// tables preserve the source row order restricted to their label.
///
/// # Examples
///
/// ```
/// use lexis_analysis::{group::split_groups, table::{Cell, FeatureTable}};
///
/// let mut table = FeatureTable::new();
/// table.push_column("gender", vec![
///     Cell::Text("male".to_owned()),
///     Cell::Text("female".to_owned()),
/// ]).unwrap();
/// table.push_column("hedges", vec![Cell::Number(1.0), Cell::Number(2.0)]).unwrap();
///
/// let split = split_groups(
///     &table,
///     "gender",
///     ("male", "female"),
///     &["hedges".to_owned(), "absent".to_owned()],
///     "week1",
/// ).unwrap();
/// assert_eq!(split.group_a.column("hedges"), Some([1.0].as_slice()));
/// assert_eq!(split.missing_columns, ["absent"]);
/// ```
pub fn split_groups(
    table: &FeatureTable,
    label_column: &str,
    (label_a, label_b): (&str, &str),
    requested_columns: &[String],
    table_name: &str,
) -> Result<GroupSplit, GroupError> {
    let labels = table
        .column(label_column)
        .ok_or_else(|| GroupError::MissingLabelColumn {
            table: table_name.to_owned(),
            column: label_column.to_owned(),
        })?;

    let (retained, missing_columns): (Vec<_>, Vec<_>) = requested_columns
        .iter()
        .cloned()
        .partition(|column| table.has_column(column));
    if !missing_columns.is_empty() {
        warn!("table '{table_name}': requested columns not present, dropped: {missing_columns:?}");
    }

    let rows_for = |label: &str| {
        labels
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_text() == Some(label))
            .map(|(row, _)| row)
            .collect::<Vec<_>>()
    };

    let extract = |label: &str| {
        let rows = rows_for(label);
        let columns = retained
            .iter()
            .map(|column| {
                let values = table
                    .numeric_column(column)
                    .expect("retained column exists");
                let selected = rows.iter().map(|&row| values[row]).collect();
                (column.clone(), selected)
            })
            .collect();
        GroupTable {
            label: label.to_owned(),
            columns,
        }
    };

    Ok(GroupSplit {
        group_a: extract(label_a),
        group_b: extract(label_b),
        missing_columns,
    })
}

#[cfg(test)]
mod tests {
    use crate::table::Cell;

    use super::*;

    fn sample_table() -> FeatureTable {
        let mut table = FeatureTable::new();
        table
            .push_column(
                "gender",
                ["male", "female", "male", "female"]
                    .iter()
                    .map(|s| Cell::Text((*s).to_owned()))
                    .collect(),
            )
            .unwrap();
        table
            .push_numeric_column("certainty", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        table
            .push_numeric_column("hedges", vec![5.0, 6.0, 7.0, 8.0])
            .unwrap();
        table
    }

    fn requested(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_split_preserves_row_order() {
        let split = split_groups(
            &sample_table(),
            "gender",
            ("male", "female"),
            &requested(&["certainty", "hedges"]),
            "t",
        )
        .unwrap();
        assert_eq!(split.group_a.column("certainty"), Some([1.0, 3.0].as_slice()));
        assert_eq!(split.group_b.column("certainty"), Some([2.0, 4.0].as_slice()));
        assert_eq!(split.group_b.column("hedges"), Some([6.0, 8.0].as_slice()));
    }

    #[test]
    fn test_missing_columns_reported_and_excluded() {
        let split = split_groups(
            &sample_table(),
            "gender",
            ("male", "female"),
            &requested(&["certainty", "nope"]),
            "t",
        )
        .unwrap();
        assert_eq!(split.missing_columns, ["nope"]);
        assert!(split.group_a.column("nope").is_none());
        assert!(split.group_b.column("nope").is_none());
    }

    #[test]
    fn test_missing_label_column_is_error() {
        let err = split_groups(
            &sample_table(),
            "missing_label",
            ("male", "female"),
            &requested(&["certainty"]),
            "week2",
        )
        .unwrap_err();
        assert!(err.to_string().contains("week2"));
    }

    #[test]
    fn test_unmatched_label_yields_empty_group() {
        let split = split_groups(
            &sample_table(),
            "gender",
            ("male", "other"),
            &requested(&["certainty"]),
            "t",
        )
        .unwrap();
        assert_eq!(split.group_b.row_count(), 0);
    }

    #[test]
    fn test_groups_are_disjoint_and_cover_labels() {
        let split = split_groups(
            &sample_table(),
            "gender",
            ("male", "female"),
            &requested(&["certainty"]),
            "t",
        )
        .unwrap();
        assert_eq!(
            split.group_a.row_count() + split.group_b.row_count(),
            sample_table().row_count()
        );
    }
}
