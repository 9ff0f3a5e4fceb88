//! Benchmark table data model
//!
//! Column-oriented, immutable view of one measurement file: an independent
//! variable column followed by one timing column per container.

use crate::{BmkError, Result};
use serde::{Deserialize, Serialize};

/// Label of the `std::map` timing column
pub const MAP_COLUMN: &str = "map";
/// Label of the `std::unordered_map` timing column
pub const UNORDERED_MAP_COLUMN: &str = "unordered_map";
/// Label of the red-black tree timing column
pub const RBTREE_COLUMN: &str = "RedBlackTree";

/// Timing column labels in file order
pub const TIMING_COLUMNS: [&str; 3] = [MAP_COLUMN, UNORDERED_MAP_COLUMN, RBTREE_COLUMN];

/// One labeled column of numeric values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column label
    pub label: String,
    /// Values, one per row
    pub values: Vec<f64>,
}

impl Column {
    /// Create a labeled column
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Parsed benchmark measurements
///
/// The first column is the independent variable (`#nodes`, `#elements`),
/// the remaining columns hold per-lookup timings in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableColumns")]
pub struct BenchmarkTable {
    columns: Vec<Column>,
}

/// Unchecked serialized form, validated through [`BenchmarkTable::from_columns`]
#[derive(Deserialize)]
struct TableColumns {
    columns: Vec<Column>,
}

impl TryFrom<TableColumns> for BenchmarkTable {
    type Error = BmkError;

    fn try_from(raw: TableColumns) -> Result<Self> {
        Self::from_columns(raw.columns)
    }
}

impl BenchmarkTable {
    /// Build a table from rows of `(x, map, unordered_map, rbtree)`
    pub fn from_rows(x_column: &str, rows: &[[f64; 4]]) -> Self {
        let mut columns = Vec::with_capacity(4);
        columns.push(Column::new(x_column, rows.iter().map(|r| r[0]).collect()));
        for (i, label) in TIMING_COLUMNS.iter().enumerate() {
            columns.push(Column::new(
                *label,
                rows.iter().map(|r| r[i + 1]).collect(),
            ));
        }
        Self { columns }
    }

    /// Build a table from arbitrary columns, the first being the independent variable
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let first = columns.first().ok_or_else(|| {
            BmkError::RenderError("A table needs at least an independent column".to_string())
        })?;

        let rows = first.values.len();
        if let Some(bad) = columns.iter().find(|c| c.values.len() != rows) {
            return Err(BmkError::RenderError(format!(
                "Column '{}' has {} values, expected {}",
                bad.label,
                bad.values.len(),
                rows
            )));
        }

        Ok(Self { columns })
    }

    /// All columns in positional order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column labels in positional order
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// The independent variable column
    pub fn x(&self) -> &Column {
        &self.columns[0]
    }

    /// Look up a column by label
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns[0].values.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Values of one row in column order
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }

    /// Iterate rows in file order
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.row_count()).map(move |i| self.columns.iter().map(|c| c.values[i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_labels_and_shape() {
        let table = BenchmarkTable::from_rows("#nodes", &[[10.0, 5.0, 2.0, 4.0], [100.0, 50.0, 20.0, 40.0]]);
        assert_eq!(table.labels(), vec!["#nodes", "map", "unordered_map", "RedBlackTree"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.x().values, vec![10.0, 100.0]);
        assert_eq!(table.column("unordered_map").unwrap().values, vec![2.0, 20.0]);
        assert_eq!(table.row(1), Some(vec![100.0, 50.0, 20.0, 40.0]));
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = BenchmarkTable::from_columns(vec![
            Column::new("#nodes", vec![1.0, 2.0]),
            Column::new("map", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, BmkError::RenderError(_)));
    }

    #[test]
    fn test_from_columns_rejects_empty() {
        assert!(BenchmarkTable::from_columns(Vec::new()).is_err());
    }

    #[test]
    fn test_deserialize_validates_shape() {
        assert!(serde_json::from_str::<BenchmarkTable>(r#"{"columns":[]}"#).is_err());

        let ragged = r##"{"columns":[
            {"label":"#nodes","values":[1.0,2.0]},
            {"label":"map","values":[1.0]}
        ]}"##;
        assert!(serde_json::from_str::<BenchmarkTable>(ragged).is_err());

        let table = BenchmarkTable::from_rows("#nodes", &[[10.0, 5.0, 2.0, 4.0]]);
        let json = serde_json::to_string(&table).unwrap();
        let back: BenchmarkTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.row_count(), 1);
    }

    #[test]
    fn test_rows_iteration() {
        let table = BenchmarkTable::from_rows("#elements", &[[1.0, 2.0, 3.0, 4.0]]);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows, vec![vec![1.0, 2.0, 3.0, 4.0]]);
        assert!(!table.is_empty());
    }
}
