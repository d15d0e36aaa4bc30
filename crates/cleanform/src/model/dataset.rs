//! The immutable dataset value.

use serde::{Deserialize, Serialize};

use crate::error::{CleanformError, Result};

use super::cell::CellValue;

/// One row of cells. Its length matches the owning dataset's column count.
pub type Row = Vec<CellValue>;

/// A table of named columns and typed rows.
///
/// Datasets are never mutated once built. Applying rules or re-reading the
/// header produces a new dataset; prior snapshots stay valid for undo.
/// Column names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset. Callers must keep every row as wide as `columns`.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Fail with [`CleanformError::ColumnOutOfRange`] unless `column` exists.
    pub fn check_column(&self, column: usize) -> Result<()> {
        if column < self.columns.len() {
            Ok(())
        } else {
            Err(CleanformError::ColumnOutOfRange {
                column,
                columns: self.columns.len(),
            })
        }
    }
}
