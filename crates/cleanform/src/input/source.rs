//! Raw parsed data and source metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CleanformError, Result};
use crate::model::CellValue;

/// Broad family of an input file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// CSV, TSV and other delimiter-separated text.
    Delimited,
    /// Excel or OpenDocument workbooks.
    Spreadsheet,
}

impl SourceFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "tsv" | "txt" | "psv" => Ok(SourceFormat::Delimited),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceFormat::Spreadsheet),
            "" => Err(CleanformError::UnsupportedFormat(format!(
                "'{}' has no file extension",
                path.display()
            ))),
            other => Err(CleanformError::UnsupportedFormat(format!(
                ".{} (expected csv, tsv, xlsx, xls, xlsb or ods)",
                other
            ))),
        }
    }
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, xlsx, etc.).
    pub format: String,
    /// Number of raw rows, header row included.
    pub row_count: usize,
    /// Width of the widest raw row.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Rows as they came out of the parser, before header inference.
///
/// Rows may be ragged; [`build_dataset`](super::build_dataset) squares them up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Build a raw table from string literals, mostly for tests and fixtures.
    pub fn from_strings<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|s| CellValue::Text(s.into())).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}
