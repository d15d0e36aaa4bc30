//! Error types for the Cleanform library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Cleanform operations.
#[derive(Debug, Error)]
pub enum CleanformError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading a spreadsheet workbook.
    #[error("Excel error: {0}")]
    Excel(String),

    /// Error writing the spreadsheet container.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or sheet with nothing to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Input exceeded the configured row ceiling.
    #[error("Row limit exceeded: {rows} rows, limit is {limit}")]
    RowLimitExceeded { rows: usize, limit: usize },

    /// A rule targeted a column the dataset does not have.
    #[error("Column index {column} out of range (dataset has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// An issue id that is not part of the current issue set.
    #[error("Unknown issue: {0}")]
    UnknownIssue(String),
}

/// Result type alias for Cleanform operations.
pub type Result<T> = std::result::Result<T, CleanformError>;
