//! Writing datasets out as CSV, JSON or spreadsheet files.

mod csv;
mod json;
mod xlsx;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CleanformError, Result};
use crate::model::Dataset;

pub use self::csv::export_csv;
pub use self::json::export_json;
pub use self::xlsx::{SHEET_NAME, export_xlsx};

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for ExportFormat {
    type Err = CleanformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(CleanformError::UnsupportedFormat(format!(
                "unknown export format '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Render `dataset` in `format`.
pub fn export(dataset: &Dataset, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => Ok(export_csv(dataset).into_bytes()),
        ExportFormat::Json => Ok(export_json(dataset)?.into_bytes()),
        ExportFormat::Xlsx => export_xlsx(dataset),
    }
}
