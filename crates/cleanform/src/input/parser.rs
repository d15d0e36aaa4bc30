//! CSV/TSV and spreadsheet parsing with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::source::{RawTable, SourceFormat, SourceMetadata};
use crate::error::{CleanformError, Result};
use crate::model::CellValue;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Ceiling on the number of raw rows (header row included) accepted from a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowLimit {
    /// Accept any number of rows.
    #[default]
    Unlimited,
    /// Keep the first N rows and drop the rest.
    Truncate(usize),
    /// Fail when the file has more than N rows.
    Reject(usize),
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Row ceiling policy.
    pub row_limit: RowLimit,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            row_limit: RowLimit::Unlimited,
        }
    }
}

/// Parses tabular data files into raw rows.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the raw rows and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RawTable, SourceMetadata)> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;

        let mut file = File::open(path).map_err(|e| CleanformError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| CleanformError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (raw, format_name) = match format {
            SourceFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(strip_bom(&contents))?,
                };
                let raw = self.parse_delimited(&contents, delimiter)?;
                let name = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                };
                (raw, name.to_string())
            }
            SourceFormat::Spreadsheet => {
                let raw = self.parse_spreadsheet(&contents)?;
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                (raw, ext)
            }
        };

        debug!(
            file = %path.display(),
            format = %format_name,
            rows = raw.row_count(),
            "parsed source file"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name,
            raw.row_count(),
            raw.width(),
        );

        Ok((raw, metadata))
    }

    /// Parse in-memory bytes of a known format.
    pub fn parse_bytes(&self, bytes: &[u8], format: SourceFormat) -> Result<RawTable> {
        match format {
            SourceFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(strip_bom(bytes))?,
                };
                self.parse_delimited(bytes, delimiter)
            }
            SourceFormat::Spreadsheet => self.parse_spreadsheet(bytes),
        }
    }

    /// Parse delimiter-separated text. Every field becomes a text cell.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(strip_bom(bytes));

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            // Blank lines carry no data
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(record.iter().map(CellValue::from).collect());
        }

        if rows.is_empty() {
            return Err(CleanformError::EmptyData("No rows found".to_string()));
        }

        self.enforce_row_limit(rows)
    }

    /// Parse the first sheet of a workbook.
    fn parse_spreadsheet(&self, bytes: &[u8]) -> Result<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| CleanformError::Excel(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CleanformError::EmptyData("Workbook has no sheets".to_string()))?
            .map_err(|e| CleanformError::Excel(format!("Failed to read sheet: {}", e)))?;

        if range.is_empty() {
            return Err(CleanformError::EmptyData("Empty Excel sheet".to_string()));
        }

        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(spreadsheet_cell).collect())
            .collect();

        self.enforce_row_limit(rows)
    }

    fn enforce_row_limit(&self, mut rows: Vec<Vec<CellValue>>) -> Result<RawTable> {
        match self.config.row_limit {
            RowLimit::Unlimited => {}
            RowLimit::Truncate(limit) if rows.len() > limit => {
                warn!(rows = rows.len(), limit, "row limit reached, truncating input");
                rows.truncate(limit);
            }
            RowLimit::Reject(limit) if rows.len() > limit => {
                return Err(CleanformError::RowLimitExceeded {
                    rows: rows.len(),
                    limit,
                });
            }
            _ => {}
        }
        Ok(RawTable::new(rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a workbook cell into a cell value.
fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(CleanformError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus
        // since they rarely appear inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
