//! Header inference and dataset construction from raw rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::source::RawTable;
use crate::model::{CellValue, Dataset, Row};

/// Share of non-empty cells that must be non-numeric text for a header.
const HEADER_STRING_RATIO: f64 = 0.6;

/// Share of cells that must be pairwise distinct for a header.
const HEADER_UNIQUE_RATIO: f64 = 0.9;

/// How to treat the first raw row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Decide with [`detect_header_row`].
    #[default]
    Auto,
    /// The first row holds column names.
    Present,
    /// Every row is data; column names are synthesized.
    Absent,
}

impl HeaderMode {
    /// Whether the first row of `raw` should become column names.
    pub fn resolve(self, raw: &RawTable) -> bool {
        match self {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Auto => match raw.rows.first() {
                Some(first) => detect_header_row(first, raw.rows.get(1).map(Vec::as_slice)),
                None => false,
            },
        }
    }
}

impl FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(HeaderMode::Auto),
            "yes" | "true" | "present" => Ok(HeaderMode::Present),
            "no" | "false" | "absent" => Ok(HeaderMode::Absent),
            _ => Err(format!("Unknown header mode: {}. Use auto, yes, or no.", s)),
        }
    }
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderMode::Auto => write!(f, "auto"),
            HeaderMode::Present => write!(f, "yes"),
            HeaderMode::Absent => write!(f, "no"),
        }
    }
}

/// Whether a cell reads as a number. Nulls are neither numeric nor text.
fn is_numeric_like(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Null => None,
        CellValue::Number(_) => Some(true),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            Some(trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(f64::is_finite))
        }
    }
}

/// Classify `row` as a header row.
///
/// A header needs all three of: more than 60% of its non-empty cells are
/// non-numeric text, more than 90% of its cells are distinct, and a following
/// row with at least one aligned cell whose numeric-ness differs.
pub fn detect_header_row(row: &[CellValue], next: Option<&[CellValue]>) -> bool {
    if row.is_empty() {
        return false;
    }

    let mut non_empty = 0usize;
    let mut string_count = 0usize;
    for cell in row {
        let blank = match cell {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        };
        if blank {
            continue;
        }
        non_empty += 1;
        if is_numeric_like(cell) == Some(false) {
            string_count += 1;
        }
    }

    if non_empty == 0 {
        return false;
    }
    let mostly_strings = string_count as f64 / non_empty as f64 > HEADER_STRING_RATIO;

    let mut distinct: Vec<&CellValue> = Vec::with_capacity(row.len());
    for cell in row {
        if !distinct.contains(&cell) {
            distinct.push(cell);
        }
    }
    let mostly_unique = distinct.len() as f64 / row.len() as f64 > HEADER_UNIQUE_RATIO;

    let type_differs = next.is_some_and(|next| {
        row.iter().zip(next).any(|(a, b)| match (is_numeric_like(a), is_numeric_like(b)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        })
    });

    mostly_strings && mostly_unique && type_differs
}

/// Name used for columns without a usable header cell.
fn synthesized_name(index: usize) -> String {
    format!("Column {}", index + 1)
}

/// Square a raw row up to `width` cells.
fn fit_row(row: &[CellValue], width: usize) -> Row {
    let mut fitted: Row = row.iter().take(width).cloned().collect();
    fitted.resize(width, CellValue::Null);
    fitted
}

/// Build a dataset from raw rows, splitting off a header row per `mode`.
///
/// Never fails: empty input yields an empty dataset, and a lone header row
/// yields a dataset with columns and zero rows.
pub fn build_dataset(raw: &RawTable, mode: HeaderMode) -> Dataset {
    let has_header = mode.resolve(raw);
    debug!(?mode, has_header, rows = raw.row_count(), "building dataset");

    if has_header {
        let Some((header, data)) = raw.rows.split_first() else {
            return Dataset::default();
        };
        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let name = cell.to_string();
                if name.trim().is_empty() {
                    synthesized_name(i)
                } else {
                    name
                }
            })
            .collect();
        let width = columns.len();
        let rows = data.iter().map(|r| fit_row(r, width)).collect();
        Dataset::new(columns, rows)
    } else {
        let width = raw.width();
        let columns = (0..width).map(synthesized_name).collect();
        let rows = raw.rows.iter().map(|r| fit_row(r, width)).collect();
        Dataset::new(columns, rows)
    }
}
