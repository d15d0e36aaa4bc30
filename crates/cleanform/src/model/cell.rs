//! Cell values.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single cell: text, a number, or nothing.
///
/// Equality is strict: `Text("5")` and `Number(5.0)` are different values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A string value, exactly as parsed (whitespace included).
    Text(String),
    /// A numeric value.
    Number(f64),
    /// An absent value.
    Null,
}

impl CellValue {
    /// Create a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Borrow the string content of a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content of a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Short name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Null => "null",
        }
    }
}

/// Integral value of `n` when it can be written without a fractional part.
fn as_integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => match as_integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            CellValue::Null => serializer.serialize_unit(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => match as_integral(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}
