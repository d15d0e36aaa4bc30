//! Rule kinds and the tagged rule variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::transforms;
use crate::model::CellValue;

/// The closed set of rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    TrimWhitespace,
    EmptyToNull,
    NormalizeCase,
    ParseNumber,
    ParseDate,
    /// Reserved. No detector produces it and no [`Rule`] variant carries it.
    Deduplicate,
}

impl RuleType {
    /// Prefix used when building issue ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            RuleType::TrimWhitespace => "trim_whitespace",
            RuleType::EmptyToNull => "empty_to_null",
            RuleType::NormalizeCase => "normalize_case",
            RuleType::ParseNumber => "parse_number",
            RuleType::ParseDate => "parse_date",
            RuleType::Deduplicate => "deduplicate",
        }
    }

    /// Get a human-readable label for the rule type.
    pub fn label(&self) -> &'static str {
        match self {
            RuleType::TrimWhitespace => "Trim Whitespace",
            RuleType::EmptyToNull => "Empty to Null",
            RuleType::NormalizeCase => "Normalize Case",
            RuleType::ParseNumber => "Parse Number",
            RuleType::ParseDate => "Parse Date",
            RuleType::Deduplicate => "Deduplicate",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target case for NORMALIZE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Lower,
    Upper,
    Title,
}

impl CaseMode {
    pub const ALL: [CaseMode; 3] = [CaseMode::Lower, CaseMode::Upper, CaseMode::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::Lower => "lower",
            CaseMode::Upper => "upper",
            CaseMode::Title => "title",
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fix bound to one column.
///
/// The variant selects the transform; [`Rule::apply`] dispatches on it, so
/// rules are plain data that can be compared, cloned and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    TrimWhitespace { column: usize },
    EmptyToNull { column: usize },
    NormalizeCase { column: usize, mode: CaseMode },
    ParseNumber { column: usize },
    ParseDate { column: usize },
}

impl Rule {
    pub fn rule_type(&self) -> RuleType {
        match self {
            Rule::TrimWhitespace { .. } => RuleType::TrimWhitespace,
            Rule::EmptyToNull { .. } => RuleType::EmptyToNull,
            Rule::NormalizeCase { .. } => RuleType::NormalizeCase,
            Rule::ParseNumber { .. } => RuleType::ParseNumber,
            Rule::ParseDate { .. } => RuleType::ParseDate,
        }
    }

    /// Index of the column this rule rewrites.
    pub fn column(&self) -> usize {
        match *self {
            Rule::TrimWhitespace { column }
            | Rule::EmptyToNull { column }
            | Rule::NormalizeCase { column, .. }
            | Rule::ParseNumber { column }
            | Rule::ParseDate { column } => column,
        }
    }

    /// Stable id derived from the rule kind and column, never from row content.
    pub fn id(&self) -> String {
        match self {
            Rule::NormalizeCase { column, mode } => {
                format!("normalize_case_{}_col_{}", mode, column)
            }
            _ => format!("{}_col_{}", self.rule_type().id_prefix(), self.column()),
        }
    }

    /// Human-readable description of the fix.
    pub fn description(&self) -> String {
        match self {
            Rule::TrimWhitespace { .. } => {
                "Values contain leading or trailing whitespace".to_string()
            }
            Rule::EmptyToNull { .. } => {
                "Empty-like values (empty, N/A, null) can be converted to null".to_string()
            }
            Rule::NormalizeCase { mode, .. } => format!("Normalize text to {} case", mode),
            Rule::ParseNumber { .. } => "Numeric strings can be converted to numbers".to_string(),
            Rule::ParseDate { .. } => "Date strings can be converted to ISO dates".to_string(),
        }
    }

    /// Compute the fixed value for one cell. Total and side-effect free.
    pub fn apply(&self, value: &CellValue) -> CellValue {
        match *self {
            Rule::TrimWhitespace { .. } => transforms::trim(value),
            Rule::EmptyToNull { .. } => transforms::empty_to_null(value),
            Rule::NormalizeCase { mode, .. } => transforms::change_case(value, mode),
            Rule::ParseNumber { .. } => transforms::parse_number(value),
            Rule::ParseDate { .. } => transforms::parse_date(value),
        }
    }
}
