//! NORMALIZE_CASE detection.

use std::collections::HashSet;

use super::Detector;
use crate::model::{CellValue, Dataset};
use crate::rules::{CaseMode, Issue, Rule, RuleType};

/// Flags columns whose text varies, for one target case.
///
/// A column qualifies when it holds at least two distinct non-empty trimmed
/// strings. The issue covers every text row in the column and is only
/// emitted when the mode would change at least one of them, so a column
/// already in the target case is left alone.
pub struct CaseDetector {
    mode: CaseMode,
}

impl CaseDetector {
    pub fn new(mode: CaseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CaseMode {
        self.mode
    }

    fn has_case_variance<'a>(values: impl Iterator<Item = &'a CellValue>) -> bool {
        let mut seen = HashSet::new();
        for value in values {
            let Some(s) = value.as_str() else { continue };
            let trimmed = s.trim();
            if trimmed.is_empty() {
                continue;
            }
            seen.insert(trimmed);
            if seen.len() > 1 {
                return true;
            }
        }
        false
    }
}

impl Detector for CaseDetector {
    fn rule_type(&self) -> RuleType {
        RuleType::NormalizeCase
    }

    fn detect(&self, dataset: &Dataset) -> Vec<Issue> {
        let mut issues = Vec::new();

        for column in 0..dataset.column_count() {
            if !Self::has_case_variance(dataset.column_values(column)) {
                continue;
            }

            let rule = Rule::NormalizeCase {
                column,
                mode: self.mode,
            };

            let mut rows = Vec::new();
            let mut changes_any = false;
            for (row, value) in dataset.column_values(column).enumerate() {
                if value.is_text() {
                    rows.push(row);
                    changes_any = changes_any || rule.apply(value) != *value;
                }
            }

            if changes_any {
                issues.push(Issue::new(rule, rows));
            }
        }

        issues
    }
}
