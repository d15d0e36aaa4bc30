//! Detected issues and the user's selections built from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::kind::{Rule, RuleType};
use crate::model::CellValue;

/// A detected, fixable data-quality problem in one column.
///
/// Issues belong to the dataset they were detected on. Any new dataset
/// gets a freshly detected set; old issues are discarded, never carried over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable key, see [`Rule::id`].
    pub id: String,
    /// The fix, including its column.
    #[serde(flatten)]
    pub rule: Rule,
    /// Affected row positions, ascending.
    pub row_indices: Vec<usize>,
    /// Human-readable description.
    pub description: String,
}

impl Issue {
    /// Create an issue for `rule` affecting `row_indices`.
    pub fn new(rule: Rule, row_indices: Vec<usize>) -> Self {
        Self {
            id: rule.id(),
            rule,
            row_indices,
            description: rule.description(),
        }
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule.rule_type()
    }

    pub fn column_index(&self) -> usize {
        self.rule.column()
    }

    /// The would-be fixed value of a cell.
    pub fn preview(&self, value: &CellValue) -> CellValue {
        self.rule.apply(value)
    }

    /// Reduce this issue to a selectable rule.
    pub fn to_enabled(&self) -> EnabledRule {
        EnabledRule {
            id: self.id.clone(),
            rule: self.rule,
        }
    }
}

/// An issue the user selected for preview or apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledRule {
    /// Id of the issue this was selected from.
    pub id: String,
    #[serde(flatten)]
    pub rule: Rule,
}

impl EnabledRule {
    pub fn rule_type(&self) -> RuleType {
        self.rule.rule_type()
    }

    pub fn column_index(&self) -> usize {
        self.rule.column()
    }

    pub fn apply(&self, value: &CellValue) -> CellValue {
        self.rule.apply(value)
    }
}

/// All issues found in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnIssues {
    pub column_index: usize,
    pub issues: Vec<Issue>,
}

/// Group issues by column, columns in order of first appearance.
pub fn group_by_column(issues: &[Issue]) -> Vec<ColumnIssues> {
    let mut groups: IndexMap<usize, Vec<Issue>> = IndexMap::new();
    for issue in issues {
        groups
            .entry(issue.column_index())
            .or_default()
            .push(issue.clone());
    }

    groups
        .into_iter()
        .map(|(column_index, issues)| ColumnIssues {
            column_index,
            issues,
        })
        .collect()
}
