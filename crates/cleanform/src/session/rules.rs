//! The set of rules the user has enabled.

use serde::Serialize;
use tracing::debug;

use crate::rules::{EnabledRule, Issue, RuleType};

/// Enabled rules in the order they were enabled.
///
/// At most one NORMALIZE_CASE rule may be active per column. Every other rule
/// kind can be combined freely, and enabling an id twice has no effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleSet {
    rules: Vec<EnabledRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable `issue`, or disable it if it is already enabled.
    pub fn toggle(&mut self, issue: &Issue) {
        if self.contains(&issue.id) {
            self.rules.retain(|r| r.id != issue.id);
            debug!(id = %issue.id, "rule disabled");
            return;
        }

        if issue.rule_type() == RuleType::NormalizeCase {
            let column = issue.column_index();
            self.rules.retain(|r| {
                !(r.rule_type() == RuleType::NormalizeCase && r.column_index() == column)
            });
        }

        self.rules.push(issue.to_enabled());
        debug!(id = %issue.id, "rule enabled");
    }

    /// Enable `issue` unless it is already enabled.
    pub fn enable(&mut self, issue: &Issue) {
        if !self.contains(&issue.id) {
            self.toggle(issue);
        }
    }

    pub fn clear_column(&mut self, column: usize) {
        self.rules.retain(|r| r.column_index() != column);
    }

    pub fn clear_all(&mut self) {
        self.rules.clear();
    }

    /// Drop every rule whose id no longer appears in `issues`.
    pub fn reconcile(&mut self, issues: &[Issue]) {
        let before = self.rules.len();
        self.rules
            .retain(|r| issues.iter().any(|issue| issue.id == r.id));

        let dropped = before - self.rules.len();
        if dropped > 0 {
            debug!(dropped, "dropped stale rules");
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.iter().any(|r| r.id == id)
    }

    pub fn rules(&self) -> &[EnabledRule] {
        &self.rules
    }

    /// Enabled rules that target `column`, in enabled order.
    pub fn for_column(&self, column: usize) -> Vec<EnabledRule> {
        self.rules
            .iter()
            .filter(|r| r.column_index() == column)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
