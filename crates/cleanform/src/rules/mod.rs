//! Rule kinds, per-value transforms, and the issue/selection records built on them.

mod issue;
mod kind;
pub mod transforms;

pub use issue::{ColumnIssues, EnabledRule, Issue, group_by_column};
pub use kind::{CaseMode, Rule, RuleType};
