//! Previewing and committing rules, plus undo history.

mod diff;
mod engine;
mod history;

pub use diff::{CellDiff, preview_diff};
pub use engine::{apply_column, apply_rules};
pub use history::{History, HistoryPolicy};
