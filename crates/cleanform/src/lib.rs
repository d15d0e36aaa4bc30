//! Cleanform: a rule engine for cleaning tabular data.
//!
//! A file is parsed into a [`Dataset`], detectors scan every column for
//! fixable problems ([`Issue`]s), the user enables a subset of them, previews
//! the resulting cell changes, and commits them into a new dataset with
//! undo available.
//!
//! # Core Principles
//!
//! - **Non-destructive**: datasets are immutable; every commit produces a new one
//! - **Deterministic**: the same data always yields the same issues and ids
//! - **Explicit state**: every user action is an [`Event`] with a pure transition
//!
//! # Example
//!
//! ```no_run
//! use cleanform::{Cleanform, ExportFormat};
//!
//! let cleanform = Cleanform::new();
//! let (mut session, _source) = cleanform.load("people.csv").unwrap();
//!
//! for issue in session.issues() {
//!     println!("{}: {} ({} rows)", issue.id, issue.description, issue.row_indices.len());
//! }
//!
//! session.toggle("trim_whitespace_col_0").unwrap();
//! session.apply().unwrap();
//! cleanform
//!     .save(session.dataset(), "people_cleaned.csv", ExportFormat::Csv)
//!     .unwrap();
//! ```

pub mod detect;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod rules;
pub mod session;
pub mod transform;

mod cleanform;

pub use crate::cleanform::{AnalysisReport, Cleanform, CleanformConfig};
pub use detect::{DetectionEngine, Detector};
pub use error::{CleanformError, Result};
pub use export::{ExportFormat, export, export_csv, export_json, export_xlsx};
pub use input::{
    HeaderMode, Parser, ParserConfig, RawTable, RowLimit, SourceFormat, SourceMetadata,
    build_dataset, detect_header_row,
};
pub use model::{CellValue, Dataset, Row};
pub use rules::{CaseMode, ColumnIssues, EnabledRule, Issue, Rule, RuleType};
pub use session::{Event, RuleSet, Session, SessionState, SessionSummary, transition};
pub use transform::{CellDiff, History, HistoryPolicy, apply_column, apply_rules, preview_diff};
