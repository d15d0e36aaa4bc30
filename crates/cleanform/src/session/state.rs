//! Session state and the events that move it forward.
//!
//! Every user action is an [`Event`]. [`transition`] maps the current state
//! and an event to the next state without touching the input, recomputing
//! issues and diffs in the same step so the enabled set and the diff set
//! never disagree.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::rules::RuleSet;
use crate::detect::DetectionEngine;
use crate::error::{CleanformError, Result};
use crate::input::{HeaderMode, RawTable, build_dataset};
use crate::model::Dataset;
use crate::rules::{ColumnIssues, EnabledRule, Issue, group_by_column};
use crate::transform::{CellDiff, History, HistoryPolicy, apply_rules, preview_diff};

/// A user action.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new file was parsed. Replaces everything.
    FileLoaded { raw: RawTable, header: HeaderMode },
    /// Rebuild the dataset from the raw rows with another header mode.
    HeaderModeChanged(HeaderMode),
    /// Enable or disable the issue with this id.
    RuleToggled(String),
    /// Disable every rule on one column.
    ColumnCleared(usize),
    /// Disable every rule.
    AllCleared,
    /// Commit every enabled rule.
    Applied,
    /// Commit only the enabled rules for one column.
    ColumnApplied(usize),
    /// Restore the dataset from before the last commit.
    Undone,
}

/// Everything the engine knows at one point in time.
#[derive(Debug, Clone)]
pub struct SessionState {
    raw: Option<Arc<RawTable>>,
    header: HeaderMode,
    dataset: Arc<Dataset>,
    issues: Vec<Issue>,
    enabled: RuleSet,
    diffs: Vec<CellDiff>,
    history: History,
}

impl SessionState {
    /// An empty state with no file loaded.
    pub fn new(policy: HistoryPolicy) -> Self {
        Self {
            raw: None,
            header: HeaderMode::default(),
            dataset: Arc::new(Dataset::default()),
            issues: Vec::new(),
            enabled: RuleSet::new(),
            diffs: Vec::new(),
            history: History::new(policy),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn header_mode(&self) -> HeaderMode {
        self.header
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issues_by_column(&self) -> Vec<ColumnIssues> {
        group_by_column(&self.issues)
    }

    pub fn enabled(&self) -> &[EnabledRule] {
        self.enabled.rules()
    }

    pub fn diffs(&self) -> &[CellDiff] {
        &self.diffs
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            rows: self.dataset.row_count(),
            columns: self.dataset.column_count(),
            issues: self.issues.len(),
            affected_cells: self.issues.iter().map(|i| i.row_indices.len()).sum(),
            enabled: self.enabled.len(),
            diffs: self.diffs.len(),
            undo_depth: self.history.len(),
        }
    }

    /// Replace the dataset and drop every piece of state derived from the old one.
    fn reset_dataset(&mut self, dataset: Dataset) {
        self.dataset = Arc::new(dataset);
        self.issues = DetectionEngine::new().detect_all(&self.dataset);
        self.enabled.clear_all();
        self.diffs.clear();
        self.history.clear();
    }

    /// Install a dataset produced by a commit or undo. History is left alone.
    fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        self.dataset = dataset;
        self.issues = DetectionEngine::new().detect_all(&self.dataset);
    }

    fn refresh_diffs(&mut self) -> Result<()> {
        self.diffs = preview_diff(&self.dataset, self.enabled.rules())?;
        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(HistoryPolicy::default())
    }
}

/// Counts for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub rows: usize,
    pub columns: usize,
    pub issues: usize,
    pub affected_cells: usize,
    pub enabled: usize,
    pub diffs: usize,
    pub undo_depth: usize,
}

/// Compute the state that follows `event`.
///
/// `state` is never modified. An error leaves the caller's state as the
/// current one.
pub fn transition(state: &SessionState, event: Event) -> Result<SessionState> {
    let mut next = state.clone();

    match event {
        Event::FileLoaded { raw, header } => {
            let dataset = build_dataset(&raw, header);
            info!(
                rows = dataset.row_count(),
                columns = dataset.column_count(),
                "dataset loaded"
            );
            next.raw = Some(Arc::new(raw));
            next.header = header;
            next.reset_dataset(dataset);
        }

        Event::HeaderModeChanged(header) => {
            next.header = header;
            let dataset = match &next.raw {
                Some(raw) => build_dataset(raw, header),
                None => Dataset::default(),
            };
            debug!(%header, "header mode changed");
            next.reset_dataset(dataset);
        }

        Event::RuleToggled(id) => {
            let issue = next
                .issues
                .iter()
                .find(|issue| issue.id == id)
                .cloned()
                .ok_or(CleanformError::UnknownIssue(id))?;
            next.enabled.toggle(&issue);
            next.refresh_diffs()?;
        }

        Event::ColumnCleared(column) => {
            next.enabled.clear_column(column);
            next.refresh_diffs()?;
        }

        Event::AllCleared => {
            next.enabled.clear_all();
            next.diffs.clear();
        }

        Event::Applied => {
            if next.enabled.is_empty() {
                return Ok(next);
            }

            let applied = apply_rules(&next.dataset, next.enabled.rules())?;
            info!(rules = next.enabled.len(), "applied rules");

            let previous = Arc::clone(&next.dataset);
            next.history.push(previous);
            next.replace_dataset(Arc::new(applied));
            next.enabled.clear_all();
            next.diffs.clear();
        }

        Event::ColumnApplied(column) => {
            next.dataset.check_column(column)?;
            let rules = next.enabled.for_column(column);
            if rules.is_empty() {
                return Ok(next);
            }

            let applied = apply_rules(&next.dataset, &rules)?;
            info!(column, rules = rules.len(), "applied column rules");

            let previous = Arc::clone(&next.dataset);
            next.history.push(previous);
            next.replace_dataset(Arc::new(applied));
            next.enabled.clear_column(column);
            next.enabled.reconcile(&next.issues);
            next.refresh_diffs()?;
        }

        Event::Undone => {
            let Some(snapshot) = next.history.pop() else {
                return Ok(next);
            };

            info!(remaining = next.history.len(), "undo");
            next.replace_dataset(snapshot);
            next.enabled.clear_all();
            next.diffs.clear();
        }
    }

    Ok(next)
}

/// Holds the current state and advances it one event at a time.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new(policy: HistoryPolicy) -> Self {
        Self {
            state: SessionState::new(policy),
        }
    }

    /// Apply `event`. On error the state is unchanged.
    pub fn dispatch(&mut self, event: Event) -> Result<&SessionState> {
        self.state = transition(&self.state, event)?;
        Ok(&self.state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.state.dataset
    }

    pub fn issues(&self) -> &[Issue] {
        self.state.issues()
    }

    pub fn enabled(&self) -> &[EnabledRule] {
        self.state.enabled()
    }

    pub fn diffs(&self) -> &[CellDiff] {
        self.state.diffs()
    }

    pub fn summary(&self) -> SessionSummary {
        self.state.summary()
    }

    pub fn load(&mut self, raw: RawTable, header: HeaderMode) -> Result<&SessionState> {
        self.dispatch(Event::FileLoaded { raw, header })
    }

    pub fn toggle(&mut self, id: impl Into<String>) -> Result<&SessionState> {
        self.dispatch(Event::RuleToggled(id.into()))
    }

    pub fn apply(&mut self) -> Result<&SessionState> {
        self.dispatch(Event::Applied)
    }

    pub fn apply_column(&mut self, column: usize) -> Result<&SessionState> {
        self.dispatch(Event::ColumnApplied(column))
    }

    pub fn undo(&mut self) -> Result<&SessionState> {
        self.dispatch(Event::Undone)
    }
}
