//! Undo history of dataset snapshots.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::warn;

use crate::model::Dataset;

/// How many snapshots the history keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Keep every snapshot. Memory grows with each apply.
    #[default]
    Unbounded,
    /// Keep at most N snapshots, evicting the oldest. `MaxDepth(0)` disables undo.
    MaxDepth(usize),
}

/// Stack of prior datasets, pushed before each commit and popped on undo.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<Arc<Dataset>>,
    policy: HistoryPolicy,
}

impl History {
    pub fn new(policy: HistoryPolicy) -> Self {
        Self {
            snapshots: VecDeque::new(),
            policy,
        }
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// Record the dataset as it was before a commit.
    pub fn push(&mut self, snapshot: Arc<Dataset>) {
        self.snapshots.push_back(snapshot);

        if let HistoryPolicy::MaxDepth(max) = self.policy {
            while self.snapshots.len() > max {
                self.snapshots.pop_front();
                warn!(max_depth = max, "undo history full, dropped oldest snapshot");
            }
        }
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<Arc<Dataset>> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
