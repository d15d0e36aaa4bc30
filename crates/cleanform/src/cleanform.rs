//! Main Cleanform struct and public API.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{CleanformError, Result};
use crate::export::{ExportFormat, export};
use crate::input::{HeaderMode, Parser, ParserConfig, SourceFormat, SourceMetadata};
use crate::model::Dataset;
use crate::rules::ColumnIssues;
use crate::session::{Session, SessionSummary};
use crate::transform::HistoryPolicy;

/// Configuration for loading and cleaning a file.
#[derive(Debug, Clone, Default)]
pub struct CleanformConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// How to decide whether the first row holds column names.
    pub header: HeaderMode,
    /// Undo history cap.
    pub history: HistoryPolicy,
}

/// What was found in a freshly loaded file.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Column names after header inference.
    pub columns: Vec<String>,
    /// Counts for the loaded dataset.
    pub summary: SessionSummary,
    /// Issues grouped by column.
    pub issues: Vec<ColumnIssues>,
}

/// Entry point: loads files into sessions and writes cleaned data out.
pub struct Cleanform {
    config: CleanformConfig,
    parser: Parser,
}

impl Cleanform {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(CleanformConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: CleanformConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &CleanformConfig {
        &self.config
    }

    /// Parse a file and start a session on it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Session, SourceMetadata)> {
        let path = path.as_ref();
        let (raw, source) = self.parser.parse_file(path)?;

        let mut session = Session::new(self.config.history);
        session.load(raw, self.config.header)?;

        info!(
            file = %source.file,
            rows = session.dataset().row_count(),
            issues = session.issues().len(),
            "loaded file"
        );

        Ok((session, source))
    }

    /// Start a session on in-memory file contents.
    pub fn load_bytes(&self, bytes: &[u8], format: SourceFormat) -> Result<Session> {
        let raw = self.parser.parse_bytes(bytes, format)?;
        let mut session = Session::new(self.config.history);
        session.load(raw, self.config.header)?;
        Ok(session)
    }

    /// Load a file and report its issues without changing anything.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let (session, source) = self.load(path)?;
        let state = session.state();

        Ok(AnalysisReport {
            source,
            columns: state.dataset().columns().to_vec(),
            summary: state.summary(),
            issues: state.issues_by_column(),
        })
    }

    /// Write `dataset` to `path` in `format`.
    pub fn save(
        &self,
        dataset: &Dataset,
        path: impl AsRef<Path>,
        format: ExportFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        let bytes = export(dataset, format)?;

        fs::write(path, bytes).map_err(|e| CleanformError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(file = %path.display(), %format, rows = dataset.row_count(), "exported dataset");
        Ok(())
    }
}

impl Default for Cleanform {
    fn default() -> Self {
        Self::new()
    }
}
