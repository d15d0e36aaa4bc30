//! Detectors: pure scans that turn a dataset into issues.
//!
//! Each detector covers one rule kind and runs column by column. A column
//! yields at most one issue per rule kind (one per case mode for
//! NORMALIZE_CASE), and a column with no affected rows yields none.

mod case;
mod date;
mod empty;
mod number;
mod whitespace;

pub use case::CaseDetector;
pub use date::DateDetector;
pub use empty::EmptyToNullDetector;
pub use number::NumberDetector;
pub use whitespace::WhitespaceDetector;

use tracing::debug;

use crate::model::{CellValue, Dataset};
use crate::rules::{CaseMode, Issue, Rule, RuleType};

/// Trait for detectors.
pub trait Detector {
    /// Rule kind this detector produces.
    fn rule_type(&self) -> RuleType;

    /// Scan the dataset and return issues, in column order.
    fn detect(&self, dataset: &Dataset) -> Vec<Issue>;
}

/// Emit one issue per column holding at least one cell that matches `affected`.
fn scan_columns<P, R>(dataset: &Dataset, affected: P, rule_for: R) -> Vec<Issue>
where
    P: Fn(&CellValue) -> bool,
    R: Fn(usize) -> Rule,
{
    let mut issues = Vec::new();

    for column in 0..dataset.column_count() {
        let rows: Vec<usize> = dataset
            .column_values(column)
            .enumerate()
            .filter(|(_, value)| affected(*value))
            .map(|(row, _)| row)
            .collect();

        if !rows.is_empty() {
            issues.push(Issue::new(rule_for(column), rows));
        }
    }

    issues
}

/// Runs every detector in a fixed order.
pub struct DetectionEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectionEngine {
    /// Create a new detection engine with all default detectors.
    pub fn new() -> Self {
        Self {
            detectors: vec![
                Box::new(WhitespaceDetector),
                Box::new(EmptyToNullDetector),
                Box::new(CaseDetector::new(CaseMode::Lower)),
                Box::new(CaseDetector::new(CaseMode::Upper)),
                Box::new(CaseDetector::new(CaseMode::Title)),
                Box::new(NumberDetector),
                Box::new(DateDetector),
            ],
        }
    }

    /// Create an engine running only the given detectors.
    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Run all detectors and collect issues.
    pub fn detect_all(&self, dataset: &Dataset) -> Vec<Issue> {
        let mut all_issues = Vec::new();

        for detector in &self.detectors {
            let issues = detector.detect(dataset);
            debug!(
                rule = detector.rule_type().id_prefix(),
                issues = issues.len(),
                "detector finished"
            );
            all_issues.extend(issues);
        }

        all_issues
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into()],
            vec![
                vec![CellValue::text(" Bob "), CellValue::text("30")],
                vec![CellValue::text("alice"), CellValue::text("N/A")],
            ],
        )
    }

    #[test]
    fn test_detect_all_scenario() {
        let issues = DetectionEngine::new().detect_all(&scenario());
        let find = |id: &str| issues.iter().find(|i| i.id == id);

        assert_eq!(find("trim_whitespace_col_0").unwrap().row_indices, vec![0]);
        assert_eq!(find("parse_number_col_1").unwrap().row_indices, vec![0]);
        assert_eq!(find("empty_to_null_col_1").unwrap().row_indices, vec![1]);
        assert_eq!(
            find("normalize_case_title_col_0").unwrap().row_indices,
            vec![0, 1]
        );
        assert!(find("trim_whitespace_col_1").is_none());
        assert!(find("parse_date_col_0").is_none());
    }

    #[test]
    fn test_detect_all_is_deterministic() {
        let engine = DetectionEngine::new();
        assert_eq!(engine.detect_all(&scenario()), engine.detect_all(&scenario()));
    }

    #[test]
    fn test_empty_dataset_has_no_issues() {
        let engine = DetectionEngine::new();
        assert!(engine.detect_all(&Dataset::default()).is_empty());

        let header_only = Dataset::new(vec!["a".into()], vec![]);
        assert!(engine.detect_all(&header_only).is_empty());
    }

    #[test]
    fn test_with_detectors() {
        let engine = DetectionEngine::with_detectors(vec![Box::new(NumberDetector)]);
        let issues = engine.detect_all(&scenario());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_type(), RuleType::ParseNumber);
    }
}
