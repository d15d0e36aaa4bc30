//! EMPTY_TO_NULL detection.

use super::{Detector, scan_columns};
use crate::model::Dataset;
use crate::rules::{Issue, Rule, RuleType, transforms};

/// Flags blank text and textual stand-ins for missing values.
pub struct EmptyToNullDetector;

impl Detector for EmptyToNullDetector {
    fn rule_type(&self) -> RuleType {
        RuleType::EmptyToNull
    }

    fn detect(&self, dataset: &Dataset) -> Vec<Issue> {
        scan_columns(dataset, transforms::is_empty_like, |column| {
            Rule::EmptyToNull { column }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_flags_empty_like_values() {
        let ds = Dataset::new(
            vec!["v".into()],
            vec![
                vec![CellValue::text("N/A")],
                vec![CellValue::Null],
                vec![CellValue::text("")],
                vec![CellValue::text("value")],
                vec![CellValue::text(" null ")],
            ],
        );

        let issues = EmptyToNullDetector.detect(&ds);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row_indices, vec![0, 2, 4]);
        assert_eq!(issues[0].preview(&CellValue::text("na")), CellValue::Null);
    }

    #[test]
    fn test_null_cells_are_not_flagged() {
        let ds = Dataset::new(vec!["v".into()], vec![vec![CellValue::Null]]);
        assert!(EmptyToNullDetector.detect(&ds).is_empty());
    }
}
