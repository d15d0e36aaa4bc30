//! TRIM_WHITESPACE detection.

use super::{Detector, scan_columns};
use crate::model::Dataset;
use crate::rules::{Issue, Rule, RuleType, transforms};

/// Flags text values with leading or trailing whitespace.
pub struct WhitespaceDetector;

impl Detector for WhitespaceDetector {
    fn rule_type(&self) -> RuleType {
        RuleType::TrimWhitespace
    }

    fn detect(&self, dataset: &Dataset) -> Vec<Issue> {
        scan_columns(dataset, transforms::has_surrounding_whitespace, |column| {
            Rule::TrimWhitespace { column }
        })
    }
}
