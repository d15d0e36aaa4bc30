//! PARSE_NUMBER detection.

use super::{Detector, scan_columns};
use crate::model::Dataset;
use crate::rules::{Issue, Rule, RuleType, transforms};

/// Flags strictly numeric strings (`-12`, `3.5`; not `1,000` or `1e5`).
pub struct NumberDetector;

impl Detector for NumberDetector {
    fn rule_type(&self) -> RuleType {
        RuleType::ParseNumber
    }

    fn detect(&self, dataset: &Dataset) -> Vec<Issue> {
        scan_columns(dataset, transforms::is_numeric_string, |column| {
            Rule::ParseNumber { column }
        })
    }
}
