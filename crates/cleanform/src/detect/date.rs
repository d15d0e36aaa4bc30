//! PARSE_DATE detection.

use super::{Detector, scan_columns};
use crate::model::Dataset;
use crate::rules::{Issue, Rule, RuleType, transforms};

/// Flags recognizable date strings that are not yet in `YYYY-MM-DD` form.
pub struct DateDetector;

impl Detector for DateDetector {
    fn rule_type(&self) -> RuleType {
        RuleType::ParseDate
    }

    fn detect(&self, dataset: &Dataset) -> Vec<Issue> {
        scan_columns(dataset, transforms::is_convertible_date, |column| {
            Rule::ParseDate { column }
        })
    }
}
