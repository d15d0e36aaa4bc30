//! Cell-level previews of enabled rules.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{CellValue, Dataset};
use crate::rules::EnabledRule;

/// One cell that an enabled rule would change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDiff {
    pub row_index: usize,
    pub column_index: usize,
    pub before: CellValue,
    pub after: CellValue,
}

/// Compute the cells the enabled rules would change, without touching the dataset.
///
/// Every rule is evaluated against the original cell value, so two rules on
/// the same column produce independent diffs. Composition only happens at
/// apply time. Diffs are emitted only where `before != after`, in row order
/// and then rule order.
pub fn preview_diff(dataset: &Dataset, rules: &[EnabledRule]) -> Result<Vec<CellDiff>> {
    for rule in rules {
        dataset.check_column(rule.column_index())?;
    }

    let mut diffs = Vec::new();
    for (row_index, row) in dataset.rows().iter().enumerate() {
        for rule in rules {
            let column_index = rule.column_index();
            let before = &row[column_index];
            let after = rule.apply(before);

            if after != *before {
                diffs.push(CellDiff {
                    row_index,
                    column_index,
                    before: before.clone(),
                    after,
                });
            }
        }
    }

    Ok(diffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanformError;
    use crate::rules::Rule;

    fn enabled(rule: Rule) -> EnabledRule {
        EnabledRule { id: rule.id(), rule }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::text(" 42 "), CellValue::text("5")],
                vec![CellValue::text("x"), CellValue::Number(5.0)],
            ],
        )
    }

    #[test]
    fn test_no_rules_no_diffs() {
        assert!(preview_diff(&dataset(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_only_changed_cells() {
        let diffs = preview_diff(&dataset(), &[enabled(Rule::ParseNumber { column: 1 })]).unwrap();
        assert_eq!(
            diffs,
            vec![CellDiff {
                row_index: 0,
                column_index: 1,
                before: CellValue::text("5"),
                after: CellValue::Number(5.0),
            }]
        );
    }

    #[test]
    fn test_rules_on_same_column_see_original_value() {
        let rules = [
            enabled(Rule::TrimWhitespace { column: 0 }),
            enabled(Rule::ParseNumber { column: 0 }),
        ];
        let diffs = preview_diff(&dataset(), &rules).unwrap();

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].after, CellValue::text("42"));
        assert_eq!(diffs[1].before, CellValue::text(" 42 "));
        assert_eq!(diffs[1].after, CellValue::Number(42.0));
    }

    #[test]
    fn test_out_of_range_column() {
        let err = preview_diff(&dataset(), &[enabled(Rule::TrimWhitespace { column: 9 })]);
        assert!(matches!(
            err,
            Err(CleanformError::ColumnOutOfRange { column: 9, columns: 2 })
        ));
    }
}
