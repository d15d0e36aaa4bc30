//! Committing rules into a new dataset.

use tracing::debug;

use crate::error::Result;
use crate::model::{Dataset, Row};
use crate::rules::EnabledRule;

/// Apply `rules` to every row and return the resulting dataset.
///
/// Rules run per cell in list order, each reading the value the previous
/// rule left behind. The input dataset is never touched: columns are copied
/// and every row is rebuilt.
pub fn apply_rules(dataset: &Dataset, rules: &[EnabledRule]) -> Result<Dataset> {
    for rule in rules {
        dataset.check_column(rule.column_index())?;
    }

    let mut changed = 0usize;
    let rows: Vec<Row> = dataset
        .rows()
        .iter()
        .map(|row| {
            let mut new_row = row.clone();
            for rule in rules {
                let column = rule.column_index();
                let next = rule.apply(&new_row[column]);
                if next != new_row[column] {
                    changed += 1;
                    new_row[column] = next;
                }
            }
            new_row
        })
        .collect();

    debug!(rules = rules.len(), changed, "applied rules");

    Ok(Dataset::new(dataset.columns().to_vec(), rows))
}

/// Apply only the rules that target `column`.
pub fn apply_column(dataset: &Dataset, rules: &[EnabledRule], column: usize) -> Result<Dataset> {
    dataset.check_column(column)?;

    let column_rules: Vec<EnabledRule> = rules
        .iter()
        .filter(|r| r.column_index() == column)
        .cloned()
        .collect();

    apply_rules(dataset, &column_rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanformError;
    use crate::model::CellValue;
    use crate::rules::{CaseMode, Rule};

    fn enabled(rule: Rule) -> EnabledRule {
        EnabledRule { id: rule.id(), rule }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into()],
            vec![
                vec![CellValue::text(" Bob "), CellValue::text(" 42 ")],
                vec![CellValue::text("alice"), CellValue::text("N/A")],
            ],
        )
    }

    #[test]
    fn test_sequential_composition_per_cell() {
        let rules = [
            enabled(Rule::TrimWhitespace { column: 1 }),
            enabled(Rule::ParseNumber { column: 1 }),
        ];
        let out = apply_rules(&dataset(), &rules).unwrap();
        assert_eq!(out.get(0, 1), Some(&CellValue::Number(42.0)));
    }

    #[test]
    fn test_input_untouched_and_shape_preserved() {
        let input = dataset();
        let snapshot = input.clone();
        let rules = [
            enabled(Rule::TrimWhitespace { column: 0 }),
            enabled(Rule::EmptyToNull { column: 1 }),
        ];

        let out = apply_rules(&input, &rules).unwrap();
        assert_eq!(input, snapshot);
        assert_eq!(out.columns(), input.columns());
        assert_eq!(out.row_count(), input.row_count());
        assert_eq!(out.get(0, 0), Some(&CellValue::text("Bob")));
        assert_eq!(out.get(1, 1), Some(&CellValue::Null));
    }

    #[test]
    fn test_apply_column_only_touches_that_column() {
        let rules = [
            enabled(Rule::NormalizeCase {
                column: 0,
                mode: CaseMode::Upper,
            }),
            enabled(Rule::EmptyToNull { column: 1 }),
        ];
        let out = apply_column(&dataset(), &rules, 0).unwrap();
        assert_eq!(out.get(1, 0), Some(&CellValue::text("ALICE")));
        assert_eq!(out.get(1, 1), Some(&CellValue::text("N/A")));
    }

    #[test]
    fn test_out_of_range() {
        let err = apply_rules(&dataset(), &[enabled(Rule::ParseDate { column: 5 })]);
        assert!(matches!(err, Err(CleanformError::ColumnOutOfRange { .. })));
        assert!(apply_column(&dataset(), &[], 2).is_err());
    }
}
