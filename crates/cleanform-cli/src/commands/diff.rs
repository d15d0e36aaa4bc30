//! Diff command - preview the cell changes a set of rules would make.

use std::collections::BTreeMap;

use colored::Colorize;
use cleanform::{CellDiff, CellValue};

use super::{enable_rules, open_session};
use crate::cli::LoadArgs;

pub fn run(
    load: LoadArgs,
    rules: Vec<String>,
    rows: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&load)?;
    enable_rules(&mut session, &rules)?;

    let diffs = session.diffs();
    if diffs.is_empty() {
        println!("{}", "No changes to preview.".yellow());
        return Ok(());
    }

    let mut by_row: BTreeMap<usize, Vec<&CellDiff>> = BTreeMap::new();
    for diff in diffs {
        by_row.entry(diff.row_index).or_default().push(diff);
    }

    println!(
        "{} {} rules",
        "Previewing".cyan().bold(),
        session.enabled().len().to_string().white().bold()
    );
    println!();

    let columns = session.dataset().columns();
    for (row, changes) in by_row.iter().take(rows) {
        println!("{}", format!("row {}", row).dimmed());
        for diff in changes {
            let name = columns
                .get(diff.column_index)
                .map(String::as_str)
                .unwrap_or("?");
            println!(
                "  {:20} {} {} {}",
                name.white(),
                render(&diff.before).red(),
                "->".dimmed(),
                render(&diff.after).green()
            );
        }
    }

    if by_row.len() > rows {
        println!("  {}", format!("... {} more rows", by_row.len() - rows).dimmed());
    }

    println!();
    println!(
        "{} cells would change in {} rows",
        diffs.len().to_string().white().bold(),
        by_row.len().to_string().white().bold()
    );

    Ok(())
}

/// Show the value with its kind visible, so "5" and 5 read differently.
fn render(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => format!("{:?}", s),
        CellValue::Null => "null".to_string(),
        number => number.to_string(),
    }
}
