//! Apply command - commit rules and export the cleaned data.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use cleanform::{Cleanform, Dataset, ExportFormat, RuleType};

use super::{enable_rules, open_session};
use crate::cli::LoadArgs;

pub fn run(
    load: LoadArgs,
    rules: Vec<String>,
    all: bool,
    column: Option<usize>,
    output: Option<PathBuf>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&load)?;

    let ids: Vec<String> = if all {
        session
            .issues()
            .iter()
            .filter(|issue| issue.rule_type() != RuleType::NormalizeCase)
            .map(|issue| issue.id.clone())
            .collect()
    } else {
        rules
    };

    enable_rules(&mut session, &ids)?;

    if session.enabled().is_empty() {
        println!("{} No rules to apply.", "Warning:".yellow().bold());
        return Ok(());
    }

    let before = Arc::clone(session.state().dataset());
    let enabled = session.enabled().len();

    println!(
        "{} {} rules",
        "Applying".cyan().bold(),
        enabled.to_string().white().bold()
    );

    match column {
        Some(col) => session.apply_column(col)?,
        None => session.apply()?,
    };

    let changed = changed_cells(&before, session.dataset());

    let output_path = output.unwrap_or_else(|| {
        let stem = load.file.file_stem().unwrap_or_default().to_string_lossy();
        load.file
            .with_file_name(format!("{}_cleaned.{}", stem, format.extension()))
    });

    Cleanform::with_config(load.config()).save(session.dataset(), &output_path, format)?;

    println!(
        "Changed {} cells; {} issues remain",
        changed.to_string().white().bold(),
        session.issues().len().to_string().white().bold()
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

fn changed_cells(before: &Dataset, after: &Dataset) -> usize {
    before
        .rows()
        .iter()
        .zip(after.rows())
        .map(|(old, new)| old.iter().zip(new).filter(|(a, b)| a != b).count())
        .sum()
}
