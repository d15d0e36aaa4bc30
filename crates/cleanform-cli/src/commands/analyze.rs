//! Analyze command - list the issues detected in a data file.

use colored::Colorize;
use cleanform::Cleanform;

use crate::cli::LoadArgs;

pub fn run(load: LoadArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !load.file.exists() {
        return Err(format!("File not found: {}", load.file.display()).into());
    }

    let cleanform = Cleanform::with_config(load.config());
    let report = cleanform.analyze(&load.file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows x {} columns, {})",
        "Analyzed".cyan().bold(),
        report.source.file.white(),
        report.summary.rows,
        report.summary.columns,
        report.source.format
    );
    println!();

    if report.issues.is_empty() {
        println!("{}", "No issues found - data looks clean!".green());
        return Ok(());
    }

    for group in &report.issues {
        let name = report
            .columns
            .get(group.column_index)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "{} {}",
            format!("[{}]", group.column_index).dimmed(),
            name.white().bold()
        );

        for issue in &group.issues {
            println!(
                "  {:40} {} ({} rows)",
                issue.id.cyan(),
                issue.description,
                issue.row_indices.len().to_string().yellow()
            );
        }
    }

    println!();
    println!(
        "Found {} issues affecting {} cells",
        report.summary.issues.to_string().white().bold(),
        report.summary.affected_cells.to_string().white().bold()
    );
    println!(
        "Run {} to preview a fix",
        format!("cleanform diff {} --rule <ID>", load.file.display()).cyan()
    );

    Ok(())
}
