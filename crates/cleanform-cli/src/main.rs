//! Cleanform CLI - detect, preview and fix data-quality issues.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze { load, json } => commands::analyze::run(load, json),

        Commands::Diff { load, rules, rows } => commands::diff::run(load, rules, rows),

        Commands::Apply {
            load,
            rules,
            all,
            column,
            output,
            format,
        } => commands::apply::run(load, rules, all, column, output, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
