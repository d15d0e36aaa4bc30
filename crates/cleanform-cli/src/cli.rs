//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use cleanform::{
    CleanformConfig, ExportFormat, HeaderMode, HistoryPolicy, ParserConfig, RowLimit,
};

/// Row ceiling applied when `--max-rows` is not given.
pub const DEFAULT_MAX_ROWS: usize = 20_000;

/// Cleanform: detect, preview and fix data-quality issues in tabular files
#[derive(Parser)]
#[command(name = "cleanform")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Options controlling how the input file is read.
#[derive(Args, Clone, Debug)]
pub struct LoadArgs {
    /// Path to the data file (CSV/TSV/XLSX)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Whether the first row holds column names (auto, yes, no)
    #[arg(long, default_value = "auto")]
    pub header: HeaderMode,

    /// Field delimiter for delimited files (e.g. ",", ";", "tab"); detected when omitted
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Maximum number of rows read from the file, header row included
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    /// Fail instead of truncating when the file exceeds --max-rows
    #[arg(long)]
    pub strict_rows: bool,

    /// Maximum number of undo snapshots kept (unbounded when omitted)
    #[arg(long)]
    pub history_depth: Option<usize>,
}

impl LoadArgs {
    pub fn config(&self) -> CleanformConfig {
        let row_limit = if self.strict_rows {
            RowLimit::Reject(self.max_rows)
        } else {
            RowLimit::Truncate(self.max_rows)
        };

        CleanformConfig {
            parser: ParserConfig {
                delimiter: self.delimiter,
                row_limit,
                ..ParserConfig::default()
            },
            header: self.header,
            history: self
                .history_depth
                .map_or(HistoryPolicy::Unbounded, HistoryPolicy::MaxDepth),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the issues detected in a data file
    Analyze {
        #[command(flatten)]
        load: LoadArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview the cell changes a set of rules would make
    Diff {
        #[command(flatten)]
        load: LoadArgs,

        /// Issue id to enable (repeatable)
        #[arg(short, long = "rule", value_name = "ID", required = true)]
        rules: Vec<String>,

        /// Number of changed rows to show
        #[arg(long, default_value = "10")]
        rows: usize,
    },

    /// Apply rules and export the cleaned data
    Apply {
        #[command(flatten)]
        load: LoadArgs,

        /// Issue id to enable (repeatable)
        #[arg(short, long = "rule", value_name = "ID", required_unless_present = "all")]
        rules: Vec<String>,

        /// Enable every detected issue except case normalization
        #[arg(long, conflicts_with = "rules")]
        all: bool,

        /// Only commit the rules for this column index
        #[arg(long)]
        column: Option<usize>,

        /// Output path for cleaned data (default: <file>_cleaned.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Delimiter must be a single ASCII character or 'tab', got '{}'",
            s
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter("::").is_err());
    }

    #[test]
    fn test_load_args_config() {
        let cli = Cli::parse_from([
            "cleanform",
            "apply",
            "data.csv",
            "--all",
            "--strict-rows",
            "--max-rows",
            "50",
            "--history-depth",
            "3",
            "--header",
            "no",
        ]);

        let Commands::Apply { load, all, .. } = cli.command else {
            panic!("expected apply");
        };
        assert!(all);

        let config = load.config();
        assert_eq!(config.parser.row_limit, RowLimit::Reject(50));
        assert_eq!(config.history, HistoryPolicy::MaxDepth(3));
        assert_eq!(config.header, HeaderMode::Absent);
    }

    #[test]
    fn test_output_format() {
        let cli = Cli::parse_from(["cleanform", "apply", "data.csv", "--all", "-f", "XLSX"]);
        let Commands::Apply { format, .. } = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(format, ExportFormat::Xlsx);

        let cli = Cli::parse_from(["cleanform", "apply", "data.csv", "--all"]);
        let Commands::Apply { format, .. } = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(format, ExportFormat::Csv);

        assert!(Cli::try_parse_from(["cleanform", "apply", "data.csv", "--all", "-f", "parquet"]).is_err());
    }

    #[test]
    fn test_default_row_ceiling() {
        let cli = Cli::parse_from(["cleanform", "-v", "analyze", "data.csv"]);
        assert_eq!(cli.verbose, 1);
        let Commands::Analyze { load, json } = cli.command else {
            panic!("expected analyze");
        };
        assert!(!json);
        assert_eq!(
            load.config().parser.row_limit,
            RowLimit::Truncate(DEFAULT_MAX_ROWS)
        );
    }
}
