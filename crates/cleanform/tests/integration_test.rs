//! Integration tests for Cleanform: files on disk through to exported output.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use cleanform::{
    CellValue, Cleanform, CleanformConfig, CleanformError, ExportFormat, HeaderMode, Parser,
    ParserConfig, RowLimit, SourceFormat,
};

/// Helper to create a temporary file with the given extension and content.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_csv_detects_header_and_issues() {
    let file = create_test_file("name,age\n Bob ,30\nalice,N/A\n", ".csv");

    let (session, source) = Cleanform::new().load(file.path()).expect("load failed");

    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 3);
    assert!(source.hash.starts_with("sha256:"));

    let dataset = session.dataset();
    assert_eq!(dataset.columns(), ["name", "age"]);
    assert_eq!(dataset.row_count(), 2);

    let ids: Vec<&str> = session.issues().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "trim_whitespace_col_0",
            "empty_to_null_col_1",
            "normalize_case_lower_col_0",
            "normalize_case_lower_col_1",
            "normalize_case_upper_col_0",
            "normalize_case_title_col_0",
            "parse_number_col_1",
        ]
    );
}

#[test]
fn test_tsv_auto_detect() {
    let file = create_test_file("id\tcity\n1\tparis\n2\tParis\n", ".tsv");
    let (session, source) = Cleanform::new().load(file.path()).unwrap();

    assert_eq!(source.format, "tsv");
    assert_eq!(session.dataset().columns(), ["id", "city"]);
}

#[test]
fn test_explicit_absent_header() {
    let file = create_test_file("a,b\nc,d\n", ".csv");
    let cleanform = Cleanform::with_config(CleanformConfig {
        header: HeaderMode::Absent,
        ..CleanformConfig::default()
    });

    let (session, _) = cleanform.load(file.path()).unwrap();
    assert_eq!(session.dataset().columns(), ["Column 1", "Column 2"]);
    assert_eq!(session.dataset().row_count(), 2);
}

#[test]
fn test_header_only_file_yields_empty_dataset() {
    let file = create_test_file("name,age\n", ".csv");
    let cleanform = Cleanform::with_config(CleanformConfig {
        header: HeaderMode::Present,
        ..CleanformConfig::default()
    });

    let (session, _) = cleanform.load(file.path()).unwrap();
    assert_eq!(session.dataset().row_count(), 0);
    assert!(session.issues().is_empty());
}

#[test]
fn test_empty_file_is_an_error() {
    let file = create_test_file("", ".csv");
    let err = Cleanform::new().load(file.path());
    assert!(matches!(err, Err(CleanformError::EmptyData(_))));
}

#[test]
fn test_unsupported_extension() {
    let file = create_test_file("a,b\n", ".parquet");
    let err = Cleanform::new().load(file.path());
    assert!(matches!(err, Err(CleanformError::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Cleanform::new().load("/definitely/not/here.csv");
    assert!(matches!(err, Err(CleanformError::Io { .. })));
}

#[test]
fn test_row_limit_policies() {
    let content = "n\n1\n2\n3\n4\n";
    let file = create_test_file(content, ".csv");

    let truncating = Cleanform::with_config(CleanformConfig {
        parser: ParserConfig {
            row_limit: RowLimit::Truncate(3),
            ..ParserConfig::default()
        },
        header: HeaderMode::Present,
        ..CleanformConfig::default()
    });
    let (session, _) = truncating.load(file.path()).unwrap();
    assert_eq!(session.dataset().row_count(), 2);

    let rejecting = Cleanform::with_config(CleanformConfig {
        parser: ParserConfig {
            row_limit: RowLimit::Reject(3),
            ..ParserConfig::default()
        },
        ..CleanformConfig::default()
    });
    assert!(matches!(
        rejecting.load(file.path()),
        Err(CleanformError::RowLimitExceeded { rows: 5, limit: 3 })
    ));
}

#[test]
fn test_load_bytes() {
    let session = Cleanform::new()
        .load_bytes(b"x;y\n1;2\n3;4\n", SourceFormat::Delimited)
        .unwrap();
    assert_eq!(session.dataset().column_count(), 2);
    assert_eq!(session.dataset().get(0, 0), Some(&CellValue::text("1")));
}

// =============================================================================
// Analyze
// =============================================================================

#[test]
fn test_analyze_report() {
    let file = create_test_file(
        "name,joined,age\nAnn,15/01/2024,30\nbo,2024-02-03,41\n",
        ".csv",
    );
    let report = Cleanform::new().analyze(file.path()).unwrap();

    assert_eq!(report.columns, vec!["name", "joined", "age"]);
    assert_eq!(report.summary.rows, 2);

    let joined = report
        .issues
        .iter()
        .find(|group| group.column_index == 1)
        .expect("issues for the date column");
    let date = joined
        .issues
        .iter()
        .find(|issue| issue.id == "parse_date_col_1")
        .expect("date issue");
    assert_eq!(date.row_indices, vec![0]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["rows"], 2);
}

// =============================================================================
// Round trips through the exporters
// =============================================================================

#[test]
fn test_clean_and_save_csv() {
    let file = create_test_file("name,age\n Bob ,30\nalice,N/A\n", ".csv");
    let cleanform = Cleanform::new();
    let (mut session, _) = cleanform.load(file.path()).unwrap();

    for id in ["trim_whitespace_col_0", "empty_to_null_col_1", "parse_number_col_1"] {
        session.toggle(id).unwrap();
    }
    session.apply().unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("people_cleaned.csv");
    cleanform
        .save(session.dataset(), &out, ExportFormat::Csv)
        .unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, "name,age\nBob,30\nalice,");
}

#[test]
fn test_save_json() {
    let file = create_test_file("name,age\nBob,30\nalice,41\n", ".csv");
    let cleanform = Cleanform::new();
    let (mut session, _) = cleanform.load(file.path()).unwrap();
    session.toggle("parse_number_col_1").unwrap();
    session.apply().unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.json");
    cleanform
        .save(session.dataset(), &out, ExportFormat::Json)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value[1]["name"], "alice");
    assert_eq!(value[1]["age"], 41);
}

#[test]
fn test_xlsx_round_trip_through_parser() {
    let file = create_test_file("city,score\n paris ,1.5\nLyon,N/A\n", ".csv");
    let cleanform = Cleanform::new();
    let (mut session, _) = cleanform.load(file.path()).unwrap();

    for id in ["trim_whitespace_col_0", "empty_to_null_col_1", "parse_number_col_1"] {
        session.toggle(id).unwrap();
    }
    session.apply().unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("cities.xlsx");
    cleanform
        .save(session.dataset(), &out, ExportFormat::Xlsx)
        .unwrap();

    let (raw, source) = Parser::new().parse_file(&out).unwrap();
    assert_eq!(source.format, "xlsx");
    assert_eq!(raw.rows[0], vec![CellValue::text("city"), CellValue::text("score")]);
    assert_eq!(raw.rows[1], vec![CellValue::text("paris"), CellValue::Number(1.5)]);
    assert_eq!(raw.rows[2][0], CellValue::text("Lyon"));
    assert_eq!(raw.rows[2][1], CellValue::Null);
}
