//! JSON export.

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{CellValue, Dataset};

/// Render the dataset as a pretty-printed array of row objects.
///
/// Keys follow column order. If two columns share a name, the key stays at
/// the first position and holds the later column's value.
pub fn export_json(dataset: &Dataset) -> Result<String> {
    let records: Vec<IndexMap<&str, &CellValue>> = dataset
        .rows()
        .iter()
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_json_preserves_column_order() {
        let ds = Dataset::new(
            vec!["z".into(), "a".into()],
            vec![vec![CellValue::text("x"), CellValue::Number(3.0)]],
        );

        let json = export_json(&ds).unwrap();
        assert_eq!(json, "[\n  {\n    \"z\": \"x\",\n    \"a\": 3\n  }\n]");
    }

    #[test]
    fn test_null_and_duplicate_names() {
        let ds = Dataset::new(
            vec!["k".into(), "other".into(), "k".into()],
            vec![vec![
                CellValue::text("first"),
                CellValue::Null,
                CellValue::text("second"),
            ]],
        );

        let value: serde_json::Value = serde_json::from_str(&export_json(&ds).unwrap()).unwrap();
        assert_eq!(value[0]["k"], "second");
        assert!(value[0]["other"].is_null());
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(export_json(&Dataset::default()).unwrap(), "[]");
    }
}
