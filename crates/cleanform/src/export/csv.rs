//! CSV export.

use crate::model::{CellValue, Dataset};

/// Render the dataset as comma-separated text.
///
/// The first line holds the column names. Lines are joined with `\n` and
/// there is no trailing newline. Null cells are empty.
pub fn export_csv(dataset: &Dataset) -> String {
    let mut lines = Vec::with_capacity(dataset.row_count() + 1);

    lines.push(
        dataset
            .columns()
            .iter()
            .map(|name| escape_field(name))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in dataset.rows() {
        lines.push(
            row.iter()
                .map(render_cell)
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn render_cell(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => escape_field(s),
        other => other.to_string(),
    }
}

/// Quote a field containing a comma, quote or line break, doubling inner quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
