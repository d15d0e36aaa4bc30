//! Minimal Office Open XML workbook export.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::model::{CellValue, Dataset};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Cleaned";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Render the dataset as an `.xlsx` workbook with one sheet.
///
/// Row 1 holds the column names. Text is written as inline strings,
/// finite numbers as numeric cells, and null cells are left out.
pub fn export_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(dataset)),
    ];

    for (name, body) in parts {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(body.as_bytes())
            .map_err(zip::result::ZipError::Io)?;
    }

    Ok(zip.finish()?.into_inner())
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SHEET_NAME
    )
}

fn sheet_xml(dataset: &Dataset) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let header = dataset.columns().iter().map(|c| CellValue::text(c.as_str()));
    write_row(&mut xml, 1, header);

    for (index, row) in dataset.rows().iter().enumerate() {
        write_row(&mut xml, index + 2, row.iter().cloned());
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn write_row(xml: &mut String, row_number: usize, cells: impl Iterator<Item = CellValue>) {
    let _ = write!(xml, r#"<row r="{}">"#, row_number);

    for (column, value) in cells.enumerate() {
        let reference = format!("{}{}", column_letters(column), row_number);
        match &value {
            CellValue::Null => {}
            CellValue::Number(n) if n.is_finite() => {
                let _ = write!(xml, r#"<c r="{}"><v>{}</v></c>"#, reference, value);
            }
            other => {
                let _ = write!(
                    xml,
                    r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    reference,
                    escape_xml(&other.to_string())
                );
            }
        }
    }

    xml.push_str("</row>");
}

/// Spreadsheet column name for a zero-based index: 0 is `A`, 26 is `AA`.
fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Escape markup characters and drop control characters XML 1.0 cannot carry.
fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}
