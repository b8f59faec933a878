//! Delimited-text export of loaded records.
//!
//! Records are any `Serialize` type that serializes to a JSON object. The
//! header row is taken from the first record's field names in declaration
//! order; later records are projected onto those same columns.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Message returned when an export is requested for an empty dataset.
pub const EMPTY_EXPORT_MESSAGE: &str = "No data to export";

pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_PDF: &str = "pdf";

/// MIME type for CSV attachments.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Output format requested by an export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    /// Parse a `?format=` value. Missing defaults to CSV.
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.unwrap_or(FORMAT_CSV) {
            FORMAT_CSV => Ok(Self::Csv),
            FORMAT_PDF => Ok(Self::Pdf),
            other => Err(CoreError::Validation(format!(
                "Unknown export format '{other}'. Must be one of: {FORMAT_CSV}, {FORMAT_PDF}"
            ))),
        }
    }
}

/// Quote a single field if it contains a delimiter, quote, or line break.
///
/// Embedded quotes are doubled.
pub fn escape_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Render a JSON value as the unescaped text of one CSV cell.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Convert a non-empty record sequence to CSV text.
///
/// Rows are joined with `\n` and the output has no trailing newline.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, CoreError> {
    if records.is_empty() {
        return Err(CoreError::Validation(EMPTY_EXPORT_MESSAGE.to_string()));
    }

    let rows = records
        .iter()
        .map(|r| match serde_json::to_value(r) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(CoreError::Validation(
                "Export records must serialize to objects".to_string(),
            )),
            Err(e) => Err(CoreError::Internal(format!("Failed to serialize record: {e}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let headers: Vec<String> = rows[0].keys().cloned().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &rows {
        let line = headers
            .iter()
            .map(|h| escape_field(&cell_text(row.get(h))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Build the attachment file name `<label>_<YYYY-MM-DD>.csv`.
pub fn export_filename(label: &str, date: NaiveDate) -> String {
    format!("{label}_{}.csv", date.format("%Y-%m-%d"))
}

/// Render records in the requested format.
///
/// PDF output is not implemented and always returns [`CoreError::Unsupported`].
pub fn render<T: Serialize>(format: ExportFormat, records: &[T]) -> Result<String, CoreError> {
    match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Pdf => Err(CoreError::Unsupported(
            "PDF export is not implemented".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Row {
        title: String,
        status: String,
        owner: Option<String>,
        score: i32,
    }

    fn row(title: &str, status: &str, owner: Option<&str>, score: i32) -> Row {
        Row {
            title: title.to_string(),
            status: status.to_string(),
            owner: owner.map(str::to_string),
            score,
        }
    }

    #[test]
    fn header_follows_field_order() {
        let csv = to_csv(&[row("A", "open", Some("Ann"), 3)]).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "title,status,owner,score");
    }

    #[test]
    fn plain_values_are_not_quoted() {
        let csv = to_csv(&[row("Payroll", "open", Some("Ann"), 7)]).unwrap();
        assert_eq!(csv, "title,status,owner,score\nPayroll,open,Ann,7");
    }

    #[test]
    fn comma_quote_and_newline_are_escaped() {
        let csv = to_csv(&[
            row("Cash, petty", "open", None, 1),
            row("The \"big\" one", "closed", None, 2),
            row("line\nbreak", "open", None, 3),
        ])
        .unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[1], "\"Cash, petty\",open,,1");
        assert_eq!(lines[2], "\"The \"\"big\"\" one\",closed,,2");
        assert_eq!(lines[3], "\"line");
        assert_eq!(lines[4], "break\",open,,3");
    }

    #[test]
    fn missing_values_render_empty() {
        let csv = to_csv(&[row("A", "open", None, 0)]).unwrap();
        assert_eq!(csv.lines().nth(1).unwrap(), "A,open,,0");
    }

    #[test]
    fn empty_input_is_rejected() {
        let rows: Vec<Row> = Vec::new();
        assert_matches!(to_csv(&rows), Err(CoreError::Validation(msg)) if msg == EMPTY_EXPORT_MESSAGE);
    }

    #[test]
    fn non_object_records_are_rejected() {
        assert_matches!(to_csv(&[1, 2, 3]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn later_rows_use_first_row_columns() {
        let rows = vec![
            serde_json::json!({"a": 1, "b": 2}),
            serde_json::json!({"b": 4, "c": 5}),
        ];
        let csv = to_csv(&rows).unwrap();
        assert_eq!(csv, "a,b\n1,2\n,4");
    }

    #[test]
    fn filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_filename("Findings", date), "Findings_2024-03-09.csv");
    }

    #[test]
    fn pdf_is_unsupported() {
        assert_matches!(
            render(ExportFormat::Pdf, &[row("A", "open", None, 0)]),
            Err(CoreError::Unsupported(_))
        );
    }

    #[test]
    fn format_parsing() {
        assert_eq!(ExportFormat::parse(None).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse(Some("pdf")).unwrap(), ExportFormat::Pdf);
        assert!(ExportFormat::parse(Some("xlsx")).is_err());
    }
}
