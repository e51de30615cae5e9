//! Tabular (CSV and spreadsheet) previews.

use crate::{Error, Result};

/// Maximum number of data rows included in a CSV preview.
pub const MAX_PREVIEW_ROWS: usize = 100;

/// Fixed notice returned for binary spreadsheet formats.
///
/// Parsing legacy or OOXML Excel would pull a heavyweight dependency into the
/// request hot path; the preview is declined instead.
pub const SPREADSHEET_PREVIEW_NOTICE: &str =
    "[Preview unavailable for non-CSV spreadsheet formats. Download the file to inspect its contents.]";

/// Builds a row-capped preview of CSV bytes.
///
/// Cells are trimmed and joined with `", "`, one line per row. Output stops
/// after [`MAX_PREVIEW_ROWS`] rows with a final `...` marker line.
pub(super) fn extract_csv_preview(bytes: &[u8]) -> Result<String> {
    let decoded = String::from_utf8_lossy(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| Error::serialization().with_message(err.to_string()))?;

        rows.push(
            record
                .iter()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(", "),
        );

        if index + 1 >= MAX_PREVIEW_ROWS {
            rows.push("...".to_string());
            break;
        }
    }

    if rows.is_empty() {
        Ok("[CSV contained no rows]".to_string())
    } else {
        Ok(rows.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_hundred_rows_still_marked_truncated() {
        let body: String = (0..MAX_PREVIEW_ROWS).map(|i| format!("r{i}\n")).collect();
        let preview = extract_csv_preview(body.as_bytes()).unwrap();

        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), MAX_PREVIEW_ROWS + 1);
        assert_eq!(*lines.last().unwrap(), "...");
    }

    #[test]
    fn short_csv_not_truncated() {
        let preview = extract_csv_preview(b"x,y\n1,2\n").unwrap();
        assert_eq!(preview, "x, y\n1, 2");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let preview = extract_csv_preview(b"a,\xFFb\n").unwrap();
        assert!(preview.starts_with("a, "));
    }
}
