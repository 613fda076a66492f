//! CSV import.
//!
//! Parses delimited text into row arrays with optional column filtering and
//! header removal.

use std::fs;
use std::io;

use crate::error::{Error, Result};
use crate::files;

/// Column selector for [`CsvOptions::fields`].
///
/// Names are resolved against the header row (row 0), positions are
/// zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Index(usize),
    Name(String),
}

/// Options for CSV imports.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Column delimiter, `,` by default.
    pub delimiter: u8,
    /// Field enclosure, `"` by default.
    pub quote: u8,
    /// Drop the first row after parsing (and after column filtering).
    pub remove_header: bool,
    /// Restrict the output to these columns, in the order listed.
    pub fields: Option<Vec<Column>>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            remove_header: false,
            fields: None,
        }
    }
}

/// Import CSV from a reader and return its rows.
///
/// Rows may have ragged lengths; quoted fields may span lines.
pub fn csv_from_reader<R: io::Read>(reader: R, options: &CsvOptions) -> Result<Vec<Vec<String>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }

    if let Some(fields) = &options.fields {
        rows = filter_columns(rows, fields);
    }

    if options.remove_header && !rows.is_empty() {
        rows.remove(0);
    }

    Ok(rows)
}

/// Import CSV from a string or filename and return its rows.
///
/// Dual input, matching common call sites: a string carrying a file
/// extension is treated as a path, anything else as raw CSV content. Use
/// [`csv_from_reader`] when the sniffing is not wanted.
pub fn csv(input: &str, options: &CsvOptions) -> Result<Vec<Vec<String>>> {
    if files::file_info(input).extension.is_some() {
        let file = fs::File::open(input).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::FileNotFound(input.to_string())
            } else {
                Error::Io(e)
            }
        })?;
        csv_from_reader(file, options)
    } else {
        csv_from_reader(input.as_bytes(), options)
    }
}

/// Keep only the selected columns, in the order they were listed.
///
/// Unknown header names are skipped; rows with none of the selected columns
/// drop out entirely.
fn filter_columns(rows: Vec<Vec<String>>, fields: &[Column]) -> Vec<Vec<String>> {
    let header = rows.first().cloned().unwrap_or_default();

    let mut filtered: Vec<Vec<String>> = vec![Vec::new(); rows.len()];
    for field in fields {
        let index = match field {
            Column::Index(index) => Some(*index),
            Column::Name(name) => header.iter().position(|cell| cell == name),
        };

        let Some(index) = index else {
            continue;
        };

        for (row_index, row) in rows.iter().enumerate() {
            if let Some(value) = row.get(index) {
                filtered[row_index].push(value.clone());
            }
        }
    }

    filtered.retain(|row| !row.is_empty());
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "firstname,lastname\nJohn,Doe\nJane,Doe\n";

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn csv_parses_all_rows() {
        let result = csv(CSV, &CsvOptions::default()).unwrap();
        assert_eq!(
            result,
            rows(&[
                &["firstname", "lastname"],
                &["John", "Doe"],
                &["Jane", "Doe"],
            ])
        );
    }

    #[test]
    fn csv_remove_header() {
        let options = CsvOptions {
            remove_header: true,
            ..Default::default()
        };
        let result = csv(CSV, &options).unwrap();
        assert_eq!(result, rows(&[&["John", "Doe"], &["Jane", "Doe"]]));
    }

    #[test]
    fn csv_fields_by_position() {
        let options = CsvOptions {
            remove_header: true,
            fields: Some(vec![Column::Index(0)]),
            ..Default::default()
        };
        let result = csv(CSV, &options).unwrap();
        assert_eq!(result, rows(&[&["John"], &["Jane"]]));
    }

    #[test]
    fn csv_fields_keep_header_row() {
        let options = CsvOptions {
            fields: Some(vec![Column::Index(1)]),
            ..Default::default()
        };
        let result = csv(CSV, &options).unwrap();
        assert_eq!(result, rows(&[&["lastname"], &["Doe"], &["Doe"]]));
    }

    #[test]
    fn csv_fields_by_header_name() {
        let options = CsvOptions {
            remove_header: true,
            fields: Some(vec![Column::Name("firstname".to_string())]),
            ..Default::default()
        };
        let result = csv(CSV, &options).unwrap();
        assert_eq!(result, rows(&[&["John"], &["Jane"]]));
    }

    #[test]
    fn csv_fields_reorder_columns() {
        let options = CsvOptions {
            remove_header: true,
            fields: Some(vec![
                Column::Name("lastname".to_string()),
                Column::Name("firstname".to_string()),
            ]),
            ..Default::default()
        };
        let result = csv(CSV, &options).unwrap();
        assert_eq!(result, rows(&[&["Doe", "John"], &["Doe", "Jane"]]));
    }

    #[test]
    fn csv_unknown_field_name_is_skipped() {
        let options = CsvOptions {
            fields: Some(vec![Column::Name("missing".to_string())]),
            ..Default::default()
        };
        let result = csv(CSV, &options).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn csv_quoted_field_spans_lines() {
        let raw = "firstname,text\nJohn,\"Hello\nWorld\"\n";
        let result = csv(raw, &CsvOptions::default()).unwrap();
        assert_eq!(
            result,
            rows(&[&["firstname", "text"], &["John", "Hello\nWorld"]])
        );
    }

    #[test]
    fn csv_single_cell_content() {
        let result = csv("foobarcontent", &CsvOptions::default()).unwrap();
        assert_eq!(result, rows(&[&["foobarcontent"]]));
    }

    #[test]
    fn csv_custom_delimiter() {
        let options = CsvOptions {
            delimiter: b';',
            ..Default::default()
        };
        let result = csv("a;b\nc;d", &options).unwrap();
        assert_eq!(result, rows(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn csv_missing_file_errors() {
        let err = csv("/nonexistent/data.csv", &CsvOptions::default()).unwrap_err();
        assert_eq!(err.code(), "FILE_NOT_FOUND");
    }
}
