//! Reference value lists.

use std::path::Path;

use crate::parsing::{delimiter_for, ParseError};

/// Read reference values from a file.
///
/// Without `column`, the file holds one value per line; blank lines and lines
/// starting with `#` are skipped. With `column`, the file is a CSV/TSV table
/// with a header row and values are taken from the named column
/// (case-insensitive).
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Empty`
/// if no value is found, or other parse errors if the content is invalid.
pub fn parse_values_file(path: &Path, column: Option<&str>) -> Result<Vec<String>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    match column {
        Some(column) => parse_values_column(&content, column, delimiter_for(path)),
        None => parse_values_text(&content),
    }
}

/// One value per line
///
/// # Errors
///
/// Returns `ParseError::Empty` if no value is found.
pub fn parse_values_text(text: &str) -> Result<Vec<String>, ParseError> {
    let values: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if values.is_empty() {
        return Err(ParseError::Empty("reference values".to_string()));
    }
    Ok(values)
}

/// Values of the `column` column of a table with a header row
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the column is missing,
/// `ParseError::Csv` on malformed rows, or `ParseError::Empty` if the column
/// holds no value.
pub fn parse_values_column(
    text: &str,
    column: &str,
    delimiter: u8,
) -> Result<Vec<String>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Column '{}' not found (available: {})",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(index).filter(|v| !v.is_empty()) {
            values.push(value.to_string());
        }
    }

    if values.is_empty() {
        return Err(ParseError::Empty(format!("values in column '{column}'")));
    }
    Ok(values)
}
