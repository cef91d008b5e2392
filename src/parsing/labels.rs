//! Label files: document id → entity value.
//!
//! Multiple entities for one document are joined with `|` inside the value.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::parsing::{record_line, table_reader, ParseError};

/// Labels keyed by document id, ordered for stable output
pub type Labels = BTreeMap<String, String>;

/// First-column names that mark a header row
const LABEL_HEADERS: [&str; 3] = ["id", "isin", "document"];

/// Read a two-column CSV label file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_labels_file(path: &Path) -> Result<Labels, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_labels_text(&content)
}

/// Parse two-column CSV label text.
///
/// The first row is skipped when it looks like a header. A repeated id keeps
/// its first value.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 2 fields.
pub fn parse_labels_text(text: &str) -> Result<Labels, ParseError> {
    let mut labels = Labels::new();
    let mut first_data_line = true;

    for record in table_reader(text, b',').records() {
        let record = record?;

        if first_data_line {
            first_data_line = false;
            let first = record.get(0).map(str::to_lowercase).unwrap_or_default();
            if LABEL_HEADERS.contains(&first.as_str()) {
                continue;
            }
        }

        let (Some(id), Some(value)) = (record.get(0), record.get(1)) else {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has fewer than 2 fields",
                record_line(&record)
            )));
        };

        if labels.contains_key(id) {
            warn!("Duplicate label for {}, keeping the first", id);
            continue;
        }
        labels.insert(id.to_string(), value.to_string());
    }

    Ok(labels)
}

/// Write labels as a two-column CSV file with an `id,value` header
///
/// # Errors
///
/// Returns `ParseError::Csv` or `ParseError::Io` if the file cannot be written.
pub fn write_labels_file(path: &Path, labels: &Labels) -> Result<(), ParseError> {
    let mut writer = csv::Writer::from_path(path)?;
    write_labels(&mut writer, labels)?;
    writer.flush()?;
    Ok(())
}

/// Write labels with an `id,value` header to any CSV writer
///
/// # Errors
///
/// Returns `ParseError::Csv` if a record cannot be written.
pub fn write_labels<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    labels: &Labels,
) -> Result<(), ParseError> {
    writer.write_record(["id", "value"])?;
    for (id, value) in labels {
        writer.write_record([id.as_str(), value.as_str()])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_with_header() {
        let csv = "id,value\nXS1,Acme Capital Funding\nXS2,\"Beta Bank plc, London\"\n";
        let labels = parse_labels_text(csv).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["XS1"], "Acme Capital Funding");
        assert_eq!(labels["XS2"], "Beta Bank plc, London");
    }

    #[test]
    fn test_parse_labels_no_header_duplicate() {
        let labels = parse_labels_text("XS1,Acme\nXS1,Beta\n").unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels["XS1"], "Acme");
    }

    #[test]
    fn test_parse_labels_short_row() {
        let err = parse_labels_text("XS1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_write_then_read_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        let mut labels = Labels::new();
        labels.insert("XS2".to_string(), "Beta Bank plc|Acme Capital Funding".to_string());
        labels.insert("XS1".to_string(), "Acme Capital Funding, Inc".to_string());

        write_labels_file(&path, &labels).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("id,value\nXS1,"));
        assert_eq!(parse_labels_file(&path).unwrap(), labels);
    }
}
