use std::path::Path;

use crate::core::types::{GlobalReplacement, SynonymPair};
use crate::parsing::{delimiter_for, record_line, table_reader, ParseError};

/// First-column names that mark a header row in a synonym table
const SYNONYM_HEADERS: [&str; 3] = ["from", "synonym", "phrase"];

/// First-column names that mark a header row in a replacement table
const REPLACEMENT_HEADERS: [&str; 2] = ["trigger", "when"];

/// Parse a synonym table file with columns: from, to
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_synonyms_file(path: &Path) -> Result<Vec<SynonymPair>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_synonyms_text(&content, delimiter_for(path))
}

/// Parse synonym table text with columns: from, to
///
/// An empty table is valid: a catalog does not need synonyms.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 2 fields.
pub fn parse_synonyms_text(text: &str, delimiter: u8) -> Result<Vec<SynonymPair>, ParseError> {
    let rows = parse_rows(text, delimiter, 2, &SYNONYM_HEADERS)?;
    Ok(rows
        .into_iter()
        .map(|fields| SynonymPair::new(fields[0].as_str(), fields[1].as_str()))
        .collect())
}

/// Parse a replacement table file with columns: trigger, from, to
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_replacements_file(path: &Path) -> Result<Vec<GlobalReplacement>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_replacements_text(&content, delimiter_for(path))
}

/// Parse replacement table text with columns: trigger, from, to
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 3 fields.
pub fn parse_replacements_text(
    text: &str,
    delimiter: u8,
) -> Result<Vec<GlobalReplacement>, ParseError> {
    let rows = parse_rows(text, delimiter, 3, &REPLACEMENT_HEADERS)?;
    Ok(rows
        .into_iter()
        .map(|fields| {
            GlobalReplacement::new(fields[0].as_str(), fields[1].as_str(), fields[2].as_str())
        })
        .collect())
}

/// Rows of at least `min_fields` fields, header row skipped
fn parse_rows(
    text: &str,
    delimiter: u8,
    min_fields: usize,
    header_names: &[&str],
) -> Result<Vec<Vec<String>>, ParseError> {
    let mut rows = Vec::new();
    let mut first_data_line = true;

    for record in table_reader(text, delimiter).records() {
        let record = record?;

        // Check if first non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = record.get(0).map(str::to_lowercase).unwrap_or_default();
            if header_names.contains(&first.as_str()) {
                continue;
            }
        }

        if record.len() < min_fields {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has fewer than {} fields",
                record_line(&record),
                min_fields
            )));
        }

        rows.push(record.iter().take(min_fields).map(str::to_string).collect());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_synonyms_csv() {
        let csv = "from,to\ncapital,cap\ncorporation,corp\n";
        let pairs = parse_synonyms_text(csv, b',').unwrap();
        assert_eq!(
            pairs,
            vec![
                SynonymPair::new("capital", "cap"),
                SynonymPair::new("corporation", "corp"),
            ]
        );
    }

    #[test]
    fn test_parse_synonyms_tsv_no_header() {
        let tsv = "capital\tcap\nlimited\tltd\n";
        let pairs = parse_synonyms_text(tsv, b'\t').unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], SynonymPair::new("limited", "ltd"));
    }

    #[test]
    fn test_parse_synonyms_comments_before_header() {
        let csv = "# abbreviations\n\nfrom,to\ncapital,cap\n";
        let pairs = parse_synonyms_text(csv, b',').unwrap();
        assert_eq!(pairs, vec![SynonymPair::new("capital", "cap")]);
    }

    #[test]
    fn test_parse_synonyms_quoted_phrase() {
        let csv = "\"public limited company\",plc\n";
        let pairs = parse_synonyms_text(csv, b',').unwrap();
        assert_eq!(pairs, vec![SynonymPair::new("public limited company", "plc")]);
    }

    #[test]
    fn test_parse_synonyms_short_row() {
        let csv = "capital,cap\ncorporation\n";
        let err = parse_synonyms_text(csv, b',').unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("Line 2")));
    }

    #[test]
    fn test_parse_synonyms_empty() {
        assert!(parse_synonyms_text("# nothing yet\n", b',').unwrap().is_empty());
    }

    #[test]
    fn test_parse_replacements() {
        let tsv = "trigger\tfrom\tto\nacme group\tacf\tacme capital funding\n";
        let replacements = parse_replacements_text(tsv, b'\t').unwrap();
        assert_eq!(
            replacements,
            vec![GlobalReplacement::new(
                "acme group",
                "acf",
                "acme capital funding"
            )]
        );
    }

    #[test]
    fn test_parse_replacements_short_row() {
        let err = parse_replacements_text("acme group,acf\n", b',').unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_synonyms_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synonyms.tsv");
        std::fs::write(&path, "capital\tcap\n").unwrap();
        let pairs = parse_synonyms_file(&path).unwrap();
        assert_eq!(pairs, vec![SynonymPair::new("capital", "cap")]);
    }
}
