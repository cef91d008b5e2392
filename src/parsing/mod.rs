//! Loaders for the inputs of the command-line tools.
//!
//! This module provides parsers for:
//!
//! - **Reference lists**: one value per line, or one column of a CSV file
//! - **Synonym tables**: two-column CSV/TSV (`from`, `to`)
//! - **Replacement tables**: three-column CSV/TSV (`trigger`, `from`, `to`)
//! - **Label files**: two-column CSV (`id`, `value`), read and written
//! - **Document folders**: plain or gzip-compressed text files keyed by id
//!
//! ## Example
//!
//! ```rust,no_run
//! use entity_locator::parsing::{documents, values};
//! use std::path::Path;
//!
//! let names = values::parse_values_file(Path::new("issuers.txt"), None).unwrap();
//! let docs = documents::read_documents(Path::new("prospectuses/")).unwrap();
//! println!("{} names, {} documents", names.len(), docs.len());
//! ```
//!
//! Tables are delimited by tabs when the file extension is `.tsv` or `.tab`
//! and by commas otherwise. Lines starting with `#` are comments, and a
//! first row that looks like a header is skipped.

use std::path::Path;

use thiserror::Error;

pub mod documents;
pub mod labels;
pub mod tsv;
pub mod values;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("No {0} found")]
    Empty(String),
}

/// Field delimiter implied by the file extension
pub fn delimiter_for(path: &Path) -> u8 {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("tsv" | "tab") => b'\t',
        _ => b',',
    }
}

/// A headerless, comment-aware CSV reader over `text`
pub(crate) fn table_reader(text: &str, delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes())
}

/// 1-based line of a record, for error messages
pub(crate) fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}
