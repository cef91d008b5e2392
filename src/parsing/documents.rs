//! Document folders.
//!
//! Every regular file of a folder is one document. The document id is the
//! file name up to the first `_`, without a `.gz` and then a `.txt` suffix:
//! `XS0123_prospectus.txt`, `XS0123.txt` and `XS0123.txt.gz` all have id
//! `XS0123`.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::parsing::ParseError;

/// One document read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub path: PathBuf,
    pub text: String,
}

/// Document id for a file name
pub fn document_id(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".gz").unwrap_or(file_name);
    let stem = stem.strip_suffix(".txt").unwrap_or(stem);
    stem.split('_').next().unwrap_or(stem).to_string()
}

/// Read a document as text; `.gz` files are decompressed.
///
/// Invalid UTF-8 is replaced rather than rejected: normalization drops
/// non-ASCII characters anyway.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed.
pub fn read_document_text(path: &Path) -> Result<String, ParseError> {
    let mut bytes = Vec::new();
    let file = File::open(path)?;
    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("gz")) {
        GzDecoder::new(file).read_to_end(&mut bytes)?;
    } else {
        let mut file = file;
        file.read_to_end(&mut bytes)?;
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read every document of `dir`, sorted by id.
///
/// Hidden files and subdirectories are skipped. When two files share an id
/// the first in file-name order is kept.
///
/// # Errors
///
/// Returns `ParseError::Io` if the folder or a file cannot be read, or
/// `ParseError::Empty` if the folder holds no document.
pub fn read_documents(dir: &Path) -> Result<Vec<Document>, ParseError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping file with a non UTF-8 name: {}", path.display());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        paths.push((name.to_string(), path));
    }
    paths.sort();

    let mut seen = HashSet::new();
    let mut documents: Vec<Document> = Vec::with_capacity(paths.len());
    for (name, path) in paths {
        let id = document_id(&name);
        if !seen.insert(id.clone()) {
            warn!("Duplicate document id {} ({}), keeping the first", id, name);
            continue;
        }
        let text = read_document_text(&path)?;
        debug!("Read document {} from {} ({} bytes)", id, name, text.len());
        documents.push(Document { id, path, text });
    }

    if documents.is_empty() {
        return Err(ParseError::Empty(format!("documents in {}", dir.display())));
    }

    documents.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_document_id() {
        assert_eq!(document_id("XS0123_prospectus.txt"), "XS0123");
        assert_eq!(document_id("XS0123.txt"), "XS0123");
        assert_eq!(document_id("XS0123.txt.gz"), "XS0123");
        assert_eq!(document_id("XS0123"), "XS0123");
        assert_eq!(document_id("XS0123_a_b.html"), "XS0123");
    }

    #[test]
    fn test_read_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("XS2_final.txt"), "issued by Beta Bank plc").unwrap();
        std::fs::write(dir.path().join("XS1.txt"), "issued by Acme").unwrap();
        std::fs::write(dir.path().join(".hidden"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let gz = File::create(dir.path().join("XS3.txt.gz")).unwrap();
        let mut encoder = GzEncoder::new(gz, Compression::default());
        encoder.write_all(b"compressed text").unwrap();
        encoder.finish().unwrap();

        let documents = read_documents(dir.path()).unwrap();
        let ids: Vec<_> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["XS1", "XS2", "XS3"]);
        assert_eq!(documents[1].text, "issued by Beta Bank plc");
        assert_eq!(documents[2].text, "compressed text");
    }

    #[test]
    fn test_read_documents_duplicate_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("XS1_a.txt"), "first").unwrap();
        std::fs::write(dir.path().join("XS1_b.txt"), "second").unwrap();
        let documents = read_documents(dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "first");
    }

    #[test]
    fn test_read_documents_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_documents(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::Empty(_)));
    }

    #[test]
    fn test_read_document_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, [b'a', 0xff, b'b']).unwrap();
        assert_eq!(read_document_text(&path).unwrap(), "a\u{fffd}b");
    }
}
