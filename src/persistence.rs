//! Binary persistence for built catalogs and locators.
//!
//! Artifacts are bincode-encoded behind a small header carrying the artifact
//! kind, the crate's format version and a creation timestamp. The header is
//! checked before the payload is decoded. Files are written
//! to a temporary file next to the destination and renamed into place.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

/// Format version written into every artifact
pub const FORMAT_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode artifact: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Expected a {expected} artifact, found {found}")]
    WrongFormat { expected: String, found: String },
}

/// Header written ahead of every payload
#[derive(Serialize, Deserialize)]
struct Header {
    format: String,
    version: String,
    created_at: String,
}

impl Header {
    fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
            version: FORMAT_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn check(&self, expected: &str) -> Result<(), PersistError> {
        if self.format != expected {
            return Err(PersistError::WrongFormat {
                expected: expected.to_string(),
                found: self.format.clone(),
            });
        }
        // Version check (warn but don't fail)
        if self.version != FORMAT_VERSION {
            warn!(
                "Artifact version mismatch (expected {}, found {}, created {})",
                FORMAT_VERSION, self.version, self.created_at
            );
        }
        Ok(())
    }
}

fn write_to<W: Write, T: Serialize>(
    mut writer: W,
    format: &str,
    payload: &T,
) -> Result<(), PersistError> {
    bincode::serialize_into(&mut writer, &Header::new(format))?;
    bincode::serialize_into(&mut writer, payload)?;
    Ok(())
}

/// Encode `payload` as an artifact of kind `format`
pub(crate) fn to_bytes<T: Serialize>(format: &str, payload: &T) -> Result<Vec<u8>, PersistError> {
    let mut bytes = Vec::new();
    write_to(&mut bytes, format, payload)?;
    Ok(bytes)
}

/// Decode an artifact of kind `format`
pub(crate) fn from_bytes<T: DeserializeOwned>(
    format: &str,
    bytes: &[u8],
) -> Result<T, PersistError> {
    // Slice decoding bounds every length prefix by the remaining input
    let header: Header = bincode::deserialize(bytes)?;
    header.check(format)?;
    let offset = usize::try_from(bincode::serialized_size(&header)?).unwrap_or(usize::MAX);
    let payload = bytes.get(offset..).unwrap_or_default();
    Ok(bincode::deserialize(payload)?)
}

/// Write an artifact atomically to `path`
pub(crate) fn save<T: Serialize>(format: &str, payload: &T, path: &Path) -> Result<(), PersistError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write_to(&mut writer, format, payload)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read an artifact of kind `format` from `path`
pub(crate) fn load<T: DeserializeOwned>(format: &str, path: &Path) -> Result<T, PersistError> {
    let bytes = fs::read(path)?;
    from_bytes(format, &bytes)
}
