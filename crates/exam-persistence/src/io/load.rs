//! Document loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::document::{CURRENT_SCHEMA_VERSION, TestDocument};
use crate::error::{PersistenceError, Result};

#[derive(Deserialize)]
struct VersionProbe {
    schema_version: Option<u32>,
}

/// Load a document from a JSON file.
pub fn load_document(path: &Path) -> Result<TestDocument> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_document_bytes(&bytes, path)
}

/// Check the schema version, then deserialize.
fn parse_document_bytes(bytes: &[u8], path: &Path) -> Result<TestDocument> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("not a JSON object ({e})"),
        })?;

    let Some(version) = probe.schema_version else {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "missing schema_version".to_string(),
        });
    };

    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let document: TestDocument =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::Deserialization {
            source: Box::new(e),
        })?;

    tracing::debug!("Loaded test document from {}", path.display());
    Ok(document)
}
