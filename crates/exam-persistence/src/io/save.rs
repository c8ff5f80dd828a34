//! Document saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::document::TestDocument;
use crate::error::{PersistenceError, Result};

/// Write a document as pretty JSON.
///
/// Uses atomic write (temp file + rename) so a crash never leaves a
/// half-written document behind.
pub fn save_document(document: &TestDocument, path: &Path) -> Result<()> {
    let bytes =
        serde_json::to_vec_pretty(document).map_err(|e| PersistenceError::Serialization {
            source: Box::new(e),
        })?;

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!("Saved test document to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_model::{Test, TestId};
    use tempfile::tempdir;

    #[test]
    fn writes_json_without_leaving_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        let document = TestDocument::new(TestId::new_random(), Test::new("Sample", 60).unwrap());

        save_document(&document, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["test"]["title"], "Sample");
    }
}
