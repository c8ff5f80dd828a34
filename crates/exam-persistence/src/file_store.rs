//! Directory-backed store: one `<id>.json` document per test.

use std::fs;
use std::path::{Path, PathBuf};

use exam_model::{Test, TestId};
use tracing::warn;

use crate::document::{StoredTest, TestDocument};
use crate::error::{PersistenceError, Result};
use crate::io::{load_document, save_document};
use crate::store::{StoreConfig, TestStore};

const DOCUMENT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    config: StoreConfig,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: root.clone(),
            source: e,
        })?;
        Ok(Self {
            root,
            config: StoreConfig::default(),
        })
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: TestId) -> PathBuf {
        self.root.join(format!("{id}.{DOCUMENT_EXTENSION}"))
    }

    /// Load a test on tokio's blocking pool.
    pub async fn load_test_async(&self, id: TestId) -> Result<StoredTest> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load_test(id))
            .await
            .map_err(|e| PersistenceError::Deserialization {
                source: Box::new(e),
            })?
    }

    /// Save a test on tokio's blocking pool.
    ///
    /// The caller's test is not touched; dropping the future before it
    /// resolves leaves the outcome of the write unknown but never partial.
    pub async fn save_test_async(&self, id: TestId, test: Test) -> Result<StoredTest> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save_test(id, &test))
            .await
            .map_err(|e| PersistenceError::Serialization {
                source: Box::new(e),
            })?
    }
}

impl TestStore for FileStore {
    fn config(&self) -> StoreConfig {
        self.config
    }

    fn read_document(&self, id: TestId) -> Result<Option<TestDocument>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        load_document(&path).map(Some)
    }

    fn write_document(&self, document: &TestDocument) -> Result<()> {
        save_document(document, &self.path_for(document.id))
    }

    /// Unreadable documents are logged and skipped.
    fn documents(&self) -> Result<Vec<TestDocument>> {
        let entries = fs::read_dir(&self.root).map_err(|e| PersistenceError::Io {
            operation: "read",
            path: self.root.clone(),
            source: e,
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| PersistenceError::Io {
                    operation: "read",
                    path: self.root.clone(),
                    source: e,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            match load_document(&path) {
                Ok(document) => documents.push(document),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable document"),
            }
        }
        Ok(documents)
    }
}
