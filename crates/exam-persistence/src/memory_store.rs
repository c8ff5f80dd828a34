use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use exam_model::TestId;

use crate::document::TestDocument;
use crate::error::Result;
use crate::store::{StoreConfig, TestStore};

/// In-process store keeping documents in a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: StoreConfig,
    documents: RwLock<BTreeMap<TestId, TestDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl TestStore for MemoryStore {
    fn config(&self) -> StoreConfig {
        self.config
    }

    fn read_document(&self, id: TestId) -> Result<Option<TestDocument>> {
        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        Ok(documents.get(&id).cloned())
    }

    fn write_document(&self, document: &TestDocument) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        documents.insert(document.id, document.clone());
        Ok(())
    }

    fn documents(&self) -> Result<Vec<TestDocument>> {
        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        Ok(documents.values().cloned().collect())
    }
}
