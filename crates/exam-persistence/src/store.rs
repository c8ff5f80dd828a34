//! The store contract.
//!
//! Backends only read and write whole [`TestDocument`]s; everything else
//! (re-validation, conflict checks, soft deletion, sheet import and export)
//! is provided here so every backend behaves the same.

use exam_ingest::{read_test_csv, template_csv, write_test_csv};
use exam_model::{Test, TestId};
use exam_validate::{AdvisoryPolicy, gate_save, validate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::{StoredTest, TestDocument, TestListing};
use crate::error::{PersistenceError, Result};
use crate::fingerprint::fingerprint;

/// Store-side save policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Whether advisory issues block saves. Structural issues always do.
    pub advisory_policy: AdvisoryPolicy,
}

impl StoreConfig {
    pub fn strict() -> Self {
        Self {
            advisory_policy: AdvisoryPolicy::Block,
        }
    }
}

pub trait TestStore: Send + Sync {
    fn config(&self) -> StoreConfig;

    /// The document with `id`, soft-deleted or not.
    fn read_document(&self, id: TestId) -> Result<Option<TestDocument>>;

    /// Replace the document with the same id, or add it.
    fn write_document(&self, document: &TestDocument) -> Result<()>;

    /// Every stored document, soft-deleted ones included.
    fn documents(&self) -> Result<Vec<TestDocument>>;

    /// Create an empty test with only its title and duration.
    fn create_test(&self, title: &str, duration_minutes: u32) -> Result<StoredTest> {
        let test = Test::new(title, duration_minutes)?;
        let document = TestDocument::new(TestId::new_random(), test);
        self.write_document(&document)?;
        info!(id = %document.id, "created test");
        document.to_stored()
    }

    fn load_test(&self, id: TestId) -> Result<StoredTest> {
        live_document(self, id)?.to_stored()
    }

    /// Replace the stored test after re-validating it.
    fn save_test(&self, id: TestId, test: &Test) -> Result<StoredTest> {
        let document = live_document(self, id)?;
        write_validated(self, document, test)
    }

    /// Like [`TestStore::save_test`], but fails with
    /// [`PersistenceError::Conflict`] when the stored test no longer has
    /// `expected_fingerprint`.
    fn save_test_if_unchanged(
        &self,
        id: TestId,
        test: &Test,
        expected_fingerprint: &str,
    ) -> Result<StoredTest> {
        let document = live_document(self, id)?;
        let actual = fingerprint(&document.test)?;
        if actual != expected_fingerprint {
            warn!(%id, "save rejected: stored test changed");
            return Err(PersistenceError::Conflict {
                id,
                expected: expected_fingerprint.to_string(),
                actual,
            });
        }
        write_validated(self, document, test)
    }

    /// Soft-delete: the document stays but the test is no longer loadable.
    fn delete_test(&self, id: TestId) -> Result<()> {
        let mut document = live_document(self, id)?;
        document.deleted_at = Some(chrono::Utc::now());
        self.write_document(&document)?;
        info!(%id, "deleted test");
        Ok(())
    }

    /// Live tests, most recently updated first.
    fn list_tests(&self) -> Result<Vec<TestListing>> {
        let mut listings: Vec<TestListing> = self
            .documents()?
            .iter()
            .filter(|document| !document.is_deleted())
            .map(TestDocument::listing)
            .collect();
        listings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(listings)
    }

    /// Replace the parts of a stored test with those of a question sheet.
    fn import_questions(&self, id: TestId, bytes: &[u8]) -> Result<StoredTest> {
        let document = live_document(self, id)?;
        let imported = read_test_csv(bytes, &document.test)?;
        write_validated(self, document, &imported)
    }

    fn export_test(&self, id: TestId) -> Result<Vec<u8>> {
        let document = live_document(self, id)?;
        Ok(write_test_csv(&document.test)?)
    }

    fn download_template(&self) -> Vec<u8> {
        template_csv()
    }
}

fn live_document<S: TestStore + ?Sized>(store: &S, id: TestId) -> Result<TestDocument> {
    store
        .read_document(id)?
        .filter(|document| !document.is_deleted())
        .ok_or(PersistenceError::NotFound(id))
}

fn write_validated<S: TestStore + ?Sized>(
    store: &S,
    mut document: TestDocument,
    test: &Test,
) -> Result<StoredTest> {
    let id = document.id;
    let report = validate(test);
    let decision = gate_save(&report, store.config().advisory_policy);
    if decision.block_save {
        warn!(
            %id,
            issues = decision.blocking_issues.len(),
            "save rejected by validation"
        );
        return Err(PersistenceError::ValidationRejected {
            id,
            issues: decision.blocking_issues,
        });
    }

    document.test = test.clone();
    document.touch();
    store.write_document(&document)?;
    info!(
        %id,
        parts = test.parts.len(),
        warnings = report.warning_count(),
        "saved test"
    );
    document.to_stored()
}
