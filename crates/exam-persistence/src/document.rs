//! Stored document types.

use chrono::{DateTime, Utc};
use exam_model::{Test, TestId, TestKind, total_questions};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fingerprint::fingerprint;

/// Current document schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// One test as written to storage, including its bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDocument {
    /// Schema version (for future migrations).
    pub schema_version: u32,
    pub id: TestId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the test is soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub test: Test,
}

impl TestDocument {
    pub fn new(id: TestId, test: Test) -> Self {
        let now = Utc::now();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            test,
        }
    }

    /// Update the last saved timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn to_stored(&self) -> Result<StoredTest> {
        Ok(StoredTest {
            id: self.id,
            test: self.test.clone(),
            fingerprint: fingerprint(&self.test)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub fn listing(&self) -> TestListing {
        TestListing {
            id: self.id,
            title: self.test.title.clone(),
            kind: self.test.kind,
            duration_minutes: self.test.duration_minutes.get(),
            part_count: self.test.parts.len(),
            question_count: total_questions(&self.test),
            updated_at: self.updated_at,
        }
    }
}

/// A live test as handed to callers.
///
/// `fingerprint` identifies the stored content; pass it back to
/// [`crate::TestStore::save_test_if_unchanged`] to detect concurrent edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTest {
    pub id: TestId,
    pub test: Test,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary row for listing stored tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestListing {
    pub id: TestId,
    pub title: String,
    pub kind: TestKind,
    pub duration_minutes: u32,
    pub part_count: usize,
    pub question_count: usize,
    pub updated_at: DateTime<Utc>,
}
