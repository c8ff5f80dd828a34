//! Edit sessions: one working copy of a stored test.

use exam_model::{Test, TestId};
use exam_persistence::{PersistenceError, StoredTest, TestStore};
use exam_validate::{AdvisoryPolicy, Issue, ValidationReport, gate_save, validate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::edit::{Edit, apply};
use crate::error::EditError;
use crate::tracker::DirtyTracker;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Save blocked by {} validation issue(s)", issues.len())]
    Blocked { issues: Vec<Issue> },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A working copy of one stored test.
///
/// Edits replace the working copy with a new snapshot. The copy is only
/// replaced by the stored snapshot after a successful save, so a rejected
/// save never loses edits.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: TestId,
    working: Test,
    /// Fingerprint of the stored test this session last loaded or saved.
    fingerprint: String,
    policy: AdvisoryPolicy,
    tracker: DirtyTracker,
}

impl EditSession {
    /// Start a session on a stored test. Saves gate with the store's
    /// advisory policy unless overridden with [`EditSession::with_policy`].
    pub fn open<S: TestStore + ?Sized>(store: &S, id: TestId) -> Result<Self, SessionError> {
        let stored = store.load_test(id)?;
        let policy = store.config().advisory_policy;
        Ok(Self::from_stored(stored, policy))
    }

    pub fn from_stored(stored: StoredTest, policy: AdvisoryPolicy) -> Self {
        Self {
            id: stored.id,
            working: stored.test,
            fingerprint: stored.fingerprint,
            policy,
            tracker: DirtyTracker::new(),
        }
    }

    pub fn with_policy(mut self, policy: AdvisoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(&self) -> TestId {
        self.id
    }

    pub fn test(&self) -> &Test {
        &self.working
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Edits applied since the session was opened or last saved.
    pub fn pending_edits(&self) -> usize {
        self.tracker.pending_edits()
    }

    /// Apply one edit to the working copy. On error the copy is unchanged.
    pub fn apply(&mut self, edit: &Edit) -> Result<&Test, SessionError> {
        let next = apply(&self.working, edit)?;
        debug!(id = %self.id, edit = edit.name(), "applied edit");
        self.working = next;
        self.tracker.mark_dirty();
        Ok(&self.working)
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.working)
    }

    /// Save the working copy if validation allows it and nobody else saved
    /// the test since this session loaded it.
    pub fn save<S: TestStore + ?Sized>(&mut self, store: &S) -> Result<StoredTest, SessionError> {
        let decision = gate_save(&self.validate(), self.policy);
        if decision.block_save {
            warn!(
                id = %self.id,
                issues = decision.blocking_issues.len(),
                "save blocked by validation"
            );
            return Err(SessionError::Blocked {
                issues: decision.blocking_issues,
            });
        }

        match store.save_test_if_unchanged(self.id, &self.working, &self.fingerprint) {
            Ok(stored) => {
                self.working = stored.test.clone();
                self.fingerprint = stored.fingerprint.clone();
                info!(
                    id = %self.id,
                    edits = self.tracker.pending_edits(),
                    "session saved"
                );
                self.tracker.save_complete();
                Ok(stored)
            }
            Err(err) => {
                warn!(id = %self.id, error = %err, "session save failed");
                Err(err.into())
            }
        }
    }

    /// Drop unsaved edits and reload the stored test.
    pub fn reload<S: TestStore + ?Sized>(&mut self, store: &S) -> Result<(), SessionError> {
        let stored = store.load_test(self.id)?;
        self.working = stored.test;
        self.fingerprint = stored.fingerprint;
        self.tracker = DirtyTracker::new();
        Ok(())
    }
}
