//! Persistence error types.
//!
//! Every store operation returns a structured error with a user-facing
//! message and, where one exists, a remediation hint.

use std::path::PathBuf;

use exam_ingest::{ExportError, ImportError};
use exam_model::{ModelError, TestId};
use exam_validate::Issue;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No live test has this id (never stored or soft-deleted).
    #[error("Test {0} not found")]
    NotFound(TestId),

    /// The test failed re-validation and was not written.
    #[error("Test {id} was rejected by validation ({} issue(s))", .issues.len())]
    ValidationRejected { id: TestId, issues: Vec<Issue> },

    /// The stored test changed since the caller loaded it.
    #[error("Test {id} was changed by someone else")]
    Conflict {
        id: TestId,
        expected: String,
        actual: String,
    },

    /// Title or duration rejected on creation.
    #[error(transparent)]
    InvalidMetadata(#[from] ModelError),

    #[error("Failed to import questions")]
    Import(#[from] ImportError),

    #[error("Failed to export questions")]
    Export(#[from] ExportError),

    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a stored test document.
    #[error("Invalid test document")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Document written by a newer schema.
    #[error("Test document version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    #[error("Failed to serialize test data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to deserialize test data")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(id) => format!("There is no test with id {id}."),
            Self::ValidationRejected { issues, .. } => {
                let mut message = format!(
                    "The test was not saved because it has {} problem(s):",
                    issues.len()
                );
                for issue in issues {
                    message.push_str("\n  - ");
                    message.push_str(&issue.message());
                }
                message
            }
            Self::Conflict { .. } => {
                "The test was changed since you opened it, so your changes were not saved."
                    .to_string()
            }
            Self::InvalidMetadata(err) => format!("The test details are not valid: {err}."),
            Self::Import(err) => {
                let rows = err.row_errors();
                if rows.is_empty() {
                    format!("The question sheet could not be read: {err}.")
                } else {
                    let mut message = format!(
                        "The question sheet has {} problem(s) and nothing was imported:",
                        rows.len()
                    );
                    for row in rows {
                        message.push_str("\n  - ");
                        message.push_str(&row.to_string());
                    }
                    message
                }
            }
            Self::Export(_) => "The questions could not be written as a sheet.".to_string(),
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid test document: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This test was saved by a newer version of the editor \
                    (document version {}, this version supports up to {}).",
                    found, max_supported
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the test data.".to_string()
            }
            Self::Deserialization { .. } => {
                "An error occurred while reading the test data. The file may be corrupted."
                    .to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound(_) => Some("List the stored tests to find the right id.".into()),
            Self::ValidationRejected { .. } => {
                Some("Fix the listed problems, or renumber the test, then save again.".into())
            }
            Self::Conflict { .. } => {
                Some("Reload the test to pick up the other changes, then reapply yours.".into())
            }
            Self::InvalidMetadata(_) => None,
            Self::Import(_) => {
                Some("Compare the sheet with the downloadable template.".into())
            }
            Self::Export(_) => None,
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } => {
                Some("Remove or restore the damaged document from a backup.".into())
            }
            Self::UnsupportedVersion { .. } => Some("Update to the latest version.".into()),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Try restoring a backup if you have one.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or use a different store directory.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
