use serde::{Deserialize, Serialize};

use crate::issue::{Issue, Severity};

/// Result of validating one test. An empty report means the test is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Build a report ordered by category priority, keeping check order
    /// within a category.
    pub fn new(mut issues: Vec<Issue>) -> Self {
        issues.sort_by_key(Issue::category);
        Self { issues }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Blocking issues.
    pub fn structural(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.issues.iter().filter(|issue| issue.is_structural())
    }

    /// Non-blocking issues.
    pub fn advisory(&self) -> impl Iterator<Item = &Issue> + '_ {
        self.issues.iter().filter(|issue| !issue.is_structural())
    }
}
