//! Validation of exam tests.
//!
//! [`validate`] runs every check and collects all issues; nothing
//! short-circuits and the test is never modified. Structural issues
//! ([`Severity::Error`]) block persistence, advisory ones
//! ([`Severity::Warning`]) are surfaced and gated by [`AdvisoryPolicy`].

mod category;
mod checks;
mod gate;
mod issue;
mod report;

pub use category::Category;
pub use gate::{AdvisoryPolicy, GatingDecision, gate_save};
pub use issue::{Issue, Severity};
pub use report::ValidationReport;

use exam_model::Test;
use tracing::debug;

/// Validate a test against every invariant class.
pub fn validate(test: &Test) -> ValidationReport {
    let report = ValidationReport::new(checks::run_all(test));
    debug!(
        parts = test.parts.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated test"
    );
    report
}
