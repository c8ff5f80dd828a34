//! Save gating.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;
use crate::report::ValidationReport;

/// How advisory issues affect a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryPolicy {
    /// Advisory issues are reported but the save proceeds.
    #[default]
    Allow,
    /// Advisory issues block the save like structural ones.
    Block,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatingDecision {
    pub block_save: bool,
    pub blocking_issues: Vec<Issue>,
}

/// Decide whether a test with `report` may be saved.
///
/// Structural issues always block.
pub fn gate_save(report: &ValidationReport, policy: AdvisoryPolicy) -> GatingDecision {
    let blocking_issues: Vec<Issue> = report
        .issues
        .iter()
        .filter(|issue| issue.is_structural() || policy == AdvisoryPolicy::Block)
        .cloned()
        .collect();
    GatingDecision {
        block_save: !blocking_issues.is_empty(),
        blocking_issues,
    }
}
