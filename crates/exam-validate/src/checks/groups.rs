//! Group completeness checks (advisory).

use exam_model::Test;

use crate::issue::Issue;

/// Flag every question group that holds no question.
pub fn check(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();

    for part in &test.parts {
        let Some(groups) = part.groups() else {
            continue;
        };
        for (group_index, group) in groups.iter().enumerate() {
            if group.is_empty() {
                issues.push(Issue::EmptyGroup {
                    part: part.ordinal.get(),
                    group_index,
                });
            }
        }
    }

    issues
}
