//! Question numbering checks.
//!
//! Reading parts in order (and groups in order within a part), question
//! numbers must run 1, 2, 3, ... with every number used once.

use std::collections::HashSet;

use exam_model::Test;

use crate::issue::Issue;

pub fn check(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();
    let mut expected: u32 = 1;

    for part in &test.parts {
        let ordinal = part.ordinal.get();
        for question in part.questions() {
            let found = question.question_number;
            if !seen.insert(found) {
                issues.push(Issue::QuestionNumberDuplicate {
                    part: ordinal,
                    question_number: found,
                });
                continue;
            }
            if found == expected {
                expected = expected.saturating_add(1);
            } else if found > expected {
                issues.push(Issue::QuestionNumberGap {
                    part: ordinal,
                    expected,
                    found,
                });
                expected = found.saturating_add(1);
            } else {
                issues.push(Issue::QuestionNumberOutOfOrder {
                    part: ordinal,
                    expected,
                    found,
                });
            }
        }
    }

    issues
}
