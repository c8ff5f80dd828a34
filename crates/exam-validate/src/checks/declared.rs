//! Declared count checks (advisory).
//!
//! Declared counts are metadata typed in by the author; they are compared
//! against the content but never corrected.

use exam_model::{Test, total_questions};

use crate::issue::Issue;

pub fn check(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();

    let actual = total_questions(test);
    if usize::try_from(test.declared_question_count).ok() != Some(actual) {
        issues.push(Issue::DeclaredQuestionCountMismatch {
            declared: test.declared_question_count,
            actual,
        });
    }

    let parts = test.parts.len();
    if usize::try_from(test.declared_part_count).ok() != Some(parts) {
        issues.push(Issue::DeclaredPartCountMismatch {
            declared: test.declared_part_count,
            actual: parts,
        });
    }

    issues
}
