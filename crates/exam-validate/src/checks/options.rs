//! Option cardinality checks.
//!
//! Every question carries exactly the option count of its part, and no two
//! options share a label.

use std::collections::BTreeSet;

use exam_model::Test;

use crate::issue::Issue;

pub fn check(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();

    for part in &test.parts {
        let expected = part.ordinal.shape().option_count;
        for question in part.questions() {
            if question.options.len() != usize::from(expected) {
                issues.push(Issue::OptionCountMismatch {
                    part: part.ordinal.get(),
                    question_number: question.question_number,
                    expected,
                    found: question.options.len(),
                });
            }

            let mut seen = BTreeSet::new();
            let mut reported = BTreeSet::new();
            for label in question.option_labels() {
                if !seen.insert(label) && reported.insert(label) {
                    issues.push(Issue::DuplicateOptionLabel {
                        part: part.ordinal.get(),
                        question_number: question.question_number,
                        label,
                    });
                }
            }
        }
    }

    issues
}
