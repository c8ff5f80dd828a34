//! Validation check modules.
//!
//! Each module checks one invariant class and returns every issue it finds.

mod answers;
mod declared;
mod groups;
mod numbering;
mod options;
mod sequence;
mod shape;

use exam_model::Test;

use crate::issue::Issue;

/// Run all checks on a test. No check short-circuits another.
pub fn run_all(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Part ordinals run 1..N
    issues.extend(sequence::check(test));

    // 2. Content kind matches the part-shape policy
    issues.extend(shape::check(test));

    // 3. Option count and label uniqueness
    issues.extend(options::check(test));

    // 4. Correct answer refers to an option
    issues.extend(answers::check(test));

    // 5. Question numbers unique and contiguous
    issues.extend(numbering::check(test));

    // 6. Declared counts (advisory)
    issues.extend(declared::check(test));

    // 7. Empty groups (advisory)
    issues.extend(groups::check(test));

    issues
}
