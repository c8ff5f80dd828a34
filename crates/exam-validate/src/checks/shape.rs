//! Part content shape checks.

use exam_model::Test;

use crate::issue::Issue;

/// Check that every part stores its content in the kind its ordinal requires.
pub fn check(test: &Test) -> Vec<Issue> {
    test.parts
        .iter()
        .filter_map(|part| {
            let expected = part.ordinal.shape().kind;
            let found = part.kind();
            (expected != found).then(|| Issue::PartShapeMismatch {
                part: part.ordinal.get(),
                expected,
                found,
            })
        })
        .collect()
}
