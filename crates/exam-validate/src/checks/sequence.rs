//! Part ordinal sequence checks.
//!
//! Parts must be ordered 1, 2, 3, ... with no gaps or repeats. After a gap
//! the expected ordinal resumes from the part found, so one gap yields one
//! issue.

use exam_model::Test;

use crate::issue::Issue;

pub fn check(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut expected: u8 = 1;

    for (position, part) in test.parts.iter().enumerate() {
        let found = part.ordinal.get();
        if found != expected {
            issues.push(Issue::PartOutOfSequence {
                position,
                expected,
                found,
            });
        }
        if found >= expected {
            expected = found.saturating_add(1);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exam_model::{Part, PartOrdinal, Test};

    use super::*;

    fn test_with(ordinals: &[u32]) -> Test {
        let mut test = Test::new("Sequence", 60).unwrap();
        test.parts = ordinals
            .iter()
            .map(|o| Arc::new(Part::new(PartOrdinal::new(*o).unwrap())))
            .collect();
        test
    }

    #[test]
    fn gapless_sequence_passes() {
        assert!(check(&test_with(&[])).is_empty());
        assert!(check(&test_with(&[1, 2, 3, 4, 5, 6, 7])).is_empty());
    }

    #[test]
    fn gap_is_reported_once() {
        let issues = check(&test_with(&[1, 3, 4]));
        assert_eq!(
            issues,
            vec![Issue::PartOutOfSequence {
                position: 1,
                expected: 2,
                found: 3
            }]
        );
    }

    #[test]
    fn repeated_and_missing_first_part() {
        let issues = check(&test_with(&[1, 1, 2]));
        assert_eq!(issues.len(), 1);
        let issues = check(&test_with(&[2]));
        assert_eq!(
            issues,
            vec![Issue::PartOutOfSequence {
                position: 0,
                expected: 1,
                found: 2
            }]
        );
    }
}
