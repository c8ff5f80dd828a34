//! Read-side question counts.
//!
//! These folds are the only place question totals are computed; validation
//! and display both call them.

use serde::{Deserialize, Serialize};

use crate::{Part, PartContent, PartKind, PartOrdinal, Test};

/// Number of questions in a part.
pub fn part_question_count(part: &Part) -> usize {
    match &part.content {
        PartContent::Flat { questions } => questions.len(),
        PartContent::Grouped { groups } => groups.iter().map(|group| group.questions.len()).sum(),
    }
}

/// Number of questions across every part of a test.
pub fn total_questions(test: &Test) -> usize {
    test.parts.iter().map(|part| part_question_count(part)).sum()
}

/// Per-part counts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSummary {
    pub ordinal: PartOrdinal,
    pub name: String,
    pub kind: PartKind,
    pub option_count: u8,
    pub group_count: usize,
    pub question_count: usize,
    /// First and last question numbers, when the part has questions.
    pub number_range: Option<(u32, u32)>,
}

impl PartSummary {
    pub fn from_part(part: &Part) -> Self {
        let numbers: Vec<u32> = part.questions().map(|q| q.question_number).collect();
        Self {
            ordinal: part.ordinal,
            name: part.name.clone(),
            kind: part.kind(),
            option_count: part.ordinal.shape().option_count,
            group_count: part.groups().map_or(0, <[_]>::len),
            question_count: part_question_count(part),
            number_range: numbers.first().copied().zip(numbers.last().copied()),
        }
    }
}

/// Whole-test counts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub title: String,
    pub duration_minutes: u32,
    pub declared_question_count: u32,
    pub declared_part_count: u32,
    pub total_questions: usize,
    pub parts: Vec<PartSummary>,
}

impl TestSummary {
    pub fn from_test(test: &Test) -> Self {
        Self {
            title: test.title.clone(),
            duration_minutes: test.duration_minutes.get(),
            declared_question_count: test.declared_question_count,
            declared_part_count: test.declared_part_count,
            total_questions: total_questions(test),
            parts: test
                .parts
                .iter()
                .map(|part| PartSummary::from_part(part))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{Question, QuestionGroup};

    fn flat_part(ordinal: u32, numbers: &[u32]) -> Part {
        let ordinal = PartOrdinal::new(ordinal).unwrap();
        Part {
            ordinal,
            name: ordinal.default_name(),
            content: PartContent::Flat {
                questions: numbers
                    .iter()
                    .map(|n| Arc::new(Question::blank(ordinal, *n)))
                    .collect(),
            },
        }
    }

    #[test]
    fn counts_flat_and_grouped_parts() {
        let part3 = PartOrdinal::new(3).unwrap();
        let grouped = Part {
            ordinal: part3,
            name: "Part 3".into(),
            content: PartContent::Grouped {
                groups: vec![
                    Arc::new(QuestionGroup {
                        group_context: Default::default(),
                        questions: vec![
                            Arc::new(Question::blank(part3, 3)),
                            Arc::new(Question::blank(part3, 4)),
                        ],
                    }),
                    Arc::new(QuestionGroup::default()),
                ],
            },
        };
        let mut test = Test::new("Counts", 60).unwrap();
        test.parts.push(Arc::new(flat_part(1, &[1, 2])));
        test.parts.push(Arc::new(flat_part(2, &[])));
        test.parts.push(Arc::new(grouped));

        assert_eq!(total_questions(&test), 4);
        let summary = TestSummary::from_test(&test);
        assert_eq!(summary.total_questions, 4);
        assert_eq!(summary.parts[0].number_range, Some((1, 2)));
        assert_eq!(summary.parts[1].option_count, 3);
        assert_eq!(summary.parts[1].number_range, None);
        assert_eq!(summary.parts[2].group_count, 2);
        assert_eq!(summary.parts[2].question_count, 2);
    }
}
