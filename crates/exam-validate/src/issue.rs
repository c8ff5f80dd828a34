//! Validation issue types.
//!
//! Each variant carries only the data its message needs.

use exam_model::{AnswerLabel, PartKind};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Structural violation; the test must not be saved.
    Error,
    /// Advisory mismatch; surfaced, not blocking by default.
    Warning,
}

/// Validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Part sequence
    /// Part at `position` carries the wrong ordinal.
    PartOutOfSequence {
        position: usize,
        expected: u8,
        found: u8,
    },

    // Part shape
    /// Part content is stored in the other shape.
    PartShapeMismatch {
        part: u8,
        expected: PartKind,
        found: PartKind,
    },

    // Options
    /// Question has the wrong number of options for its part.
    OptionCountMismatch {
        part: u8,
        question_number: u32,
        expected: u8,
        found: usize,
    },
    /// Two options of one question share a label.
    DuplicateOptionLabel {
        part: u8,
        question_number: u32,
        label: AnswerLabel,
    },

    // Correct answer
    /// Correct answer names no option.
    InvalidCorrectAnswer {
        part: u8,
        question_number: u32,
        answer: AnswerLabel,
        labels: Vec<AnswerLabel>,
    },

    // Numbering
    /// Question number already used earlier in the test.
    QuestionNumberDuplicate { part: u8, question_number: u32 },
    /// Question number skips ahead of the expected one.
    QuestionNumberGap { part: u8, expected: u32, found: u32 },
    /// Question number is lower than the expected one.
    QuestionNumberOutOfOrder { part: u8, expected: u32, found: u32 },

    // Declaration
    /// Declared question count differs from the content.
    DeclaredQuestionCountMismatch { declared: u32, actual: usize },
    /// Declared part count differs from the content.
    DeclaredPartCountMismatch { declared: u32, actual: usize },

    // Completeness
    /// Group without questions.
    EmptyGroup { part: u8, group_index: usize },
}

impl Issue {
    /// Stable rule identifier.
    pub fn rule_id(&self) -> &'static str {
        match self {
            Issue::PartOutOfSequence { .. } => "TS101",
            Issue::PartShapeMismatch { .. } => "TS201",
            Issue::OptionCountMismatch { .. } => "TS301",
            Issue::DuplicateOptionLabel { .. } => "TS302",
            Issue::InvalidCorrectAnswer { .. } => "TS401",
            Issue::QuestionNumberDuplicate { .. } => "TS501",
            Issue::QuestionNumberGap { .. } => "TS502",
            Issue::QuestionNumberOutOfOrder { .. } => "TS503",
            Issue::DeclaredQuestionCountMismatch { .. } => "TS601",
            Issue::DeclaredPartCountMismatch { .. } => "TS602",
            Issue::EmptyGroup { .. } => "TS701",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Issue::PartOutOfSequence { .. } => Category::PartSequence,
            Issue::PartShapeMismatch { .. } => Category::PartShape,
            Issue::OptionCountMismatch { .. } | Issue::DuplicateOptionLabel { .. } => {
                Category::OptionCount
            }
            Issue::InvalidCorrectAnswer { .. } => Category::CorrectAnswer,
            Issue::QuestionNumberDuplicate { .. }
            | Issue::QuestionNumberGap { .. }
            | Issue::QuestionNumberOutOfOrder { .. } => Category::Numbering,
            Issue::DeclaredQuestionCountMismatch { .. }
            | Issue::DeclaredPartCountMismatch { .. } => Category::Declaration,
            Issue::EmptyGroup { .. } => Category::Completeness,
        }
    }

    pub fn severity(&self) -> Severity {
        if self.category().is_structural() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    pub fn is_structural(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Part ordinal the issue points at, when it concerns a single part.
    pub fn part(&self) -> Option<u8> {
        match self {
            Issue::PartOutOfSequence { found, .. } => Some(*found),
            Issue::PartShapeMismatch { part, .. }
            | Issue::OptionCountMismatch { part, .. }
            | Issue::DuplicateOptionLabel { part, .. }
            | Issue::InvalidCorrectAnswer { part, .. }
            | Issue::QuestionNumberDuplicate { part, .. }
            | Issue::QuestionNumberGap { part, .. }
            | Issue::QuestionNumberOutOfOrder { part, .. }
            | Issue::EmptyGroup { part, .. } => Some(*part),
            Issue::DeclaredQuestionCountMismatch { .. }
            | Issue::DeclaredPartCountMismatch { .. } => None,
        }
    }

    /// Question number the issue points at, when it concerns one question.
    pub fn question_number(&self) -> Option<u32> {
        match self {
            Issue::OptionCountMismatch {
                question_number, ..
            }
            | Issue::DuplicateOptionLabel {
                question_number, ..
            }
            | Issue::InvalidCorrectAnswer {
                question_number, ..
            }
            | Issue::QuestionNumberDuplicate {
                question_number, ..
            } => Some(*question_number),
            Issue::QuestionNumberGap { found, .. }
            | Issue::QuestionNumberOutOfOrder { found, .. } => Some(*found),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::PartOutOfSequence {
                position,
                expected,
                found,
            } => format!(
                "Part at position {} is Part {} but Part {} was expected",
                position + 1,
                found,
                expected
            ),
            Issue::PartShapeMismatch {
                part,
                expected,
                found,
            } => format!("Part {part} stores {found} content but must be {expected}"),
            Issue::OptionCountMismatch {
                part,
                question_number,
                expected,
                found,
            } => format!(
                "Question {question_number} in Part {part} has {found} options; Part {part} requires {expected}"
            ),
            Issue::DuplicateOptionLabel {
                question_number,
                label,
                ..
            } => format!("Question {question_number} has more than one option labelled {label}"),
            Issue::InvalidCorrectAnswer {
                question_number,
                answer,
                labels,
                ..
            } => {
                let labels: Vec<String> = labels.iter().map(ToString::to_string).collect();
                format!(
                    "Question {} has correct answer {} which is not one of its options ({})",
                    question_number,
                    answer,
                    labels.join(", ")
                )
            }
            Issue::QuestionNumberDuplicate {
                part,
                question_number,
            } => format!("Question number {question_number} in Part {part} is used more than once"),
            Issue::QuestionNumberGap {
                part,
                expected,
                found,
            } => format!(
                "Question numbering jumps from {} to {} in Part {} (expected {})",
                expected.saturating_sub(1),
                found,
                part,
                expected
            ),
            Issue::QuestionNumberOutOfOrder {
                part,
                expected,
                found,
            } => format!(
                "Question number {found} in Part {part} is out of order (expected {expected})"
            ),
            Issue::DeclaredQuestionCountMismatch { declared, actual } => format!(
                "Test declares {declared} questions but contains {actual}"
            ),
            Issue::DeclaredPartCountMismatch { declared, actual } => {
                format!("Test declares {declared} parts but contains {actual}")
            }
            Issue::EmptyGroup { part, group_index } => format!(
                "Group {} in Part {} has no questions",
                group_index + 1,
                part
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_classes_are_errors() {
        let gap = Issue::QuestionNumberGap {
            part: 1,
            expected: 3,
            found: 4,
        };
        assert_eq!(gap.severity(), Severity::Error);
        assert_eq!(gap.rule_id(), "TS502");
        assert_eq!(gap.question_number(), Some(4));
        assert_eq!(
            gap.message(),
            "Question numbering jumps from 2 to 4 in Part 1 (expected 3)"
        );

        let declared = Issue::DeclaredQuestionCountMismatch {
            declared: 200,
            actual: 10,
        };
        assert_eq!(declared.severity(), Severity::Warning);
        assert_eq!(declared.part(), None);

        let empty = Issue::EmptyGroup {
            part: 3,
            group_index: 0,
        };
        assert_eq!(empty.severity(), Severity::Warning);
        assert_eq!(empty.message(), "Group 1 in Part 3 has no questions");
    }
}
