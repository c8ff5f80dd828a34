//! Validation categories, one per invariant class.

use serde::{Deserialize, Serialize};

/// Invariant class an issue belongs to.
///
/// Declaration order is reporting priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Part ordinals form 1..N without gaps.
    PartSequence,
    /// Part content kind matches the part-shape policy.
    PartShape,
    /// Option count and label uniqueness.
    OptionCount,
    /// Correct answer refers to an existing option.
    CorrectAnswer,
    /// Question numbers are unique and contiguous in reading order.
    Numbering,
    /// Declared counts match the content.
    Declaration,
    /// Groups hold at least one question.
    Completeness,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[
            Self::PartSequence,
            Self::PartShape,
            Self::OptionCount,
            Self::CorrectAnswer,
            Self::Numbering,
            Self::Declaration,
            Self::Completeness,
        ]
    }

    /// Reporting priority, 1 first.
    pub fn priority(&self) -> u8 {
        match self {
            Self::PartSequence => 1,
            Self::PartShape => 2,
            Self::OptionCount => 3,
            Self::CorrectAnswer => 4,
            Self::Numbering => 5,
            Self::Declaration => 6,
            Self::Completeness => 7,
        }
    }

    /// Structural classes block persistence.
    pub fn is_structural(&self) -> bool {
        self.priority() <= 5
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PartSequence => "Part Sequence",
            Self::PartShape => "Part Shape",
            Self::OptionCount => "Options",
            Self::CorrectAnswer => "Correct Answer",
            Self::Numbering => "Numbering",
            Self::Declaration => "Declaration",
            Self::Completeness => "Completeness",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PartSequence => "Parts are numbered 1..N without gaps",
            Self::PartShape => "Each part stores questions or groups as its number requires",
            Self::OptionCount => "Questions carry the option count of their part",
            Self::CorrectAnswer => "The correct answer names one of the options",
            Self::Numbering => "Question numbers run 1, 2, 3, ... across the test",
            Self::Declaration => "Declared question and part counts match the content",
            Self::Completeness => "Question groups are not empty",
        }
    }
}
