use exam_model::{AnswerLabel, ModelError, PartKind};
use thiserror::Error;

/// Errors from update algebra operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// An operation for one content kind was used on a part of the other kind.
    #[error("Part {part} is {found} but the operation requires a {expected} part")]
    ShapeMismatch {
        part: u8,
        expected: PartKind,
        found: PartKind,
    },

    #[error("Part {0} does not exist in this test")]
    PartNotFound(u8),

    #[error("Part {part} has no question at index {index} (it has {len})")]
    QuestionIndexOutOfRange { part: u8, index: usize, len: usize },

    #[error("Part {part} has no group at index {index} (it has {len})")]
    GroupIndexOutOfRange { part: u8, index: usize, len: usize },

    #[error("The test already has all {0} parts")]
    PartLimitReached(u8),

    #[error("The test has no parts")]
    NoParts,

    #[error("Name {name:?} refers to a different part than Part {part}")]
    PartNameMismatch { part: u8, name: String },

    #[error("Question has no option labelled {0}")]
    UnknownOption(AnswerLabel),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, EditError>;
