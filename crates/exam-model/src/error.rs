use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown part ordinal {0} (expected 1-7)")]
    UnknownPartOrdinal(u32),
    #[error("cannot derive a part ordinal from part name {0:?}")]
    UnparseablePartName(String),
    #[error("invalid answer label {0:?} (expected a single uppercase letter)")]
    InvalidAnswerLabel(String),
    #[error("test title must not be empty")]
    EmptyTitle,
    #[error("test duration must be greater than zero minutes")]
    InvalidDuration,
    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),
    #[error("unknown test kind {0:?}")]
    UnknownTestKind(String),
    #[error("invalid test id {0:?}")]
    InvalidTestId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
