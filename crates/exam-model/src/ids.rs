use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::ModelError;

/// Opaque identifier assigned to a test by the store that persists it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TestId(Uuid);

impl TestId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TestId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ModelError::InvalidTestId(s.to_string()))
    }
}

/// Label of an answer choice, a single uppercase ASCII letter.
///
/// Any letter is representable so that a correct answer pointing outside the
/// option list (for example `E` on a four-option question) can be stored and
/// reported by validation instead of being rejected on input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "char", into = "char")]
pub struct AnswerLabel(char);

impl AnswerLabel {
    pub const A: AnswerLabel = AnswerLabel('A');

    pub fn new(value: char) -> Result<Self, ModelError> {
        if value.is_ascii_uppercase() {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidAnswerLabel(value.to_string()))
        }
    }

    /// Label at `index` in the sequence A, B, C, ...
    pub fn nth(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|offset| *offset < 26)
            .map(|offset| Self(char::from(b'A' + offset)))
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl TryFrom<char> for AnswerLabel {
    type Error = ModelError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnswerLabel> for char {
    fn from(label: AnswerLabel) -> Self {
        label.0
    }
}

impl FromStr for AnswerLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::new(ch.to_ascii_uppercase()),
            _ => Err(ModelError::InvalidAnswerLabel(s.to_string())),
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
