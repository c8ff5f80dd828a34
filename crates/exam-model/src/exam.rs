use std::num::NonZeroU32;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Part, PartOrdinal, TestKind};

/// A complete test: metadata plus its ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub title: String,
    #[serde(default)]
    pub kind: TestKind,
    pub duration_minutes: NonZeroU32,
    #[serde(default)]
    pub declared_question_count: u32,
    #[serde(default)]
    pub declared_part_count: u32,
    #[serde(default)]
    pub parts: Vec<Arc<Part>>,
}

impl Test {
    /// A new test with only its title and duration set.
    pub fn new(title: impl Into<String>, duration_minutes: u32) -> Result<Self, ModelError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        let duration_minutes =
            NonZeroU32::new(duration_minutes).ok_or(ModelError::InvalidDuration)?;
        Ok(Self {
            title: title.trim().to_string(),
            kind: TestKind::default(),
            duration_minutes,
            declared_question_count: 0,
            declared_part_count: 0,
            parts: Vec::new(),
        })
    }

    /// Position of the part with `ordinal` in `parts`.
    pub fn part_index(&self, ordinal: PartOrdinal) -> Option<usize> {
        self.parts.iter().position(|part| part.ordinal == ordinal)
    }

    pub fn part(&self, ordinal: PartOrdinal) -> Option<&Part> {
        self.part_index(ordinal).map(|index| &*self.parts[index])
    }

    /// Ordinal of the last part, if any.
    pub fn last_ordinal(&self) -> Option<PartOrdinal> {
        self.parts.last().map(|part| part.ordinal)
    }
}
