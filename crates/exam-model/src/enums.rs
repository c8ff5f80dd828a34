//! Type-safe enumerations for exam metadata.
//!
//! These are stored as strings in imported sheets and persisted documents;
//! parsing is case-insensitive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// CEFR difficulty band of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    A1,
    A2,
    B1,
    B2,
    C1,
}

impl Difficulty {
    pub const fn all() -> &'static [Self] {
        &[Self::A1, Self::A2, Self::B1, Self::B2, Self::C1]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::A1 => "A1",
            Difficulty::A2 => "A2",
            Difficulty::B1 => "B1",
            Difficulty::B2 => "B2",
            Difficulty::C1 => "C1",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownDifficulty(s.to_string()))
    }
}

/// Kind of test being authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Full listening and reading test.
    #[default]
    Full,
    /// Listening section only.
    Listening,
    /// Reading section only.
    Reading,
    /// Short practice set.
    Practice,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Full => "full",
            TestKind::Listening => "listening",
            TestKind::Reading => "reading",
            TestKind::Practice => "practice",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "full test" => Ok(TestKind::Full),
            "listening" => Ok(TestKind::Listening),
            "reading" => Ok(TestKind::Reading),
            "practice" | "mini" => Ok(TestKind::Practice),
            _ => Err(ModelError::UnknownTestKind(s.to_string())),
        }
    }
}
