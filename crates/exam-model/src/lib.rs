//! Content model for multi-part listening/reading exams.
//!
//! A [`Test`] holds ordered [`Part`]s; each part is either flat (a list of
//! [`Question`]s) or grouped (a list of [`QuestionGroup`]s sharing a context),
//! as decided by the [`policy`] for its ordinal. Nodes are shared through
//! `Arc` so edits can copy only the path they touch.

pub mod aggregate;
pub mod content;
pub mod enums;
pub mod error;
pub mod exam;
pub mod ids;
pub mod part;
pub mod policy;
pub mod question;

pub use aggregate::{PartSummary, TestSummary, part_question_count, total_questions};
pub use content::{ContentTags, Media, SkillTags};
pub use enums::{Difficulty, TestKind};
pub use error::{ModelError, Result};
pub use exam::Test;
pub use ids::{AnswerLabel, TestId};
pub use part::{Part, PartContent};
pub use policy::{
    MAX_PART_ORDINAL, MIN_PART_ORDINAL, PartKind, PartOrdinal, PartShape, Section, option_labels,
    shape_for,
};
pub use question::{AnswerOption, Question, QuestionGroup};
