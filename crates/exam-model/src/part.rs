use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{PartKind, PartOrdinal, Question, QuestionGroup};

/// Content of a part. Exactly one storage shape exists per part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PartContent {
    Flat {
        #[serde(default)]
        questions: Vec<Arc<Question>>,
    },
    Grouped {
        #[serde(default)]
        groups: Vec<Arc<QuestionGroup>>,
    },
}

impl PartContent {
    /// Empty content of the given kind.
    pub fn empty(kind: PartKind) -> Self {
        match kind {
            PartKind::Flat => PartContent::Flat {
                questions: Vec::new(),
            },
            PartKind::Grouped => PartContent::Grouped { groups: Vec::new() },
        }
    }

    pub fn kind(&self) -> PartKind {
        match self {
            PartContent::Flat { .. } => PartKind::Flat,
            PartContent::Grouped { .. } => PartKind::Grouped,
        }
    }
}

/// A numbered section of a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub ordinal: PartOrdinal,
    pub name: String,
    pub content: PartContent,
}

impl Part {
    /// An empty part with the content shape its ordinal dictates.
    pub fn new(ordinal: PartOrdinal) -> Self {
        Self {
            ordinal,
            name: ordinal.default_name(),
            content: PartContent::empty(ordinal.shape().kind),
        }
    }

    pub fn kind(&self) -> PartKind {
        self.content.kind()
    }

    /// Flat question list, when this part is flat.
    pub fn flat_questions(&self) -> Option<&[Arc<Question>]> {
        match &self.content {
            PartContent::Flat { questions } => Some(questions),
            PartContent::Grouped { .. } => None,
        }
    }

    /// Group list, when this part is grouped.
    pub fn groups(&self) -> Option<&[Arc<QuestionGroup>]> {
        match &self.content {
            PartContent::Flat { .. } => None,
            PartContent::Grouped { groups } => Some(groups),
        }
    }

    /// Every question in reading order, flattening groups.
    pub fn questions(&self) -> impl Iterator<Item = &Question> + '_ {
        let (flat, grouped) = match &self.content {
            PartContent::Flat { questions } => (questions.as_slice(), [].as_slice()),
            PartContent::Grouped { groups } => ([].as_slice(), groups.as_slice()),
        };
        flat.iter().map(|question| &**question).chain(
            grouped
                .iter()
                .flat_map(|group| group.questions.iter().map(|question| &**question)),
        )
    }

    /// Highest question number in the part, if any.
    pub fn max_question_number(&self) -> Option<u32> {
        self.questions().map(|q| q.question_number).max()
    }

    pub fn is_empty(&self) -> bool {
        crate::part_question_count(self) == 0
            && self.groups().is_none_or(<[Arc<QuestionGroup>]>::is_empty)
    }
}
