use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{AnswerLabel, ContentTags, Media, PartOrdinal, SkillTags};

/// A single answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: AnswerLabel,
    #[serde(default)]
    pub text: String,
}

impl AnswerOption {
    pub fn new(label: AnswerLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// One scored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    pub options: Vec<AnswerOption>,
    pub correct_answer: AnswerLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_tags: Option<ContentTags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tags: Option<SkillTags>,
}

impl Question {
    /// A fresh question for `ordinal`: blank options sized by the part's
    /// policy, `A` as the correct answer, and the part recorded in its skill
    /// tags.
    pub fn blank(ordinal: PartOrdinal, question_number: u32) -> Self {
        let options = ordinal
            .shape()
            .option_labels()
            .into_iter()
            .map(|label| AnswerOption::new(label, ""))
            .collect();
        Self {
            question_number,
            question_text: None,
            options,
            correct_answer: AnswerLabel::A,
            explanation: None,
            media: None,
            content_tags: None,
            skill_tags: Some(SkillTags {
                part: Some(ordinal.to_string()),
                skills: Vec::new(),
            }),
        }
    }

    pub fn option_labels(&self) -> impl Iterator<Item = AnswerLabel> + '_ {
        self.options.iter().map(|option| option.label)
    }

    pub fn has_option(&self, label: AnswerLabel) -> bool {
        self.option_labels().any(|candidate| candidate == label)
    }

    /// Copy of this question carrying `number`.
    pub fn with_number(&self, number: u32) -> Self {
        Self {
            question_number: number,
            ..self.clone()
        }
    }
}

/// Questions sharing one context (audio, passage, transcript).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    #[serde(default)]
    pub group_context: Media,
    #[serde(default)]
    pub questions: Vec<Arc<Question>>,
}

impl QuestionGroup {
    pub fn new(group_context: Media) -> Self {
        Self {
            group_context,
            questions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number range covered by the group, if it holds any question.
    pub fn number_range(&self) -> Option<(u32, u32)> {
        let first = self.questions.first()?.question_number;
        let last = self.questions.last()?.question_number;
        Some((first, last))
    }
}
