//! Partial updates for questions, groups and test metadata.
//!
//! `None` leaves a field as it is. For optional fields the inner `Option`
//! is the new value, so `Some(None)` clears the field.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use exam_model::{AnswerLabel, ContentTags, Media, ModelError, Question, SkillTags, Test, TestKind};

use crate::error::{EditError, Result};

/// Changes to one question.
///
/// Option labels and the question number are not patchable; labels come from
/// the part policy and numbers from renumbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub question_text: Option<Option<String>>,
    /// New option texts keyed by existing label.
    pub option_texts: BTreeMap<AnswerLabel, String>,
    pub correct_answer: Option<AnswerLabel>,
    pub explanation: Option<Option<String>>,
    pub media: Option<Option<Media>>,
    pub content_tags: Option<Option<ContentTags>>,
    pub skill_tags: Option<Option<SkillTags>>,
}

impl QuestionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.question_text = Some(Some(text.into()));
        self
    }

    pub fn with_option(mut self, label: AnswerLabel, text: impl Into<String>) -> Self {
        self.option_texts.insert(label, text.into());
        self
    }

    pub fn with_correct_answer(mut self, label: AnswerLabel) -> Self {
        self.correct_answer = Some(label);
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(Some(explanation.into()));
        self
    }

    /// Apply to `question`. Nothing is written if any label is unknown.
    pub(crate) fn apply_to(&self, question: &mut Question) -> Result<()> {
        if let Some(label) = self
            .option_texts
            .keys()
            .chain(self.correct_answer.iter())
            .find(|label| !question.has_option(**label))
        {
            return Err(EditError::UnknownOption(*label));
        }

        if let Some(text) = &self.question_text {
            question.question_text.clone_from(text);
        }
        for option in &mut question.options {
            if let Some(text) = self.option_texts.get(&option.label) {
                option.text.clone_from(text);
            }
        }
        if let Some(label) = self.correct_answer {
            question.correct_answer = label;
        }
        if let Some(explanation) = &self.explanation {
            question.explanation.clone_from(explanation);
        }
        if let Some(media) = &self.media {
            question.media.clone_from(media);
        }
        if let Some(tags) = &self.content_tags {
            question.content_tags.clone_from(tags);
        }
        if let Some(tags) = &self.skill_tags {
            question.skill_tags.clone_from(tags);
        }
        Ok(())
    }
}

/// Changes to a question group's shared context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub audio_url: Option<Option<String>>,
    pub image_urls: Option<Vec<String>>,
    pub passage_html: Option<Option<String>>,
    pub transcript: Option<Option<String>>,
    pub translation: Option<Option<String>>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply_to(&self, context: &mut Media) {
        if let Some(url) = &self.audio_url {
            context.audio_url.clone_from(url);
        }
        if let Some(urls) = &self.image_urls {
            context.image_urls.clone_from(urls);
        }
        if let Some(html) = &self.passage_html {
            context.passage_html.clone_from(html);
        }
        if let Some(transcript) = &self.transcript {
            context.transcript.clone_from(transcript);
        }
        if let Some(translation) = &self.translation {
            context.translation.clone_from(translation);
        }
    }
}

/// Changes to test-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub kind: Option<TestKind>,
    pub duration_minutes: Option<u32>,
    pub declared_question_count: Option<u32>,
    pub declared_part_count: Option<u32>,
}

impl MetadataPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to `test`. Nothing is written if the title or duration is invalid.
    pub(crate) fn apply_to(&self, test: &mut Test) -> Result<()> {
        let title = match &self.title {
            Some(title) if title.trim().is_empty() => return Err(ModelError::EmptyTitle.into()),
            Some(title) => Some(title.trim().to_string()),
            None => None,
        };
        let duration = self
            .duration_minutes
            .map(|minutes| NonZeroU32::new(minutes).ok_or(ModelError::InvalidDuration))
            .transpose()?;

        if let Some(title) = title {
            test.title = title;
        }
        if let Some(kind) = self.kind {
            test.kind = kind;
        }
        if let Some(duration) = duration {
            test.duration_minutes = duration;
        }
        if let Some(count) = self.declared_question_count {
            test.declared_question_count = count;
        }
        if let Some(count) = self.declared_part_count {
            test.declared_part_count = count;
        }
        Ok(())
    }
}
