//! Sheet export.

use csv::Writer;
use exam_model::{AnswerLabel, Media, Part, PartContent, Question, Test};
use tracing::info;

use crate::columns::{Column, LIST_SEPARATOR};
use crate::error::ExportError;

/// One output row, indexed by [`Column::index`].
struct SheetRow([String; Column::COUNT]);

impl SheetRow {
    fn for_part(part: &Part) -> Self {
        let mut row = Self(std::array::from_fn(|_| String::new()));
        row.set(Column::Part, part.ordinal.to_string());
        row.set(Column::PartName, part.name.clone());
        row
    }

    fn set(&mut self, column: Column, value: String) {
        self.0[column.index()] = value;
    }

    fn set_opt(&mut self, column: Column, value: Option<&String>) {
        if let Some(value) = value {
            self.set(column, value.clone());
        }
    }

    fn set_list(&mut self, column: Column, values: &[String]) {
        self.set(column, values.join(&LIST_SEPARATOR.to_string()));
    }

    fn with_group(mut self, index: usize) -> Self {
        self.set(Column::Group, (index + 1).to_string());
        self
    }

    fn with_group_context(mut self, context: &Media) -> Self {
        self.set_opt(Column::GroupAudioUrl, context.audio_url.as_ref());
        self.set_list(Column::GroupImageUrls, &context.image_urls);
        self.set_opt(Column::GroupPassageHtml, context.passage_html.as_ref());
        self.set_opt(Column::GroupTranscript, context.transcript.as_ref());
        self.set_opt(Column::GroupTranslation, context.translation.as_ref());
        self
    }

    fn with_question(mut self, question: &Question) -> Self {
        self.set(Column::QuestionNumber, question.question_number.to_string());
        self.set_opt(Column::QuestionText, question.question_text.as_ref());
        for (position, column) in Column::OPTIONS.iter().enumerate() {
            let text = AnswerLabel::nth(position).and_then(|label| {
                question
                    .options
                    .iter()
                    .find(|option| option.label == label)
                    .map(|option| option.text.clone())
            });
            if let Some(text) = text {
                self.set(*column, text);
            }
        }
        self.set(Column::CorrectAnswer, question.correct_answer.to_string());
        self.set_opt(Column::Explanation, question.explanation.as_ref());

        if let Some(media) = &question.media {
            self.set_opt(Column::AudioUrl, media.audio_url.as_ref());
            self.set_list(Column::ImageUrls, &media.image_urls);
            self.set_opt(Column::PassageHtml, media.passage_html.as_ref());
            self.set_opt(Column::Transcript, media.transcript.as_ref());
            self.set_opt(Column::Translation, media.translation.as_ref());
        }
        if let Some(tags) = &question.content_tags {
            if let Some(difficulty) = tags.difficulty {
                self.set(Column::Difficulty, difficulty.to_string());
            }
            self.set_list(Column::Domain, &tags.domain);
            self.set_list(Column::Genre, &tags.genre);
            self.set_list(Column::Setting, &tags.setting);
            self.set_opt(Column::Style, tags.style.as_ref());
        }
        if let Some(tags) = &question.skill_tags {
            self.set_opt(Column::SkillPart, tags.part.as_ref());
            self.set_list(Column::Skills, &tags.skills);
        }
        self
    }
}

fn sheet_rows(part: &Part) -> Vec<SheetRow> {
    match &part.content {
        PartContent::Flat { questions } if questions.is_empty() => vec![SheetRow::for_part(part)],
        PartContent::Flat { questions } => questions
            .iter()
            .map(|question| SheetRow::for_part(part).with_question(question))
            .collect(),
        PartContent::Grouped { groups } if groups.is_empty() => vec![SheetRow::for_part(part)],
        PartContent::Grouped { groups } => {
            let mut rows = Vec::new();
            for (index, group) in groups.iter().enumerate() {
                let first = SheetRow::for_part(part)
                    .with_group(index)
                    .with_group_context(&group.group_context);
                let Some((head, tail)) = group.questions.split_first() else {
                    rows.push(first);
                    continue;
                };
                rows.push(first.with_question(head));
                rows.extend(tail.iter().map(|question| {
                    SheetRow::for_part(part)
                        .with_group(index)
                        .with_question(question)
                }));
            }
            rows
        }
    }
}

/// Write every part of `test` as a question sheet.
///
/// Group context is written on the first row of each group only.
pub fn write_test_csv(test: &Test) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(Column::ALL.iter().map(Column::name))?;

    let mut rows = 0usize;
    for part in &test.parts {
        for row in sheet_rows(part) {
            writer.write_record(&row.0)?;
            rows += 1;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.into_error()))?;
    info!(rows, parts = test.parts.len(), "exported question sheet");
    Ok(bytes)
}
