//! Sheet import.
//!
//! One row per question. A row with an empty `question_number` declares its
//! part (or, with `group` set, an empty group) without adding a question.
//! Group context and part names may be repeated on later rows but must not
//! disagree with the first value seen.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use exam_model::{
    AnswerLabel, AnswerOption, ContentTags, Difficulty, Media, Part, PartContent, PartKind,
    PartOrdinal, Question, QuestionGroup, SkillTags, Test,
};
use exam_validate::{Category, Issue, validate};
use tracing::{info, warn};

use crate::columns::{Column, HeaderMap, LIST_SEPARATOR, normalize_cell};
use crate::error::{ImportError, RowError};

/// Read a question sheet and return `base` with its parts replaced.
///
/// Metadata (title, duration, declared counts) comes from `base`. Fails
/// without a partial result: every row problem and every structural issue
/// of the resulting test is reported at once.
pub fn read_test_csv(bytes: &[u8], base: &Test) -> Result<Test, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = HeaderMap::from_record(reader.headers()?)?;

    let mut sheet = SheetBuilder::default();
    let mut errors = Vec::new();
    let mut rows = 0usize;
    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                errors.push(RowError::new(row, None, err.to_string()));
                continue;
            }
        };
        if record.iter().all(|cell| normalize_cell(cell).is_empty()) {
            continue;
        }
        rows += 1;
        sheet.push_row(row, &RowCells::new(&headers, &record), &mut errors);
    }

    if !errors.is_empty() {
        warn!(rows, errors = errors.len(), "import rejected");
        return Err(ImportError::Rows(errors));
    }

    let (parts, locations) = sheet.finish();
    let mut test = base.clone();
    test.parts = parts;

    let structural = locate_structural_issues(&test, &locations);
    if !structural.is_empty() {
        warn!(rows, errors = structural.len(), "imported sheet has structural issues");
        return Err(ImportError::Rows(structural));
    }

    info!(rows, parts = test.parts.len(), "imported question sheet");
    Ok(test)
}

struct RowCells<'a> {
    headers: &'a HeaderMap,
    record: &'a StringRecord,
}

impl<'a> RowCells<'a> {
    fn new(headers: &'a HeaderMap, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Trimmed cell, for identifiers, numbers and labels.
    fn get(&self, column: Column) -> &'a str {
        self.headers.cell(self.record, column)
    }

    /// Untrimmed cell, for text and HTML content.
    fn content(&self, column: Column) -> &'a str {
        self.headers.raw_cell(self.record, column)
    }

    fn text(&self, column: Column) -> Option<String> {
        let value = self.content(column);
        (!value.is_empty()).then(|| value.to_string())
    }

    fn list(&self, column: Column) -> Vec<String> {
        self.get(column)
            .split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Rows on which each part and each question number appeared.
#[derive(Debug, Default)]
struct RowLocations {
    parts: BTreeMap<u8, usize>,
    questions: BTreeMap<(u8, u32), Vec<usize>>,
}

#[derive(Debug)]
struct GroupDraft {
    key: String,
    context: Media,
    questions: Vec<Arc<Question>>,
}

#[derive(Debug)]
enum DraftContent {
    Flat(Vec<Arc<Question>>),
    Grouped(Vec<GroupDraft>),
}

#[derive(Debug)]
struct PartDraft {
    name: Option<String>,
    content: DraftContent,
}

#[derive(Debug, Default)]
struct SheetBuilder {
    parts: BTreeMap<PartOrdinal, PartDraft>,
    locations: RowLocations,
}

impl SheetBuilder {
    fn push_row(&mut self, row: usize, cells: &RowCells<'_>, errors: &mut Vec<RowError>) {
        let raw_part = cells.get(Column::Part);
        let ordinal = match PartOrdinal::from_part_name(raw_part) {
            Ok(ordinal) => ordinal,
            Err(_) if raw_part.is_empty() => {
                errors.push(RowError::new(row, Some(Column::Part.name()), "part is required"));
                return;
            }
            Err(err) => {
                errors.push(RowError::new(row, Some(Column::Part.name()), err.to_string()));
                return;
            }
        };
        self.locations.parts.entry(ordinal.get()).or_insert(row);

        let draft = self.parts.entry(ordinal).or_insert_with(|| PartDraft {
            name: None,
            content: match ordinal.shape().kind {
                PartKind::Flat => DraftContent::Flat(Vec::new()),
                PartKind::Grouped => DraftContent::Grouped(Vec::new()),
            },
        });
        let name = cells.content(Column::PartName);
        if ordinal.name_conflicts(name) {
            errors.push(RowError::new(
                row,
                Some(Column::PartName.name()),
                format!("{name:?} does not name Part {ordinal}"),
            ));
        } else {
            merge_text(&mut draft.name, name, row, Column::PartName, errors);
        }

        let group_key = cells.get(Column::Group);
        let has_question = !cells.get(Column::QuestionNumber).is_empty();

        let questions = match &mut draft.content {
            DraftContent::Flat(questions) => {
                if !group_key.is_empty() {
                    errors.push(RowError::new(
                        row,
                        Some(Column::Group.name()),
                        format!("Part {ordinal} holds questions directly and has no groups"),
                    ));
                    return;
                }
                questions
            }
            DraftContent::Grouped(groups) => {
                if group_key.is_empty() {
                    if has_question {
                        errors.push(RowError::new(
                            row,
                            Some(Column::Group.name()),
                            format!("questions in Part {ordinal} must name their group"),
                        ));
                    }
                    return;
                }
                let position = match groups.iter().position(|group| group.key == group_key) {
                    Some(position) => position,
                    None => {
                        groups.push(GroupDraft {
                            key: group_key.to_string(),
                            context: Media::default(),
                            questions: Vec::new(),
                        });
                        groups.len() - 1
                    }
                };
                let group = &mut groups[position];
                merge_group_context(&mut group.context, cells, row, errors);
                &mut group.questions
            }
        };

        if !has_question {
            return;
        }
        if let Some(question) = parse_question(ordinal, cells, row, errors) {
            self.locations
                .questions
                .entry((ordinal.get(), question.question_number))
                .or_default()
                .push(row);
            questions.push(Arc::new(question));
        }
    }

    fn finish(self) -> (Vec<Arc<Part>>, RowLocations) {
        let parts = self
            .parts
            .into_iter()
            .map(|(ordinal, draft)| {
                let content = match draft.content {
                    DraftContent::Flat(questions) => PartContent::Flat { questions },
                    DraftContent::Grouped(groups) => PartContent::Grouped {
                        groups: groups
                            .into_iter()
                            .map(|group| {
                                Arc::new(QuestionGroup {
                                    group_context: group.context,
                                    questions: group.questions,
                                })
                            })
                            .collect(),
                    },
                };
                Arc::new(Part {
                    ordinal,
                    name: draft.name.unwrap_or_else(|| ordinal.default_name()),
                    content,
                })
            })
            .collect();
        (parts, self.locations)
    }
}

/// Keep the first non-empty value; report later values that differ.
fn merge_text(
    slot: &mut Option<String>,
    value: &str,
    row: usize,
    column: Column,
    errors: &mut Vec<RowError>,
) {
    if value.is_empty() {
        return;
    }
    match slot {
        None => *slot = Some(value.to_string()),
        Some(existing) if existing != value => errors.push(RowError::new(
            row,
            Some(column.name()),
            format!("conflicts with earlier value {existing:?}"),
        )),
        Some(_) => {}
    }
}

fn merge_group_context(
    context: &mut Media,
    cells: &RowCells<'_>,
    row: usize,
    errors: &mut Vec<RowError>,
) {
    merge_text(
        &mut context.audio_url,
        cells.content(Column::GroupAudioUrl),
        row,
        Column::GroupAudioUrl,
        errors,
    );
    merge_text(
        &mut context.passage_html,
        cells.content(Column::GroupPassageHtml),
        row,
        Column::GroupPassageHtml,
        errors,
    );
    merge_text(
        &mut context.transcript,
        cells.content(Column::GroupTranscript),
        row,
        Column::GroupTranscript,
        errors,
    );
    merge_text(
        &mut context.translation,
        cells.content(Column::GroupTranslation),
        row,
        Column::GroupTranslation,
        errors,
    );

    let images = cells.list(Column::GroupImageUrls);
    if images.is_empty() {
        return;
    }
    if context.image_urls.is_empty() {
        context.image_urls = images;
    } else if context.image_urls != images {
        errors.push(RowError::new(
            row,
            Some(Column::GroupImageUrls.name()),
            "conflicts with the images given earlier for this group",
        ));
    }
}

fn parse_question(
    ordinal: PartOrdinal,
    cells: &RowCells<'_>,
    row: usize,
    errors: &mut Vec<RowError>,
) -> Option<Question> {
    let before = errors.len();
    let mut error = |column: Column, message: String| {
        errors.push(RowError::new(row, Some(column.name()), message));
    };

    let raw_number = cells.get(Column::QuestionNumber);
    let number = match raw_number.parse::<u32>() {
        Ok(number) if number > 0 => Some(number),
        _ => {
            error(
                Column::QuestionNumber,
                format!("{raw_number:?} is not a positive whole number"),
            );
            None
        }
    };

    let labels = ordinal.shape().option_labels();
    let mut options = Vec::with_capacity(labels.len());
    for (position, column) in Column::OPTIONS.iter().enumerate() {
        let text = cells.content(*column);
        match labels.get(position) {
            Some(label) => options.push(AnswerOption::new(*label, text)),
            None if !text.trim().is_empty() => error(
                *column,
                format!(
                    "Part {ordinal} questions have {} options; this column must be empty",
                    labels.len()
                ),
            ),
            None => {}
        }
    }

    let raw_answer = cells.get(Column::CorrectAnswer);
    let correct_answer = if raw_answer.is_empty() {
        error(Column::CorrectAnswer, "correct answer is required".to_string());
        None
    } else {
        match AnswerLabel::from_str(raw_answer) {
            Ok(label) => Some(label),
            Err(err) => {
                error(Column::CorrectAnswer, err.to_string());
                None
            }
        }
    };

    let raw_difficulty = cells.get(Column::Difficulty);
    let difficulty = if raw_difficulty.is_empty() {
        None
    } else {
        match Difficulty::from_str(raw_difficulty) {
            Ok(difficulty) => Some(difficulty),
            Err(err) => {
                error(Column::Difficulty, err.to_string());
                None
            }
        }
    };

    if errors.len() > before {
        return None;
    }

    let media = Media {
        audio_url: cells.text(Column::AudioUrl),
        image_urls: cells.list(Column::ImageUrls),
        passage_html: cells.text(Column::PassageHtml),
        transcript: cells.text(Column::Transcript),
        translation: cells.text(Column::Translation),
    };
    let content_tags = ContentTags {
        difficulty,
        domain: cells.list(Column::Domain),
        genre: cells.list(Column::Genre),
        setting: cells.list(Column::Setting),
        style: cells.text(Column::Style),
    };
    let skill_tags = SkillTags {
        part: cells.text(Column::SkillPart),
        skills: cells.list(Column::Skills),
    };

    Some(Question {
        question_number: number?,
        question_text: cells.text(Column::QuestionText),
        options,
        correct_answer: correct_answer?,
        explanation: cells.text(Column::Explanation),
        media: (!media.is_empty()).then_some(media),
        content_tags: (!content_tags.is_empty()).then_some(content_tags),
        skill_tags: (!skill_tags.is_empty()).then_some(skill_tags),
    })
}

/// Structural issues of the imported test, pointed at the rows that caused
/// them.
fn locate_structural_issues(test: &Test, locations: &RowLocations) -> Vec<RowError> {
    validate(test)
        .structural()
        .map(|issue| {
            let column = match issue.category() {
                Category::PartSequence | Category::PartShape => Column::Part,
                Category::OptionCount => Column::OptionA,
                Category::CorrectAnswer => Column::CorrectAnswer,
                _ => Column::QuestionNumber,
            };
            RowError {
                row: issue_row(issue, locations),
                column: Some(column.name().to_string()),
                message: issue.message(),
            }
        })
        .collect()
}

fn issue_row(issue: &Issue, locations: &RowLocations) -> Option<usize> {
    let part = issue.part()?;
    let Some(number) = issue.question_number() else {
        return locations.parts.get(&part).copied();
    };
    let rows = locations.questions.get(&(part, number))?;
    match issue {
        // The repeat, not the first use, is the offending row.
        Issue::QuestionNumberDuplicate { .. } => rows.last().copied(),
        _ => rows.first().copied(),
    }
}
