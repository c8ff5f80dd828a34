//! Sheet columns and header matching.

use std::collections::BTreeMap;

use csv::StringRecord;

use crate::error::ImportError;

/// One column of the question sheet. Declaration order is sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Part,
    PartName,
    Group,
    QuestionNumber,
    QuestionText,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    CorrectAnswer,
    Explanation,
    AudioUrl,
    ImageUrls,
    PassageHtml,
    Transcript,
    Translation,
    GroupAudioUrl,
    GroupImageUrls,
    GroupPassageHtml,
    GroupTranscript,
    GroupTranslation,
    Difficulty,
    Domain,
    Genre,
    Setting,
    Style,
    SkillPart,
    Skills,
}

/// Separator for list values inside one cell.
pub const LIST_SEPARATOR: char = '|';

impl Column {
    pub const COUNT: usize = 28;

    pub const ALL: [Column; Self::COUNT] = [
        Column::Part,
        Column::PartName,
        Column::Group,
        Column::QuestionNumber,
        Column::QuestionText,
        Column::OptionA,
        Column::OptionB,
        Column::OptionC,
        Column::OptionD,
        Column::CorrectAnswer,
        Column::Explanation,
        Column::AudioUrl,
        Column::ImageUrls,
        Column::PassageHtml,
        Column::Transcript,
        Column::Translation,
        Column::GroupAudioUrl,
        Column::GroupImageUrls,
        Column::GroupPassageHtml,
        Column::GroupTranscript,
        Column::GroupTranslation,
        Column::Difficulty,
        Column::Domain,
        Column::Genre,
        Column::Setting,
        Column::Style,
        Column::SkillPart,
        Column::Skills,
    ];

    /// Option text columns in label order.
    pub const OPTIONS: [Column; 4] = [
        Column::OptionA,
        Column::OptionB,
        Column::OptionC,
        Column::OptionD,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Part => "part",
            Column::PartName => "part_name",
            Column::Group => "group",
            Column::QuestionNumber => "question_number",
            Column::QuestionText => "question_text",
            Column::OptionA => "option_a",
            Column::OptionB => "option_b",
            Column::OptionC => "option_c",
            Column::OptionD => "option_d",
            Column::CorrectAnswer => "correct_answer",
            Column::Explanation => "explanation",
            Column::AudioUrl => "audio_url",
            Column::ImageUrls => "image_urls",
            Column::PassageHtml => "passage_html",
            Column::Transcript => "transcript",
            Column::Translation => "translation",
            Column::GroupAudioUrl => "group_audio_url",
            Column::GroupImageUrls => "group_image_urls",
            Column::GroupPassageHtml => "group_passage_html",
            Column::GroupTranscript => "group_transcript",
            Column::GroupTranslation => "group_translation",
            Column::Difficulty => "difficulty",
            Column::Domain => "domain",
            Column::Genre => "genre",
            Column::Setting => "setting",
            Column::Style => "style",
            Column::SkillPart => "skill_part",
            Column::Skills => "skills",
        }
    }

    /// Position in an exported row.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Columns a sheet must carry to be readable at all.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Column::Part | Column::QuestionNumber | Column::CorrectAnswer
        )
    }

    pub fn from_header(raw: &str) -> Option<Column> {
        let normalized = normalize_header(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.name() == normalized)
    }
}

/// Canonical header key: trimmed, BOM removed, lowercase, inner whitespace
/// and dashes folded to `_`. `"Question Number"` matches `question_number`.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed
        .split(|ch: char| ch.is_whitespace() || ch == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

pub(crate) fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Where each known column sits in the sheet.
#[derive(Debug, Clone)]
pub(crate) struct HeaderMap {
    positions: BTreeMap<Column, usize>,
}

impl HeaderMap {
    pub(crate) fn from_record(headers: &StringRecord) -> Result<Self, ImportError> {
        let mut positions = BTreeMap::new();
        for (position, raw) in headers.iter().enumerate() {
            match Column::from_header(raw) {
                Some(column) => {
                    positions.entry(column).or_insert(position);
                }
                None if !normalize_cell(raw).is_empty() => {
                    tracing::debug!(header = raw, "ignoring unknown column");
                }
                None => {}
            }
        }

        let missing: Vec<String> = Column::ALL
            .iter()
            .filter(|column| column.is_required() && !positions.contains_key(*column))
            .map(|column| column.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }
        Ok(Self { positions })
    }

    /// Normalized cell for `column`; empty when the column is absent.
    pub(crate) fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        normalize_cell(self.raw_cell(record, column))
    }

    /// Cell for `column` exactly as written.
    pub(crate) fn raw_cell<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        self.positions
            .get(&column)
            .and_then(|position| record.get(*position))
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_match_case_and_spacing_insensitively() {
        assert_eq!(Column::from_header("Question Number"), Some(Column::QuestionNumber));
        assert_eq!(Column::from_header("\u{feff}PART"), Some(Column::Part));
        assert_eq!(Column::from_header(" group-audio-url "), Some(Column::GroupAudioUrl));
        assert_eq!(Column::from_header("notes"), None);
    }

    #[test]
    fn column_order_matches_index() {
        for (position, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.index(), position);
        }
    }

    #[test]
    fn missing_required_columns() {
        let headers = StringRecord::from(vec!["Part", "question_text"]);
        let err = HeaderMap::from_record(&headers).unwrap_err();
        match err {
            ImportError::MissingColumns(columns) => {
                assert_eq!(columns, vec!["question_number", "correct_answer"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
