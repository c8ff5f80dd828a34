//! Part-shape policy.
//!
//! The ordinal of a part decides how its content is stored and how many
//! answer choices each of its questions carries:
//!
//! | Part | Kind    | Options | Section   |
//! |------|---------|---------|-----------|
//! | 1    | Flat    | 4       | Listening |
//! | 2    | Flat    | 3       | Listening |
//! | 3    | Grouped | 4       | Listening |
//! | 4    | Grouped | 4       | Listening |
//! | 5    | Flat    | 4       | Reading   |
//! | 6    | Grouped | 4       | Reading   |
//! | 7    | Grouped | 4       | Reading   |
//!
//! Ordinals outside 1-7 are rejected, never defaulted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnswerLabel, ModelError};

/// Lowest valid part ordinal.
pub const MIN_PART_ORDINAL: u8 = 1;
/// Highest valid part ordinal.
pub const MAX_PART_ORDINAL: u8 = 7;

/// Storage shape of a part's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// A direct list of questions.
    Flat,
    /// A list of question groups, each sharing one context.
    Grouped,
}

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Flat => "flat",
            PartKind::Grouped => "grouped",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exam section a part belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Listening,
    Reading,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Listening => "Listening",
            Section::Reading => "Reading",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content shape and option cardinality for one part ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartShape {
    pub kind: PartKind,
    pub option_count: u8,
}

impl PartShape {
    /// Labels of the options a new question in this part is created with.
    pub fn option_labels(&self) -> Vec<AnswerLabel> {
        option_labels(self.option_count)
    }
}

/// Look up the shape for a raw ordinal.
pub fn shape_for(ordinal: u32) -> Result<PartShape, ModelError> {
    let shape = match ordinal {
        1 | 5 => PartShape {
            kind: PartKind::Flat,
            option_count: 4,
        },
        2 => PartShape {
            kind: PartKind::Flat,
            option_count: 3,
        },
        3 | 4 | 6 | 7 => PartShape {
            kind: PartKind::Grouped,
            option_count: 4,
        },
        other => return Err(ModelError::UnknownPartOrdinal(other)),
    };
    Ok(shape)
}

/// Labels `A, B, C, ...` for `count` options.
pub fn option_labels(count: u8) -> Vec<AnswerLabel> {
    (0..usize::from(count))
        .filter_map(AnswerLabel::nth)
        .collect()
}

/// A part number known to be within 1-7.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct PartOrdinal(u8);

impl PartOrdinal {
    pub const FIRST: PartOrdinal = PartOrdinal(MIN_PART_ORDINAL);
    pub const LAST: PartOrdinal = PartOrdinal(MAX_PART_ORDINAL);

    pub fn new(value: u32) -> Result<Self, ModelError> {
        match u8::try_from(value) {
            Ok(v) if (MIN_PART_ORDINAL..=MAX_PART_ORDINAL).contains(&v) => Ok(Self(v)),
            _ => Err(ModelError::UnknownPartOrdinal(value)),
        }
    }

    /// Every valid ordinal in ascending order.
    pub fn all() -> impl Iterator<Item = PartOrdinal> {
        (MIN_PART_ORDINAL..=MAX_PART_ORDINAL).map(PartOrdinal)
    }

    /// Extract the ordinal from a display name such as `"Part 3"` or
    /// `"Part 6: Text Completion"`.
    pub fn from_part_name(name: &str) -> Result<Self, ModelError> {
        let digits: String = name
            .trim()
            .trim_start_matches(|ch: char| !ch.is_ascii_digit())
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let value: u32 = digits
            .parse()
            .map_err(|_| ModelError::UnparseablePartName(name.to_string()))?;
        Self::new(value)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// True when `name` reads "Part N..." for some N other than this part.
    pub fn name_conflicts(&self, name: &str) -> bool {
        let name = name.trim();
        let Some(prefix) = name.get(..4) else {
            return false;
        };
        if !prefix.eq_ignore_ascii_case("part") {
            return false;
        }
        let digits: String = name[4..]
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits
            .parse::<u32>()
            .is_ok_and(|value| value != u32::from(self.0))
    }

    pub fn shape(&self) -> PartShape {
        match shape_for(u32::from(self.0)) {
            Ok(shape) => shape,
            Err(_) => unreachable!("PartOrdinal is range-checked on construction"),
        }
    }

    pub fn section(&self) -> Section {
        if self.0 <= 4 {
            Section::Listening
        } else {
            Section::Reading
        }
    }

    /// The ordinal after this one, if any.
    pub fn next(&self) -> Option<PartOrdinal> {
        (self.0 < MAX_PART_ORDINAL).then(|| PartOrdinal(self.0 + 1))
    }

    /// Default display name for the part.
    pub fn default_name(&self) -> String {
        format!("Part {}", self.0)
    }
}

impl TryFrom<u8> for PartOrdinal {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(u32::from(value))
    }
}

impl From<PartOrdinal> for u8 {
    fn from(ordinal: PartOrdinal) -> Self {
        ordinal.0
    }
}

impl fmt::Display for PartOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_name_parsing() {
        assert_eq!(PartOrdinal::from_part_name("Part 3").unwrap().get(), 3);
        assert_eq!(
            PartOrdinal::from_part_name("Part 6: Text Completion")
                .unwrap()
                .get(),
            6
        );
        assert_eq!(PartOrdinal::from_part_name("7").unwrap().get(), 7);
        assert!(matches!(
            PartOrdinal::from_part_name("Part 9"),
            Err(ModelError::UnknownPartOrdinal(9))
        ));
        assert!(matches!(
            PartOrdinal::from_part_name("Listening"),
            Err(ModelError::UnparseablePartName(_))
        ));
    }

    #[test]
    fn names_claiming_another_part_conflict() {
        let part2 = PartOrdinal::new(2).unwrap();
        assert!(!part2.name_conflicts("Part 2: Question-Response"));
        assert!(!part2.name_conflicts("  part 02"));
        assert!(!part2.name_conflicts("Question-Response"));
        assert!(!part2.name_conflicts("Partner calls, 5 items"));
        assert!(part2.name_conflicts("Part 5"));
        assert!(part2.name_conflicts("PART 9: Extra"));
    }

    #[test]
    fn sections_split_after_part_four() {
        let sections: Vec<Section> = PartOrdinal::all().map(|o| o.section()).collect();
        assert_eq!(
            sections,
            vec![
                Section::Listening,
                Section::Listening,
                Section::Listening,
                Section::Listening,
                Section::Reading,
                Section::Reading,
                Section::Reading,
            ]
        );
    }

    #[test]
    fn next_stops_at_seven() {
        let seven = PartOrdinal::new(7).unwrap();
        assert_eq!(seven.next(), None);
        assert_eq!(PartOrdinal::new(1).unwrap().next().map(|o| o.get()), Some(2));
    }
}
