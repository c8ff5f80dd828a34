use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// Media and rich-text attached to a question or shared by a group.
///
/// Every field is opaque: URLs and HTML are stored and forwarded, never
/// parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl Media {
    pub fn is_empty(&self) -> bool {
        self.audio_url.is_none()
            && self.image_urls.is_empty()
            && self.passage_html.is_none()
            && self.transcript.is_none()
            && self.translation.is_none()
    }
}

/// Free-form classification of question content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setting: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ContentTags {
    pub fn is_empty(&self) -> bool {
        self.difficulty.is_none()
            && self.domain.is_empty()
            && self.genre.is_empty()
            && self.setting.is_empty()
            && self.style.is_none()
    }
}

/// Skills a question exercises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTags {
    /// Owning part ordinal, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl SkillTags {
    pub fn is_empty(&self) -> bool {
        self.part.is_none() && self.skills.is_empty()
    }
}
