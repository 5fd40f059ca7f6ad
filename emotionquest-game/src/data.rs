use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(()),
        }
    }
}

/// A single response option within a scene.
///
/// `correct` is the only semantic discriminator between choices; display
/// order and labeling are presentational concerns left to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub id: u32,
    pub text: String,
    pub correct: bool,
    pub feedback: String,
    #[serde(default)]
    pub skill: String,
    /// XP granted when this choice is selected.
    #[serde(default)]
    pub xp: u32,
}

/// One dialogue beat with a single decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub character: String,
    pub character_name: String,
    #[serde(default)]
    pub emotion: String,
    pub text: String,
    pub choices: Vec<Choice>,
}

/// A themed unit of narrative content teaching one skill.
///
/// Chapter ids form a dense 1-based sequence; chapter `n + 1` stays locked
/// until chapter `n` is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub skill: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Played strictly in order; the last scene's resolution completes the
    /// chapter.
    pub scenes: Vec<Scene>,
}

/// Container for the full chapter/scene/choice document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoryData {
    pub chapters: Vec<Chapter>,
}

impl StoryData {
    /// Create empty story data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            chapters: Vec::new(),
        }
    }

    /// Load story data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid story data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create story data from pre-parsed chapters
    #[must_use]
    pub fn from_chapters(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    /// Look up a chapter by id.
    #[must_use]
    pub fn chapter(&self, chapter_id: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    /// Total number of chapters in the document.
    #[must_use]
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }
}
