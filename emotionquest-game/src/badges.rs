//! Achievement badge catalog and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for one of the eight fixed achievement badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstStep,
    QuickLearner,
    EmotionalMaster,
    Persistent,
    Level5,
    Level10,
    PerfectScore,
    WiseChoice,
}

impl BadgeId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstStep => "first_step",
            Self::QuickLearner => "quick_learner",
            Self::EmotionalMaster => "emotional_master",
            Self::Persistent => "persistent",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
            Self::PerfectScore => "perfect_score",
            Self::WiseChoice => "wise_choice",
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_step" => Ok(Self::FirstStep),
            "quick_learner" => Ok(Self::QuickLearner),
            "emotional_master" => Ok(Self::EmotionalMaster),
            "persistent" => Ok(Self::Persistent),
            "level_5" => Ok(Self::Level5),
            "level_10" => Ok(Self::Level10),
            "perfect_score" => Ok(Self::PerfectScore),
            "wise_choice" => Ok(Self::WiseChoice),
            _ => Err(()),
        }
    }
}

/// A permanent achievement flag.
///
/// Identity, name, description, and icon are fixed by the catalog; only
/// `unlocked` mutates, monotonically false to true, and only an explicit
/// full-progress reset reverts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub unlocked: bool,
}

impl Badge {
    fn locked(id: BadgeId, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked: false,
        }
    }

    /// The fixed eight-entry badge catalog, all locked.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::locked(
                BadgeId::FirstStep,
                "First Step",
                "Complete your first chapter",
                "\u{1F3AF}",
            ),
            Self::locked(
                BadgeId::QuickLearner,
                "Quick Learner",
                "Get 5 correct choices in a row",
                "\u{26A1}",
            ),
            Self::locked(
                BadgeId::EmotionalMaster,
                "Emotional Master",
                "Complete all chapters",
                "\u{1F451}",
            ),
            Self::locked(
                BadgeId::Persistent,
                "Persistent",
                "Play 7 days in a row",
                "\u{1F525}",
            ),
            Self::locked(BadgeId::Level5, "Rising Star", "Reach level 5", "\u{2B50}"),
            Self::locked(BadgeId::Level10, "Expert", "Reach level 10", "\u{1F48E}"),
            Self::locked(
                BadgeId::PerfectScore,
                "Perfect Score",
                "Complete a chapter without mistakes",
                "\u{1F3C6}",
            ),
            Self::locked(
                BadgeId::WiseChoice,
                "Wise Choice",
                "Make 50 correct choices",
                "\u{1F9E0}",
            ),
        ]
    }
}
