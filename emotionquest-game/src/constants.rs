//! Centralized progression tuning constants for Emotion Quest game logic.
//!
//! These values define the deterministic math for leveling, badges, and
//! streaks. Keeping them together ensures that progression balance can only
//! be adjusted via code changes reviewed in version control, rather than
//! through external JSON assets.

// Leveling -----------------------------------------------------------------
/// XP required to clear level `n` is `n * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

// Badge thresholds ---------------------------------------------------------
pub(crate) const FIRST_STEP_CHAPTERS: usize = 1;
pub(crate) const QUICK_LEARNER_RUN: u32 = 5;
pub(crate) const EMOTIONAL_MASTER_CHAPTERS: usize = 6;
pub(crate) const PERSISTENT_STREAK_DAYS: u32 = 7;
pub(crate) const RISING_STAR_LEVEL: u32 = 5;
pub(crate) const EXPERT_LEVEL: u32 = 10;
pub(crate) const WISE_CHOICE_CORRECT: u32 = 50;

// Integration surface ------------------------------------------------------
/// Game identifier reported to the stats backend for leaderboard grouping.
pub const GAME_ID: &str = "emotionquest";
/// Namespace key under which the progress snapshot is persisted.
pub const STORAGE_KEY: &str = "emotion-quest-storage";

/// Common base path for the stats backend.
pub const STATS_BASE_PATH: &str = "/api";
pub const STATS_PATH: &str = "/api/stats";
pub const STATS_UPDATE_PATH: &str = "/api/stats/update";
pub const STATS_ACHIEVEMENTS_PATH: &str = "/api/stats/achievements";
pub const STATS_BADGES_PATH: &str = "/api/stats/badges";

/// Persisted-storage keys checked for a bearer credential, in order.
/// The second key is retained for backward compatibility with older clients.
pub const AUTH_TOKEN_KEYS: [&str; 2] = ["authToken", "token"];
