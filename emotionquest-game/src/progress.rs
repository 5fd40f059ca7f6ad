//! The mutable player aggregate and its state transitions.
//!
//! Every transition is synchronous and atomic: it either applies fully or
//! not at all, and reports what happened as a list of [`ProgressEvent`]s.
//! Persistence and remote sync live in the store wrapper, not here, so the
//! aggregate stays a pure state machine that tests can drive directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badges::{Badge, BadgeId};
use crate::constants::{
    EMOTIONAL_MASTER_CHAPTERS, EXPERT_LEVEL, FIRST_STEP_CHAPTERS, PERSISTENT_STREAK_DAYS,
    QUICK_LEARNER_RUN, RISING_STAR_LEVEL, WISE_CHOICE_CORRECT, XP_PER_LEVEL,
};
use crate::events::ProgressEvent;

/// XP required to clear the given level.
#[must_use]
pub const fn xp_needed(level: u32) -> u32 {
    level * XP_PER_LEVEL
}

/// Lifetime progression state for a single player.
///
/// Created once with all defaults on first launch and never destroyed;
/// an explicit [`PlayerProgress::reset`] is the only way back to defaults.
/// Unknown fields in an older snapshot deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProgress {
    /// XP within the active level; `0 <= xp < xp_needed(level)` between
    /// transitions.
    pub xp: u32,
    pub level: u32,
    /// Lifetime cumulative XP, monotonically non-decreasing.
    pub total_xp: u32,

    /// Set iff `is_playing`.
    pub current_chapter: Option<u32>,
    /// Index into the active chapter's scenes.
    pub current_scene: usize,
    pub is_playing: bool,

    /// Insertion-ordered, duplicate-free.
    pub completed_chapters: Vec<u32>,
    /// Reserved for per-scene completion tracking; carried in the snapshot
    /// but never read.
    pub completed_scenes: Vec<u32>,

    /// Fixed catalog identity and order; only `unlocked` mutates.
    pub badges: Vec<Badge>,

    pub total_choices: u32,
    /// Never exceeds `total_choices`.
    pub correct_choices: u32,
    /// Resets to 0 on any incorrect choice.
    pub consecutive_correct: u32,

    /// Day-granular, local time zone.
    pub last_play_date: Option<NaiveDate>,
    pub play_streak: u32,
    /// Always `>= play_streak`.
    pub longest_streak: u32,

    /// One entry appended per chapter completion; duplicates allowed.
    pub skills_learned: Vec<String>,

    /// True while no incorrect choice has been made since the chapter
    /// started; drives the perfect-score badge.
    pub chapter_flawless: bool,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            total_xp: 0,
            current_chapter: None,
            current_scene: 0,
            is_playing: false,
            completed_chapters: Vec::new(),
            completed_scenes: Vec::new(),
            badges: Badge::catalog(),
            total_choices: 0,
            correct_choices: 0,
            consecutive_correct: 0,
            last_play_date: None,
            play_streak: 0,
            longest_streak: 0,
            skills_learned: Vec::new(),
            chapter_flawless: true,
        }
    }
}

impl PlayerProgress {
    /// XP still required to clear the current level.
    #[must_use]
    pub const fn xp_to_next(&self) -> u32 {
        xp_needed(self.level)
    }

    /// Whether the named badge is unlocked.
    #[must_use]
    pub fn badge_unlocked(&self, id: BadgeId) -> bool {
        self.badges.iter().any(|b| b.id == id && b.unlocked)
    }

    /// Grant XP and carry any overflow into level-ups.
    ///
    /// The level check loops, so a single large grant can span several
    /// levels and the `xp < xp_needed(level)` invariant holds on return.
    pub fn grant_xp(&mut self, amount: u32) -> Vec<ProgressEvent> {
        let mut events = vec![ProgressEvent::XpGained { amount }];
        self.xp += amount;
        self.total_xp += amount;

        let mut leveled_up = false;
        while self.xp >= xp_needed(self.level) {
            self.xp -= xp_needed(self.level);
            self.level += 1;
            leveled_up = true;
            events.push(ProgressEvent::LevelUp { level: self.level });
        }
        if leveled_up {
            events.extend(self.check_badges());
        }
        events
    }

    /// Record one answered choice.
    pub fn record_choice(&mut self, correct: bool) -> Vec<ProgressEvent> {
        self.total_choices += 1;
        if correct {
            self.correct_choices += 1;
            self.consecutive_correct += 1;
        } else {
            self.consecutive_correct = 0;
            self.chapter_flawless = false;
        }
        self.check_badges()
    }

    /// Position the playback cursor at the first scene of a chapter.
    ///
    /// Does not validate that the chapter is unlocked; gating is the
    /// caller's contract (see [`crate::playback::chapter_unlocked`]).
    pub fn start_chapter(&mut self, chapter_id: u32) {
        self.current_chapter = Some(chapter_id);
        self.current_scene = 0;
        self.is_playing = true;
        self.chapter_flawless = true;
    }

    /// Advance the scene cursor. Callers must not advance past the last
    /// scene; [`crate::playback::StorySession::advance`] enforces this.
    pub fn next_scene(&mut self) {
        self.current_scene += 1;
    }

    /// Mark a chapter finished. Idempotent: a repeat completion of the same
    /// chapter changes nothing.
    pub fn complete_chapter(
        &mut self,
        chapter_id: u32,
        skill: &str,
        today: NaiveDate,
    ) -> Vec<ProgressEvent> {
        if self.completed_chapters.contains(&chapter_id) {
            return Vec::new();
        }
        self.completed_chapters.push(chapter_id);
        self.skills_learned.push(skill.to_string());
        let flawless = self.chapter_flawless;
        self.is_playing = false;
        self.current_chapter = None;
        self.current_scene = 0;

        let mut events = vec![ProgressEvent::ChapterCompleted {
            chapter: chapter_id,
            skill: skill.to_string(),
        }];
        if flawless {
            events.extend(self.unlock_badge(BadgeId::PerfectScore));
        }
        events.extend(self.update_play_streak(today));
        events.extend(self.check_badges());
        events
    }

    /// Record a play session for `today`.
    ///
    /// No-op when today is already recorded. Extends the streak only when
    /// the last play was exactly yesterday; any gap (including first-ever
    /// play) restarts at 1.
    pub fn update_play_streak(&mut self, today: NaiveDate) -> Vec<ProgressEvent> {
        if self.last_play_date == Some(today) {
            return Vec::new();
        }
        let played_yesterday =
            self.last_play_date.is_some() && self.last_play_date == today.pred_opt();
        self.play_streak = if played_yesterday {
            self.play_streak + 1
        } else {
            1
        };
        self.longest_streak = self.longest_streak.max(self.play_streak);
        self.last_play_date = Some(today);

        let mut events = vec![ProgressEvent::StreakUpdated {
            days: self.play_streak,
        }];
        events.extend(self.check_badges());
        events
    }

    /// Unlock a badge by id. Idempotent; the event fires only on the
    /// locked-to-unlocked transition.
    pub fn unlock_badge(&mut self, id: BadgeId) -> Option<ProgressEvent> {
        let badge = self.badges.iter_mut().find(|b| b.id == id)?;
        if badge.unlocked {
            return None;
        }
        badge.unlocked = true;
        Some(ProgressEvent::BadgeUnlocked(id))
    }

    /// Evaluate every stat-derived badge predicate and unlock the ones that
    /// newly hold. Deterministic and idempotent.
    ///
    /// `perfect_score` is absent here: it derives from the flawless-run
    /// flag at chapter completion, not from accumulated stats.
    pub fn check_badges(&mut self) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        if self.completed_chapters.len() >= FIRST_STEP_CHAPTERS {
            events.extend(self.unlock_badge(BadgeId::FirstStep));
        }
        if self.consecutive_correct >= QUICK_LEARNER_RUN {
            events.extend(self.unlock_badge(BadgeId::QuickLearner));
        }
        if self.completed_chapters.len() >= EMOTIONAL_MASTER_CHAPTERS {
            events.extend(self.unlock_badge(BadgeId::EmotionalMaster));
        }
        if self.play_streak >= PERSISTENT_STREAK_DAYS {
            events.extend(self.unlock_badge(BadgeId::Persistent));
        }
        if self.level >= RISING_STAR_LEVEL {
            events.extend(self.unlock_badge(BadgeId::Level5));
        }
        if self.level >= EXPERT_LEVEL {
            events.extend(self.unlock_badge(BadgeId::Level10));
        }
        if self.correct_choices >= WISE_CHOICE_CORRECT {
            events.extend(self.unlock_badge(BadgeId::WiseChoice));
        }
        events
    }

    /// Leave the active chapter, keeping all stats and progress.
    pub fn exit_game(&mut self) {
        self.is_playing = false;
        self.current_chapter = None;
        self.current_scene = 0;
    }

    /// Restore every mutable field to its initial default, including
    /// relocking the whole badge catalog.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
