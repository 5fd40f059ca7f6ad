//! Domain events published by the progression store.
//!
//! State transitions report what happened through these events instead of
//! calling collaborators directly. The application root subscribes the
//! layers that react (audio cues, toasts, analytics), which keeps the store
//! free of dependencies on any of them.

use crate::badges::BadgeId;

/// Notification emitted by a progression state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// XP was granted, before any level-up accounting.
    XpGained { amount: u32 },
    /// The player advanced to `level`.
    LevelUp { level: u32 },
    /// A badge transitioned from locked to unlocked.
    BadgeUnlocked(BadgeId),
    /// A chapter was completed for the first time.
    ChapterCompleted { chapter: u32, skill: String },
    /// The daily play streak was recorded for today.
    StreakUpdated { days: u32 },
}

/// Receiver for progression events.
///
/// Implementations must not re-enter the store; they observe, they do not
/// drive transitions.
pub trait EventSink {
    fn publish(&self, event: &ProgressEvent);
}
