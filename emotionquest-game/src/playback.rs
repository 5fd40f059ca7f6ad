//! Narrative playback: the linear scene/choice state machine per chapter.
//!
//! States are `Scene[0..N-1]` plus chapter completion. Presenting a scene
//! exposes its choices; selecting one records it and grants its XP;
//! resolving the feedback either advances to the next scene or completes
//! the chapter. Chapters with zero scenes are not supported input.

use crate::ProgressStorage;
use crate::data::{Chapter, Scene};
use crate::progress::PlayerProgress;
use crate::stats::StatsGateway;
use crate::store::ProgressStore;

/// Whether a chapter is playable: chapter 1 always is, every later chapter
/// unlocks once its predecessor is completed.
#[must_use]
pub fn chapter_unlocked(progress: &PlayerProgress, chapter_id: u32) -> bool {
    match chapter_id {
        0 => false,
        1 => true,
        id => progress.completed_chapters.contains(&(id - 1)),
    }
}

/// What a resolved choice produced, for the presentation layer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub correct: bool,
    pub xp: u32,
    pub feedback: String,
    pub skill: String,
    /// True when the scene just answered was the chapter's last.
    pub last_scene: bool,
}

/// Result of resolving a scene's feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    /// Moved to the scene at this index.
    NextScene(usize),
    /// The chapter finished and was recorded as completed.
    ChapterComplete,
}

/// Binds one chapter's content to the progression store for playback.
#[derive(Debug, Clone)]
pub struct StorySession {
    chapter: Chapter,
}

impl StorySession {
    /// Start playing a chapter from its first scene.
    pub fn begin<S, G>(chapter: Chapter, store: &mut ProgressStore<S, G>) -> Self
    where
        S: ProgressStorage,
        G: StatsGateway,
    {
        store.start_chapter(chapter.id);
        Self { chapter }
    }

    /// The chapter being played.
    #[must_use]
    pub const fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.chapter.scenes.len()
    }

    /// The scene under the progress cursor, if the cursor is in range.
    #[must_use]
    pub fn current_scene<'a>(&'a self, progress: &PlayerProgress) -> Option<&'a Scene> {
        self.chapter.scenes.get(progress.current_scene)
    }

    /// Whether the cursor sits on the chapter's final scene.
    #[must_use]
    pub fn is_last_scene(&self, progress: &PlayerProgress) -> bool {
        progress.current_scene + 1 == self.chapter.scenes.len()
    }

    /// Select a choice on the current scene: records correctness, grants
    /// the choice's XP (including the remote sync attempt), and returns the
    /// feedback to display. `None` when the cursor or index is out of range.
    pub async fn choose<S, G>(
        &self,
        store: &mut ProgressStore<S, G>,
        choice_index: usize,
    ) -> Option<ChoiceOutcome>
    where
        S: ProgressStorage,
        G: StatsGateway,
    {
        let scene = self.current_scene(store.progress())?;
        let choice = scene.choices.get(choice_index)?.clone();
        let last_scene = self.is_last_scene(store.progress());

        store.record_choice(choice.correct);
        store.add_xp(choice.xp).await;

        Some(ChoiceOutcome {
            correct: choice.correct,
            xp: choice.xp,
            feedback: choice.feedback,
            skill: choice.skill,
            last_scene,
        })
    }

    /// Resolve the displayed feedback: advance to the next scene, or
    /// complete the chapter when the last scene was just answered.
    pub fn advance<S, G>(&self, store: &mut ProgressStore<S, G>) -> SceneTransition
    where
        S: ProgressStorage,
        G: StatsGateway,
    {
        if self.is_last_scene(store.progress()) {
            store.complete_chapter(self.chapter.id, &self.chapter.skill);
            SceneTransition::ChapterComplete
        } else {
            store.next_scene();
            SceneTransition::NextScene(store.progress().current_scene)
        }
    }

    /// Abandon the chapter, keeping all stats and progress.
    pub fn abandon<S, G>(&self, store: &mut ProgressStore<S, G>)
    where
        S: ProgressStorage,
        G: StatsGateway,
    {
        store.exit_game();
    }
}
