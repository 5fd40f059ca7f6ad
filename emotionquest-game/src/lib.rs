//! Emotion Quest Engine
//!
//! Platform-agnostic progression logic for the Emotion Quest
//! branching-dialogue mini-game. This crate provides the content model,
//! player progression store, badge rules, streak tracking, and narrative
//! playback driver without UI or platform-specific dependencies.

pub mod badges;
pub mod constants;
pub mod data;
pub mod events;
pub mod playback;
pub mod progress;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use badges::{Badge, BadgeId};
pub use constants::{AUTH_TOKEN_KEYS, GAME_ID, STORAGE_KEY, XP_PER_LEVEL};
pub use data::{Chapter, Choice, Difficulty, Scene, StoryData};
pub use events::{EventSink, ProgressEvent};
pub use playback::{ChoiceOutcome, SceneTransition, StorySession, chapter_unlocked};
pub use progress::{PlayerProgress, xp_needed};
pub use stats::{NullStatsGateway, ServerStats, StatsError, StatsGateway, StatsReport};
pub use store::ProgressStore;

/// Trait for abstracting content loading operations
/// Platform-specific implementations should provide this
pub trait StoryLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the chapter/scene/choice document from the platform source
    ///
    /// # Errors
    ///
    /// Returns an error if the story data cannot be loaded.
    fn load_story(&self) -> Result<StoryData, Self::Error>;
}

/// Trait for abstracting progress persistence.
/// Platform-specific implementations should provide this
pub trait ProgressStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the progress snapshot under the fixed namespace key
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, progress: &PlayerProgress) -> Result<(), Self::Error>;

    /// Load the persisted snapshot, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    fn load(&self) -> Result<Option<PlayerProgress>, Self::Error>;

    /// Delete the persisted snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Main engine facade binding a content loader to a storage backend.
pub struct QuestEngine<L, S>
where
    L: StoryLoader,
    S: ProgressStorage,
{
    loader: L,
    storage: S,
}

impl<L, S> QuestEngine<L, S>
where
    L: StoryLoader,
    S: ProgressStorage,
{
    /// Create a new engine with the provided loader and storage
    pub const fn new(loader: L, storage: S) -> Self {
        Self { loader, storage }
    }

    /// Load the story document
    ///
    /// # Errors
    ///
    /// Returns an error if the story data cannot be loaded.
    pub fn load_story(&self) -> Result<StoryData, L::Error> {
        self.loader.load_story()
    }

    /// Load the persisted progress, defaulting when no snapshot exists
    ///
    /// # Errors
    ///
    /// Returns an error if an existing snapshot cannot be read.
    pub fn load_progress(&self) -> Result<PlayerProgress, S::Error> {
        Ok(self.storage.load()?.unwrap_or_default())
    }

    /// Persist a progress snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save_progress(&self, progress: &PlayerProgress) -> Result<(), S::Error> {
        self.storage.save(progress)
    }

    /// Open the story and a rehydrated progression store in one step,
    /// consuming the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the story document cannot be loaded; a missing
    /// or unreadable progress snapshot falls back to defaults instead.
    pub fn open<G>(self, gateway: G) -> Result<(StoryData, ProgressStore<S, G>), anyhow::Error>
    where
        G: StatsGateway,
        L::Error: Into<anyhow::Error>,
    {
        let story = self.loader.load_story().map_err(Into::into)?;
        let store = ProgressStore::load(self.storage, gateway);
        Ok((story, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl StoryLoader for FixtureLoader {
        type Error = Infallible;

        fn load_story(&self) -> Result<StoryData, Self::Error> {
            Ok(StoryData::empty())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        snapshot: Rc<RefCell<Option<PlayerProgress>>>,
    }

    impl ProgressStorage for MemoryStorage {
        type Error = Infallible;

        fn save(&self, progress: &PlayerProgress) -> Result<(), Self::Error> {
            *self.snapshot.borrow_mut() = Some(progress.clone());
            Ok(())
        }

        fn load(&self) -> Result<Option<PlayerProgress>, Self::Error> {
            Ok(self.snapshot.borrow().clone())
        }

        fn clear(&self) -> Result<(), Self::Error> {
            *self.snapshot.borrow_mut() = None;
            Ok(())
        }
    }

    #[test]
    fn engine_roundtrips_progress_snapshots() {
        let engine = QuestEngine::new(FixtureLoader, MemoryStorage::default());
        assert_eq!(engine.load_progress().unwrap(), PlayerProgress::default());

        let mut progress = PlayerProgress::default();
        progress.grant_xp(60);
        engine.save_progress(&progress).unwrap();

        let restored = engine.load_progress().unwrap();
        assert_eq!(restored.xp, 60);
        assert_eq!(restored.total_xp, 60);
    }

    #[test]
    fn engine_opens_story_and_rehydrated_store() {
        let storage = MemoryStorage::default();
        let mut saved = PlayerProgress::default();
        saved.completed_chapters.push(1);
        storage.save(&saved).unwrap();

        let engine = QuestEngine::new(FixtureLoader, storage);
        let (story, store) = engine.open(NullStatsGateway).expect("open succeeds");
        assert_eq!(story.chapter_count(), 0);
        assert_eq!(store.progress().completed_chapters, vec![1]);
    }
}
