//! Progression store: the aggregate plus persistence and remote sync.
//!
//! Wraps [`PlayerProgress`] so that every transition commits a snapshot to
//! durable storage and publishes its events to subscribed sinks. Neither a
//! storage failure nor a gateway failure ever blocks or rolls back a local
//! transition; both are logged and swallowed.

use chrono::{Local, NaiveDate};
use std::rc::Rc;

use crate::ProgressStorage;
use crate::badges::BadgeId;
use crate::events::{EventSink, ProgressEvent};
use crate::progress::PlayerProgress;
use crate::stats::{StatsGateway, StatsReport};

/// Owns the player aggregate together with its storage backend, stats
/// gateway, and event subscribers.
///
/// Transitions run on one logical thread; the only suspension point is
/// [`ProgressStore::add_xp`], whose local mutation completes before the
/// await, so interleaved transitions never observe partial state.
pub struct ProgressStore<S, G>
where
    S: ProgressStorage,
    G: StatsGateway,
{
    progress: PlayerProgress,
    storage: S,
    gateway: G,
    sinks: Vec<Rc<dyn EventSink>>,
}

impl<S, G> ProgressStore<S, G>
where
    S: ProgressStorage,
    G: StatsGateway,
{
    /// Rehydrate from storage, falling back to first-launch defaults when
    /// no snapshot exists or the stored one cannot be read.
    pub fn load(storage: S, gateway: G) -> Self {
        let progress = match storage.load() {
            Ok(Some(saved)) => saved,
            Ok(None) => PlayerProgress::default(),
            Err(err) => {
                log::debug!("progress snapshot unreadable, starting fresh: {err}");
                PlayerProgress::default()
            }
        };
        Self {
            progress,
            storage,
            gateway,
            sinks: Vec::new(),
        }
    }

    /// Register an event subscriber.
    pub fn subscribe(&mut self, sink: Rc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Borrow the current player aggregate.
    #[must_use]
    pub const fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    /// Consume the store, returning the player aggregate.
    #[must_use]
    pub fn into_progress(self) -> PlayerProgress {
        self.progress
    }

    /// Persist the snapshot and fan events out to subscribers.
    fn commit(&mut self, events: Vec<ProgressEvent>) {
        if let Err(err) = self.storage.save(&self.progress) {
            log::warn!("failed to persist progress snapshot: {err}");
        }
        for event in &events {
            for sink in &self.sinks {
                sink.publish(event);
            }
        }
    }

    /// Grant XP, then report the delta to the stats backend.
    ///
    /// The local transition commits synchronously before the report goes
    /// out; a gateway failure is logged and discarded. Resolves once the
    /// sync attempt completes either way.
    pub async fn add_xp(&mut self, amount: u32) {
        let events = self.progress.grant_xp(amount);
        self.commit(events);

        let report = StatsReport::xp_gain(amount);
        if let Err(err) = self.gateway.report_progress(&report).await {
            log::debug!("stats sync skipped: {err}");
        }
    }

    /// Record one answered choice.
    pub fn record_choice(&mut self, correct: bool) {
        let events = self.progress.record_choice(correct);
        self.commit(events);
    }

    /// Enter a chapter at its first scene. Unlock gating is the caller's
    /// responsibility.
    pub fn start_chapter(&mut self, chapter_id: u32) {
        self.progress.start_chapter(chapter_id);
        self.commit(Vec::new());
    }

    /// Advance the scene cursor.
    pub fn next_scene(&mut self) {
        self.progress.next_scene();
        self.commit(Vec::new());
    }

    /// Complete a chapter, dating the play session today (local time).
    pub fn complete_chapter(&mut self, chapter_id: u32, skill: &str) {
        self.complete_chapter_on(chapter_id, skill, Local::now().date_naive());
    }

    /// Complete a chapter with an explicit session date.
    pub fn complete_chapter_on(&mut self, chapter_id: u32, skill: &str, today: NaiveDate) {
        let events = self.progress.complete_chapter(chapter_id, skill, today);
        self.commit(events);
    }

    /// Record a play session for today (local time).
    pub fn update_play_streak(&mut self) {
        self.update_play_streak_on(Local::now().date_naive());
    }

    /// Record a play session for an explicit date.
    pub fn update_play_streak_on(&mut self, today: NaiveDate) {
        let events = self.progress.update_play_streak(today);
        self.commit(events);
    }

    /// Unlock a badge directly.
    pub fn unlock_badge(&mut self, id: BadgeId) {
        let events = self.progress.unlock_badge(id);
        self.commit(events.into_iter().collect());
    }

    /// Re-run the badge predicate scan.
    pub fn check_badges(&mut self) {
        let events = self.progress.check_badges();
        self.commit(events);
    }

    /// Leave the active chapter, keeping all stats.
    pub fn exit_game(&mut self) {
        self.progress.exit_game();
        self.commit(Vec::new());
    }

    /// Restore first-launch defaults.
    pub fn reset_progress(&mut self) {
        self.progress.reset();
        self.commit(Vec::new());
    }
}
