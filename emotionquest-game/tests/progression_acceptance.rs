//! Acceptance checks for the progression rules: leveling, choice stats,
//! badges, streaks, and reset behavior driven through the public store API.

use async_trait::async_trait;
use chrono::NaiveDate;
use emotionquest_game::{
    BadgeId, PlayerProgress, ProgressStore, ProgressStorage, ServerStats, StatsError, StatsGateway,
    StatsReport, xp_needed,
};
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

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

#[derive(Clone, Default)]
struct RecordingGateway {
    reports: Rc<RefCell<Vec<StatsReport>>>,
    fail: bool,
}

#[async_trait(?Send)]
impl StatsGateway for RecordingGateway {
    async fn report_progress(&self, report: &StatsReport) -> Result<ServerStats, StatsError> {
        self.reports.borrow_mut().push(report.clone());
        if self.fail {
            Err(StatsError::Transport("connection refused".to_string()))
        } else {
            Ok(ServerStats::default())
        }
    }
}

fn fresh_store() -> ProgressStore<MemoryStorage, RecordingGateway> {
    ProgressStore::load(MemoryStorage::default(), RecordingGateway::default())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn xp_sums_below_threshold_never_level() {
    let mut store = fresh_store();
    for amount in [10, 25, 5, 40] {
        store.add_xp(amount).await;
    }
    assert_eq!(store.progress().xp, 80);
    assert_eq!(store.progress().level, 1);
    assert_eq!(store.progress().total_xp, 80);
}

#[tokio::test]
async fn boundary_grant_levels_exactly_once() {
    let mut store = fresh_store();
    store.add_xp(xp_needed(1)).await;
    assert_eq!(store.progress().level, 2);
    assert_eq!(store.progress().xp, 0);
}

#[tokio::test]
async fn level_badges_unlock_at_thresholds() {
    let mut store = fresh_store();
    // Levels 1..5 need 100+200+300+400 = 1000 XP in total.
    store.add_xp(1000).await;
    assert_eq!(store.progress().level, 5);
    assert!(store.progress().badge_unlocked(BadgeId::Level5));
    assert!(!store.progress().badge_unlocked(BadgeId::Level10));
}

#[tokio::test]
async fn failed_sync_leaves_local_progression_authoritative() {
    let gateway = RecordingGateway {
        fail: true,
        ..RecordingGateway::default()
    };
    let mut store = ProgressStore::load(MemoryStorage::default(), gateway.clone());
    store.add_xp(120).await;
    assert_eq!(store.progress().level, 2);
    assert_eq!(store.progress().xp, 20);
    // The attempt was made exactly once, no retries.
    assert_eq!(gateway.reports.borrow().len(), 1);
}

#[test]
fn incorrect_choice_resets_consecutive_count() {
    let mut store = fresh_store();
    for _ in 0..7 {
        store.record_choice(true);
    }
    store.record_choice(false);
    assert_eq!(store.progress().consecutive_correct, 0);
    assert_eq!(store.progress().correct_choices, 7);
    assert_eq!(store.progress().total_choices, 8);
}

#[test]
fn complete_chapter_twice_records_once() {
    let mut store = fresh_store();
    store.complete_chapter_on(1, "Empathy", day(2025, 6, 1));
    store.complete_chapter_on(1, "Empathy", day(2025, 6, 1));
    assert_eq!(store.progress().completed_chapters, vec![1]);
    assert_eq!(store.progress().skills_learned.len(), 1);
}

#[test]
fn first_step_unlocks_on_first_completion_and_survives() {
    let mut store = fresh_store();
    store.complete_chapter_on(1, "Empathy", day(2025, 6, 1));
    assert!(store.progress().badge_unlocked(BadgeId::FirstStep));

    // Later activity never reverts it.
    store.record_choice(false);
    store.exit_game();
    store.check_badges();
    assert!(store.progress().badge_unlocked(BadgeId::FirstStep));

    // Only a full reset does.
    store.reset_progress();
    assert!(!store.progress().badge_unlocked(BadgeId::FirstStep));
}

#[test]
fn skipped_day_resets_streak_but_keeps_longest() {
    let mut store = fresh_store();
    store.update_play_streak_on(day(2025, 6, 1));
    store.update_play_streak_on(day(2025, 6, 2));
    assert_eq!(store.progress().play_streak, 2);
    assert_eq!(store.progress().longest_streak, 2);

    store.update_play_streak_on(day(2025, 6, 4));
    assert_eq!(store.progress().play_streak, 1);
    assert_eq!(store.progress().longest_streak, 2);
}

#[test]
fn completing_six_chapters_earns_emotional_master() {
    let mut store = fresh_store();
    let skills = [
        "Anger Recognition",
        "Active Listening",
        "Empathy",
        "Self-Awareness",
        "Stress Management",
        "Conflict Resolution",
    ];
    for (i, skill) in skills.iter().enumerate() {
        let id = u32::try_from(i + 1).expect("chapter id fits");
        store.complete_chapter_on(id, skill, day(2025, 6, 1));
    }
    assert!(store.progress().badge_unlocked(BadgeId::EmotionalMaster));
    assert_eq!(store.progress().skills_learned.len(), 6);
}

#[test]
fn fifty_correct_choices_earn_wise_choice() {
    let mut store = fresh_store();
    for _ in 0..49 {
        store.record_choice(true);
    }
    assert!(!store.progress().badge_unlocked(BadgeId::WiseChoice));
    store.record_choice(true);
    assert!(store.progress().badge_unlocked(BadgeId::WiseChoice));
}

#[tokio::test]
async fn reset_then_check_badges_yields_clean_slate() {
    let mut store = fresh_store();
    store.add_xp(450).await;
    for _ in 0..6 {
        store.record_choice(true);
    }
    store.complete_chapter_on(1, "Empathy", day(2025, 6, 1));

    store.reset_progress();
    store.check_badges();

    let progress = store.progress();
    assert_eq!(progress.level, 1);
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.total_xp, 0);
    assert!(progress.badges.iter().all(|b| !b.unlocked));
}

#[test]
fn persisted_snapshot_rehydrates_into_new_store() {
    let storage = MemoryStorage::default();
    {
        let mut store = ProgressStore::load(storage.clone(), RecordingGateway::default());
        store.record_choice(true);
        store.complete_chapter_on(1, "Empathy", day(2025, 6, 1));
    }
    let store = ProgressStore::load(storage, RecordingGateway::default());
    assert_eq!(store.progress().completed_chapters, vec![1]);
    assert!(store.progress().badge_unlocked(BadgeId::FirstStep));
}
