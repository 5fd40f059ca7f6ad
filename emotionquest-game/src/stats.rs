//! Outbound contract for the remote stats backend.
//!
//! The backend keeps a per-user leaderboard aggregate across games; this
//! engine only ever pushes XP deltas to it. Sync is best-effort and
//! fire-and-forget: the store has already committed the local transition by
//! the time a report goes out, and any failure is swallowed. There is no
//! retry, timeout, queueing, or cancellation.
//!
//! Requests carry a bearer credential when one is present under either of
//! [`crate::constants::AUTH_TOKEN_KEYS`]; without one the request proceeds
//! unauthenticated and the backend rejects or anonymizes it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::GAME_ID;

/// One XP report pushed to `POST /api/stats/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub game: String,
    #[serde(rename = "win")]
    pub won: bool,
    pub xp: u32,
}

impl StatsReport {
    /// Report an XP gain for this game.
    #[must_use]
    pub fn xp_gain(xp: u32) -> Self {
        Self {
            game: GAME_ID.to_string(),
            won: true,
            xp,
        }
    }
}

/// Per-player aggregate the backend returns after applying an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerStats {
    pub level: u32,
    pub xp: u64,
    pub victories: u32,
    pub losses: u32,
    pub current_streak: u32,
    pub win_rate: f64,
}

/// Failure modes of a stats report. All of them are non-fatal to gameplay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server rejected update with status {code}")]
    Status { code: u16 },
    #[error("missing or rejected credentials")]
    Unauthorized,
}

/// Remote stats backend seam.
///
/// Platform layers implement this over their HTTP stack; the engine only
/// depends on the trait. Futures need not be `Send`: the engine runs on a
/// single logical thread.
#[async_trait(?Send)]
pub trait StatsGateway {
    /// Push one progress report.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or server failure. Callers treat
    /// every error as non-fatal; local state is never rolled back.
    async fn report_progress(&self, report: &StatsReport) -> Result<ServerStats, StatsError>;
}

/// Gateway for offline play: accepts every report and returns empty stats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatsGateway;

#[async_trait(?Send)]
impl StatsGateway for NullStatsGateway {
    async fn report_progress(&self, _report: &StatsReport) -> Result<ServerStats, StatsError> {
        Ok(ServerStats::default())
    }
}
