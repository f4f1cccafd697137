//! Status snapshot for the host UI
//!
//! The host only hears about score, coins, lives, elapsed seconds and the
//! run status. [`SnapshotGate`] suppresses repeats so the host is notified
//! once per actual change.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, RunStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub coins: u32,
    pub lives: u32,
    /// Whole seconds since the last full reset
    pub time: u64,
    pub status: RunStatus,
}

impl Snapshot {
    /// The frozen flag is not reflected in `status`: a finished run reports
    /// "game over" rather than "paused" so the host can tell the two apart.
    pub fn capture(state: &GameState, now_ms: f64) -> Self {
        let time = match state.world.status {
            RunStatus::Ready => 0,
            _ => state.world.elapsed_secs(now_ms),
        };
        Self {
            score: state.player.score,
            coins: state.player.coins,
            lives: state.player.lives,
            time,
            status: state.world.status,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Remembers the last emitted snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotGate {
    last: Option<Snapshot>,
}

impl SnapshotGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshot if it differs from the last one passed through
    pub fn offer(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        if self.last == Some(snapshot) {
            return None;
        }
        self.last = Some(snapshot);
        Some(snapshot)
    }
}
