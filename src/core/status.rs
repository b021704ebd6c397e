//! Monitor status reported to the host application

use serde::{Deserialize, Serialize};

use crate::state::MatchPhase;

/// Current state of a monitoring session (serializable for the UI layer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MonitorStatus {
    /// Whether at least one valid update arrived from the game
    pub connected: bool,
    /// Updates parsed and evaluated
    pub updates_accepted: u64,
    /// Updates dropped as malformed
    pub updates_rejected: u64,
    /// Clock time of the latest update, if it carried one
    pub clock_time: Option<i64>,
    /// Match phase of the latest update
    #[serde(default)]
    pub match_phase: MatchPhase,
    /// Cues dispatched to the sink this session
    pub cues_played: u64,
}

impl MonitorStatus {
    /// Create a new default status
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of received updates that were malformed, 0 when none arrived
    pub fn rejection_rate(&self) -> f64 {
        let total = self.updates_accepted + self.updates_rejected;
        if total == 0 {
            0.0
        } else {
            self.updates_rejected as f64 / total as f64
        }
    }
}
