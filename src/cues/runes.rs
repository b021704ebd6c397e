//! Bounty rune spawn warning

use super::{CueCategory, CueRule};
use crate::state::Transition;

/// Seconds between bounty rune spawns, starting at the horn
pub const BOUNTY_RUNE_INTERVAL: i64 = 300;

/// Seconds before a spawn that the cue plays
pub const BOUNTY_RUNE_LEAD: i64 = 15;

/// Fires when the game clock crosses a point just ahead of a rune spawn
///
/// Stateless: a crossing is detected from the clock pair alone, so a
/// duplicate push can never fire it twice. A clock that stands still or runs
/// backwards never fires.
#[derive(Debug, Clone, Copy)]
pub struct BountyRunesRule {
    interval: i64,
    lead: i64,
}

impl BountyRunesRule {
    /// Create a rule with custom spawn timing
    pub fn with_timing(interval: i64, lead: i64) -> Self {
        Self {
            interval: interval.max(1),
            lead: lead.clamp(0, interval.max(1) - 1),
        }
    }

    /// First warning point strictly after `clock`, `None` past the end of
    /// the clock range
    fn next_warning_after(&self, clock: i64) -> Option<i64> {
        // Warning points sit at k * interval - lead for k >= 0
        let shifted = clock.checked_add(self.lead)?;
        let k = shifted.div_euclid(self.interval).checked_add(1)?;
        k.max(0).checked_mul(self.interval)?.checked_sub(self.lead)
    }
}

impl Default for BountyRunesRule {
    fn default() -> Self {
        Self::with_timing(BOUNTY_RUNE_INTERVAL, BOUNTY_RUNE_LEAD)
    }
}

impl CueRule for BountyRunesRule {
    fn category(&self) -> CueCategory {
        CueCategory::BountyRunes
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        let Some((previous, current)) = transition.pair() else {
            return false;
        };
        let (Some(before), Some(after)) = (previous.clock_time, current.clock_time) else {
            return false;
        };
        if after <= before {
            return false;
        }
        self.next_warning_after(before)
            .is_some_and(|warning| warning <= after)
    }
}
