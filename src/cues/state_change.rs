//! Rules that fire when a tracked field changes between snapshots

use super::{CueCategory, CueRule};
use crate::state::{MatchPhase, StateSnapshot, Transition};

/// Minimum rise in health percentage that counts as a heal
pub const MIN_HEAL_PERCENT: u32 = 20;

/// Whether `field` moved from exactly `from` to exactly `to`
///
/// Absent values on either side never count as a change.
fn flipped<T: PartialEq>(
    transition: &Transition<'_>,
    field: impl Fn(&StateSnapshot) -> Option<T>,
    from: T,
    to: T,
) -> bool {
    match transition.pair() {
        Some((previous, current)) => {
            field(previous).as_ref() == Some(&from) && field(current).as_ref() == Some(&to)
        }
        None => false,
    }
}

/// Hero went from alive to dead
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroDiedRule;

impl CueRule for HeroDiedRule {
    fn category(&self) -> CueCategory {
        CueCategory::HeroDied
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        flipped(transition, |s| s.hero_alive, true, false)
    }
}

/// Hero went from dead to alive
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroRespawnedRule;

impl CueRule for HeroRespawnedRule {
    fn category(&self) -> CueCategory {
        CueCategory::HeroRespawned
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        flipped(transition, |s| s.hero_alive, false, true)
    }
}

/// Hero became smoked
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroSmokedRule;

impl CueRule for HeroSmokedRule {
    fn category(&self) -> CueCategory {
        CueCategory::HeroSmoked
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        flipped(transition, |s| s.smoked, false, true)
    }
}

/// Player's kill count went up
///
/// A drop (new match) is not a kill.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroKilledRule;

impl CueRule for HeroKilledRule {
    fn category(&self) -> CueCategory {
        CueCategory::HeroKilled
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        let Some((previous, current)) = transition.pair() else {
            return false;
        };
        match (previous.kills, current.kills) {
            (Some(before), Some(after)) => after > before,
            _ => false,
        }
    }
}

/// Hero stayed alive and regained a large chunk of health
#[derive(Debug, Clone, Copy)]
pub struct HeroHealedRule {
    min_gain: u32,
}

impl HeroHealedRule {
    /// Create a heal rule with a custom threshold in percentage points
    pub fn with_min_gain(min_gain: u32) -> Self {
        Self {
            min_gain: min_gain.max(1),
        }
    }
}

impl Default for HeroHealedRule {
    fn default() -> Self {
        Self::with_min_gain(MIN_HEAL_PERCENT)
    }
}

impl CueRule for HeroHealedRule {
    fn category(&self) -> CueCategory {
        CueCategory::HeroHealed
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        let Some((previous, current)) = transition.pair() else {
            return false;
        };
        // Respawning restores full health; only heals while alive count
        if previous.hero_alive != Some(true) || current.hero_alive != Some(true) {
            return false;
        }
        match (previous.health_percent, current.health_percent) {
            (Some(before), Some(after)) => after >= before.saturating_add(self.min_gain),
            _ => false,
        }
    }
}

/// Pre-game countdown ended and the match began
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchStartedRule;

impl CueRule for MatchStartedRule {
    fn category(&self) -> CueCategory {
        CueCategory::MatchStarted
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        flipped(transition, |s| Some(s.match_phase), MatchPhase::Pregame, MatchPhase::Playing)
    }
}

/// Whether the phase went from an unfinished match to `outcome`
fn match_ended(transition: &Transition<'_>, outcome: MatchPhase) -> bool {
    match transition.pair() {
        Some((previous, current)) => {
            previous.match_phase.is_in_match() && current.match_phase == outcome
        }
        None => false,
    }
}

/// Player's team won
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchWonRule;

impl CueRule for MatchWonRule {
    fn category(&self) -> CueCategory {
        CueCategory::MatchWon
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        match_ended(transition, MatchPhase::Won)
    }
}

/// Player's team lost
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchLostRule;

impl CueRule for MatchLostRule {
    fn category(&self) -> CueCategory {
        CueCategory::MatchLost
    }

    fn evaluate(&mut self, transition: &Transition<'_>) -> bool {
        match_ended(transition, MatchPhase::Lost)
    }
}
