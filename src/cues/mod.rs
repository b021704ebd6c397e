//! Cue categories and rules
//!
//! This module defines the `CueRule` trait that every cue implementation
//! satisfies, the `CueCategory` keys used for configuration and clip lookup,
//! and the `CueRegistry` holding the rules of one session.

mod registry;
pub mod ambient;
pub mod items;
pub mod runes;
pub mod state_change;

pub use registry::CueRegistry;

pub use ambient::AmbientRule;
pub use items::{ItemReadyRule, HAND_OF_MIDAS};
pub use runes::BountyRunesRule;
pub use state_change::{
    HeroDiedRule, HeroHealedRule, HeroKilledRule, HeroRespawnedRule, HeroSmokedRule,
    MatchLostRule, MatchStartedRule, MatchWonRule,
};

use crate::state::Transition;
use crate::CueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic event class that can trigger audio playback
///
/// The serialized identifiers are referenced by persisted user configuration
/// and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueCategory {
    BountyRunes,
    HeroDied,
    MatchLost,
    HeroHealed,
    HeroKilled,
    MatchStarted,
    MidasReady,
    HeroRespawned,
    HeroSmoked,
    MatchWon,
    Ambient,
}

impl CueCategory {
    /// Every category, in registration order
    pub const ALL: [CueCategory; 11] = [
        CueCategory::BountyRunes,
        CueCategory::HeroDied,
        CueCategory::MatchLost,
        CueCategory::HeroHealed,
        CueCategory::HeroKilled,
        CueCategory::MatchStarted,
        CueCategory::MidasReady,
        CueCategory::HeroRespawned,
        CueCategory::HeroSmoked,
        CueCategory::MatchWon,
        CueCategory::Ambient,
    ];

    /// Stable identifier used in configuration files
    pub fn id(&self) -> &'static str {
        match self {
            CueCategory::BountyRunes => "bounty_runes",
            CueCategory::HeroDied => "hero_died",
            CueCategory::MatchLost => "match_lost",
            CueCategory::HeroHealed => "hero_healed",
            CueCategory::HeroKilled => "hero_killed",
            CueCategory::MatchStarted => "match_started",
            CueCategory::MidasReady => "midas_ready",
            CueCategory::HeroRespawned => "hero_respawned",
            CueCategory::HeroSmoked => "hero_smoked",
            CueCategory::MatchWon => "match_won",
            CueCategory::Ambient => "ambient",
        }
    }

    /// Human-readable name for settings screens
    pub fn display_name(&self) -> &'static str {
        match self {
            CueCategory::BountyRunes => "Bounty runes spawning",
            CueCategory::HeroDied => "Got killed",
            CueCategory::MatchLost => "Lost the match",
            CueCategory::HeroHealed => "Got healed",
            CueCategory::HeroKilled => "Killed a hero",
            CueCategory::MatchStarted => "Match starting",
            CueCategory::MidasReady => "Midas is ready",
            CueCategory::HeroRespawned => "Respawned",
            CueCategory::HeroSmoked => "Used Smoke of Deceit",
            CueCategory::MatchWon => "Won the match",
            CueCategory::Ambient => "As time goes on",
        }
    }
}

impl fmt::Display for CueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CueCategory {
    type Err = CueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CueCategory::ALL
            .iter()
            .copied()
            .find(|category| category.id() == s)
            .ok_or_else(|| CueError::UnknownCategory(s.to_string()))
    }
}

/// Decision logic for one cue category
pub trait CueRule: Send {
    /// Category this rule fires for
    fn category(&self) -> CueCategory;

    /// Decide whether the cue fires for this transition
    ///
    /// Rules fire on state changes only: a transition without a previous
    /// snapshot never fires. Rules that keep state across calls update it here.
    fn evaluate(&mut self, transition: &Transition<'_>) -> bool;
}

/// Boxed rule that can be stored in the registry
pub type BoxedRule = Box<dyn CueRule>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_round_trip() {
        for category in CueCategory::ALL {
            assert_eq!(category.id().parse::<CueCategory>().unwrap(), category);
            assert_eq!(category.to_string(), category.id());
        }
    }

    #[test]
    fn test_category_serde_matches_id() {
        for category in CueCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.id()));
        }
    }

    #[test]
    fn test_unknown_category() {
        let err = "first_blood".parse::<CueCategory>().unwrap_err();
        assert!(matches!(err, CueError::UnknownCategory(ref id) if id == "first_blood"));
    }

    #[test]
    fn test_display_names_are_distinct() {
        let mut names: Vec<_> = CueCategory::ALL.iter().map(|c| c.display_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CueCategory::ALL.len());
    }
}
