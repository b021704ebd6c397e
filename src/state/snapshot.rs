//! Game state snapshot types

use serde::{Deserialize, Serialize};

/// Maximum number of inventory slots tracked per snapshot
pub const MAX_ITEM_SLOTS: usize = 6;

/// Coarse match phase derived from the telemetry push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Hero selection through the pre-game countdown
    Pregame,
    /// Horn has sounded, match in progress
    Playing,
    /// The player's team won
    Won,
    /// The player's team lost
    Lost,
    /// No phase information, or a phase the engine does not track
    #[default]
    Unknown,
}

impl MatchPhase {
    /// Whether this phase belongs to a match that has not finished yet
    pub fn is_in_match(&self) -> bool {
        matches!(self, MatchPhase::Pregame | MatchPhase::Playing)
    }
}

/// One occupied inventory slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSlot {
    /// Item identifier (e.g. "item_hand_of_midas")
    pub name: String,
    /// Remaining cooldown in seconds, 0 when ready; `None` when not reported
    pub cooldown: Option<f32>,
}

impl ItemSlot {
    /// Create a new item slot
    pub fn new(name: impl Into<String>, cooldown: f32) -> Self {
        Self {
            name: name.into(),
            cooldown: Some(cooldown),
        }
    }

    /// Create a slot whose cooldown was not reported
    pub fn without_cooldown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cooldown: None,
        }
    }

    /// Item is cooling down. Negative, NaN and missing cooldowns never match.
    pub fn is_on_cooldown(&self) -> bool {
        matches!(self.cooldown, Some(cooldown) if cooldown > 0.0)
    }

    /// Item is ready. Compared exactly against zero.
    pub fn is_ready(&self) -> bool {
        matches!(self.cooldown, Some(cooldown) if cooldown == 0.0)
    }
}

/// Immutable view of the game at one telemetry push
///
/// Every field is optional: data missing from the push stays `None` rather
/// than being defaulted, so that absent data can never look like a change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// In-game clock in seconds. Negative before the horn; resets between matches.
    pub clock_time: Option<i64>,
    /// Whether the player's hero is alive
    pub hero_alive: Option<bool>,
    /// Match phase
    pub match_phase: MatchPhase,
    /// Inventory slots in order; `None` when the push carried no item data
    pub items: Option<Vec<Option<ItemSlot>>>,
    /// Player's hero kills this match
    pub kills: Option<u32>,
    /// Hero health as a percentage of maximum
    pub health_percent: Option<u32>,
    /// Whether the hero is under Smoke of Deceit
    pub smoked: Option<bool>,
}

impl StateSnapshot {
    /// Create an empty snapshot (no information at all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the in-game clock
    pub fn with_clock_time(mut self, seconds: i64) -> Self {
        self.clock_time = Some(seconds);
        self
    }

    /// Set the hero alive flag
    pub fn with_hero_alive(mut self, alive: bool) -> Self {
        self.hero_alive = Some(alive);
        self
    }

    /// Set the match phase
    pub fn with_match_phase(mut self, phase: MatchPhase) -> Self {
        self.match_phase = phase;
        self
    }

    /// Set the inventory, truncated to `MAX_ITEM_SLOTS`
    pub fn with_items(mut self, mut items: Vec<Option<ItemSlot>>) -> Self {
        items.truncate(MAX_ITEM_SLOTS);
        self.items = Some(items);
        self
    }

    /// Set the kill count
    pub fn with_kills(mut self, kills: u32) -> Self {
        self.kills = Some(kills);
        self
    }

    /// Set the health percentage
    pub fn with_health_percent(mut self, percent: u32) -> Self {
        self.health_percent = Some(percent);
        self
    }

    /// Set the smoked flag
    pub fn with_smoked(mut self, smoked: bool) -> Self {
        self.smoked = Some(smoked);
        self
    }

    /// Occupied item slots, empty when there is no slot information
    pub fn item_slots(&self) -> impl Iterator<Item = &ItemSlot> {
        self.items.iter().flatten().flatten()
    }

    /// Whether any slot holds `name` while it is on cooldown
    pub fn has_item_on_cooldown(&self, name: &str) -> bool {
        self.item_slots()
            .any(|slot| slot.name == name && slot.is_on_cooldown())
    }

    /// Whether any slot holds `name` while it is ready
    pub fn has_item_ready(&self, name: &str) -> bool {
        self.item_slots()
            .any(|slot| slot.name == name && slot.is_ready())
    }
}

/// The (previous, current) snapshot pair handed to every cue rule
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// Snapshot from the prior update; `None` for the first update of a session
    pub previous: Option<&'a StateSnapshot>,
    /// Snapshot from this update
    pub current: &'a StateSnapshot,
}

impl<'a> Transition<'a> {
    /// Create a transition
    pub fn new(previous: Option<&'a StateSnapshot>, current: &'a StateSnapshot) -> Self {
        Self { previous, current }
    }

    /// Transition for the first snapshot of a session
    pub fn initial(current: &'a StateSnapshot) -> Self {
        Self {
            previous: None,
            current,
        }
    }

    /// Both snapshots, or `None` when no transition has occurred yet
    pub fn pair(&self) -> Option<(&'a StateSnapshot, &'a StateSnapshot)> {
        self.previous.map(|previous| (previous, self.current))
    }

    /// Whether this is the first snapshot of a session
    pub fn is_initial(&self) -> bool {
        self.previous.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDAS: &str = "item_hand_of_midas";

    #[test]
    fn test_snapshot_default_has_no_information() {
        let snapshot = StateSnapshot::new();

        assert!(snapshot.clock_time.is_none());
        assert!(snapshot.hero_alive.is_none());
        assert_eq!(snapshot.match_phase, MatchPhase::Unknown);
        assert!(snapshot.items.is_none());
        assert_eq!(snapshot.item_slots().count(), 0);
    }

    #[test]
    fn test_items_truncated_to_six_slots() {
        let slots = (0..9).map(|i| Some(ItemSlot::new(format!("item_{}", i), 0.0))).collect();
        let snapshot = StateSnapshot::new().with_items(slots);

        assert_eq!(snapshot.items.as_ref().map(|s| s.len()), Some(MAX_ITEM_SLOTS));
    }

    #[test]
    fn test_item_cooldown_queries() {
        let snapshot = StateSnapshot::new().with_items(vec![
            None,
            Some(ItemSlot::new("item_blink", 0.0)),
            Some(ItemSlot::new(MIDAS, 42.5)),
        ]);

        assert!(snapshot.has_item_on_cooldown(MIDAS));
        assert!(!snapshot.has_item_ready(MIDAS));
        assert!(snapshot.has_item_ready("item_blink"));
        assert!(!snapshot.has_item_on_cooldown("item_blink"));
    }

    #[test]
    fn test_negative_and_nan_cooldowns_match_nothing() {
        let negative = ItemSlot::new(MIDAS, -1.0);
        let nan = ItemSlot::new(MIDAS, f32::NAN);

        assert!(!negative.is_on_cooldown());
        assert!(!negative.is_ready());
        assert!(!nan.is_on_cooldown());
        assert!(!nan.is_ready());

        let unreported = ItemSlot::without_cooldown(MIDAS);
        assert!(!unreported.is_on_cooldown());
        assert!(!unreported.is_ready());
    }

    #[test]
    fn test_transition_pair() {
        let a = StateSnapshot::new().with_clock_time(1);
        let b = StateSnapshot::new().with_clock_time(2);

        let initial = Transition::initial(&a);
        assert!(initial.is_initial());
        assert!(initial.pair().is_none());

        let transition = Transition::new(Some(&a), &b);
        let (previous, current) = transition.pair().unwrap();
        assert_eq!(previous.clock_time, Some(1));
        assert_eq!(current.clock_time, Some(2));
    }

    #[test]
    fn test_phase_in_match() {
        assert!(MatchPhase::Pregame.is_in_match());
        assert!(MatchPhase::Playing.is_in_match());
        assert!(!MatchPhase::Won.is_in_match());
        assert!(!MatchPhase::Lost.is_in_match());
        assert!(!MatchPhase::Unknown.is_in_match());
    }
}
