//! Telemetry payload parsing
//!
//! The game client pushes a JSON object with `map`, `player`, `hero` and
//! `items` sections. Only the fields the cue rules consume are modelled;
//! everything else (provider info, `previously`/`added` deltas, stash and
//! neutral slots) is ignored.

use serde::Deserialize;
use std::collections::HashMap;

use super::snapshot::{ItemSlot, MatchPhase, StateSnapshot, MAX_ITEM_SLOTS};
use crate::{CueError, Result};

/// Item name the game reports for an unoccupied slot
const EMPTY_SLOT: &str = "empty";

/// Raw telemetry push
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamePayload {
    #[serde(default)]
    pub map: Option<MapSection>,
    #[serde(default)]
    pub player: Option<PlayerSection>,
    #[serde(default)]
    pub hero: Option<HeroSection>,
    #[serde(default)]
    pub items: Option<HashMap<String, ItemSection>>,
}

/// `map` section of the push
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapSection {
    #[serde(default)]
    pub clock_time: Option<i64>,
    #[serde(default)]
    pub game_state: Option<String>,
    #[serde(default)]
    pub win_team: Option<String>,
}

/// `player` section of the push
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerSection {
    #[serde(default)]
    pub kills: Option<u32>,
    #[serde(default)]
    pub team_name: Option<String>,
}

/// `hero` section of the push
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroSection {
    #[serde(default)]
    pub alive: Option<bool>,
    #[serde(default)]
    pub health_percent: Option<u32>,
    #[serde(default)]
    pub smoked: Option<bool>,
}

/// One entry of the `items` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemSection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cooldown: Option<f32>,
}

/// Parse a raw push into a snapshot
pub fn parse_snapshot(raw: &[u8]) -> Result<StateSnapshot> {
    let payload: GamePayload = serde_json::from_slice(raw)?;
    Ok(payload.into_snapshot())
}

/// Parse a raw push given as text
pub fn parse_snapshot_str(raw: &str) -> Result<StateSnapshot> {
    if raw.trim().is_empty() {
        return Err(CueError::MalformedPayload("empty payload".to_string()));
    }
    parse_snapshot(raw.as_bytes())
}

impl GamePayload {
    /// Convert into the snapshot model
    pub fn into_snapshot(self) -> StateSnapshot {
        let match_phase = derive_phase(self.map.as_ref(), self.player.as_ref());
        let items = self.items.map(|items| inventory_slots(&items));

        StateSnapshot {
            clock_time: self.map.as_ref().and_then(|m| m.clock_time),
            hero_alive: self.hero.as_ref().and_then(|h| h.alive),
            match_phase,
            items,
            kills: self.player.as_ref().and_then(|p| p.kills),
            health_percent: self.hero.as_ref().and_then(|h| h.health_percent),
            smoked: self.hero.as_ref().and_then(|h| h.smoked),
        }
    }
}

/// Map `game_state` / `win_team` onto the coarse phase
fn derive_phase(map: Option<&MapSection>, player: Option<&PlayerSection>) -> MatchPhase {
    let Some(map) = map else {
        return MatchPhase::Unknown;
    };

    let team = player.and_then(|p| p.team_name.as_deref());
    if let (Some(winner), Some(team)) = (map.win_team.as_deref(), team) {
        if is_team(winner) && is_team(team) {
            return if winner.eq_ignore_ascii_case(team) {
                MatchPhase::Won
            } else {
                MatchPhase::Lost
            };
        }
    }

    match map.game_state.as_deref() {
        Some(
            "DOTA_GAMERULES_STATE_HERO_SELECTION"
            | "DOTA_GAMERULES_STATE_STRATEGY_TIME"
            | "DOTA_GAMERULES_STATE_TEAM_SHOWCASE"
            | "DOTA_GAMERULES_STATE_WAIT_FOR_MAP_TO_LOAD"
            | "DOTA_GAMERULES_STATE_PRE_GAME",
        ) => MatchPhase::Pregame,
        Some("DOTA_GAMERULES_STATE_GAME_IN_PROGRESS") => MatchPhase::Playing,
        _ => MatchPhase::Unknown,
    }
}

fn is_team(name: &str) -> bool {
    name.eq_ignore_ascii_case("radiant") || name.eq_ignore_ascii_case("dire")
}

/// Inventory slots `slot0`..`slot5` in order. Stash, teleport and neutral
/// slots are not part of the inventory.
fn inventory_slots(items: &HashMap<String, ItemSection>) -> Vec<Option<ItemSlot>> {
    (0..MAX_ITEM_SLOTS)
        .map(|index| {
            let section = items.get(&format!("slot{}", index))?;
            let name = section.name.as_deref()?;
            if name == EMPTY_SLOT {
                return None;
            }
            Some(ItemSlot {
                name: name.to_string(),
                cooldown: section.cooldown,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN_PROGRESS: &str = r#"{
        "provider": { "name": "Dota 2", "appid": 570 },
        "map": {
            "clock_time": 612,
            "game_state": "DOTA_GAMERULES_STATE_GAME_IN_PROGRESS",
            "win_team": "none"
        },
        "player": { "kills": 3, "deaths": 1, "team_name": "radiant" },
        "hero": { "alive": true, "health_percent": 87, "smoked": false },
        "items": {
            "slot0": { "name": "item_hand_of_midas", "cooldown": 41, "can_cast": false },
            "slot1": { "name": "empty" },
            "slot2": { "name": "item_power_treads", "cooldown": 0 },
            "stash0": { "name": "item_hand_of_midas", "cooldown": 0 }
        },
        "previously": { "map": { "clock_time": 611 } }
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let snapshot = parse_snapshot_str(IN_PROGRESS).unwrap();

        assert_eq!(snapshot.clock_time, Some(612));
        assert_eq!(snapshot.hero_alive, Some(true));
        assert_eq!(snapshot.match_phase, MatchPhase::Playing);
        assert_eq!(snapshot.kills, Some(3));
        assert_eq!(snapshot.health_percent, Some(87));
        assert_eq!(snapshot.smoked, Some(false));

        let items = snapshot.items.as_ref().unwrap();
        assert_eq!(items.len(), MAX_ITEM_SLOTS);
        assert_eq!(items[0], Some(ItemSlot::new("item_hand_of_midas", 41.0)));
        assert_eq!(items[1], None);
        assert_eq!(items[2], Some(ItemSlot::new("item_power_treads", 0.0)));
        assert!(items[3..].iter().all(Option::is_none));
        assert!(!snapshot.has_item_ready("item_hand_of_midas"));
    }

    #[test]
    fn test_missing_sections_stay_absent() {
        let snapshot = parse_snapshot_str(r#"{ "map": { "clock_time": -30 } }"#).unwrap();

        assert_eq!(snapshot.clock_time, Some(-30));
        assert!(snapshot.hero_alive.is_none());
        assert!(snapshot.kills.is_none());
        assert!(snapshot.items.is_none());
        assert_eq!(snapshot.match_phase, MatchPhase::Unknown);
    }

    #[test]
    fn test_empty_object_is_valid() {
        let snapshot = parse_snapshot_str("{}").unwrap();
        assert_eq!(snapshot, StateSnapshot::new());
    }

    #[test]
    fn test_phase_derivation() {
        let pregame = parse_snapshot_str(
            r#"{ "map": { "game_state": "DOTA_GAMERULES_STATE_PRE_GAME", "win_team": "none" } }"#,
        )
        .unwrap();
        assert_eq!(pregame.match_phase, MatchPhase::Pregame);

        let won = parse_snapshot_str(
            r#"{ "map": { "game_state": "DOTA_GAMERULES_STATE_POST_GAME", "win_team": "dire" },
                 "player": { "team_name": "dire" } }"#,
        )
        .unwrap();
        assert_eq!(won.match_phase, MatchPhase::Won);

        let lost = parse_snapshot_str(
            r#"{ "map": { "game_state": "DOTA_GAMERULES_STATE_POST_GAME", "win_team": "radiant" },
                 "player": { "team_name": "dire" } }"#,
        )
        .unwrap();
        assert_eq!(lost.match_phase, MatchPhase::Lost);

        // Winner known but our team is not: no verdict
        let spectating = parse_snapshot_str(
            r#"{
                "map": { "game_state": "DOTA_GAMERULES_STATE_POST_GAME", "win_team": "radiant" }
            }"#,
        )
        .unwrap();
        assert_eq!(spectating.match_phase, MatchPhase::Unknown);
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        assert!(matches!(parse_snapshot_str(""), Err(CueError::MalformedPayload(_))));
        assert!(matches!(parse_snapshot_str("not json"), Err(CueError::MalformedPayload(_))));
        assert!(matches!(parse_snapshot_str("[1, 2, 3]"), Err(CueError::MalformedPayload(_))));
        assert!(matches!(
            parse_snapshot_str(r#"{ "map": { "clock_time": "soon" } }"#),
            Err(CueError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_item_without_cooldown() {
        let snapshot = parse_snapshot_str(
            r#"{ "items": { "slot3": { "name": "item_hand_of_midas" } } }"#,
        )
        .unwrap();

        let items = snapshot.items.unwrap();
        assert_eq!(items[3], Some(ItemSlot::without_cooldown("item_hand_of_midas")));
    }
}
