//! Game state model
//!
//! - `StateSnapshot` - Immutable view of one telemetry push
//! - `Transition` - The (previous, current) pair cue rules reason about
//! - `payload` - Parsing of the raw JSON push into a snapshot

pub mod payload;
mod snapshot;

pub use payload::{parse_snapshot, parse_snapshot_str};
pub use snapshot::{ItemSlot, MatchPhase, StateSnapshot, Transition, MAX_ITEM_SLOTS};
