//! Bulldog Cues
//!
//! Telemetry-driven audio cue engine for Dota 2 game state integration.
//! Consumes successive game state snapshots pushed by the game client,
//! decides which cues fire and hands the chosen clips to a playback sink.
//!
//! The crate is split into:
//! - `state` - Snapshot model and telemetry payload parsing
//! - `cues` - Cue categories, rules and the rule registry
//! - `clips` - Clip catalog and anti-repeat clip selection
//! - `core` - Game state monitor, event engine and playback events
//! - `config` - Engine configuration and atomic config swapping
//!
//! # Example
//!
//! ```ignore
//! use bulldog_cues::{ConfigHandle, CueEngine, EngineConfig, GameStateMonitor, PlaybackQueue};
//!
//! let (sink, requests) = PlaybackQueue::unbounded();
//! let config = ConfigHandle::new(EngineConfig::default());
//! let engine = CueEngine::with_defaults(config.clone(), sink);
//! let monitor = GameStateMonitor::new(engine);
//!
//! // From the telemetry listener thread
//! monitor.on_payload(body);
//!
//! // From the audio thread
//! for request in requests.iter() {
//!     play(&request.clip, request.volume);
//! }
//! ```

pub mod clips;
pub mod config;
pub mod core;
pub mod cues;
pub mod random;
pub mod state;

// Re-export commonly used types
pub use clips::{Clip, ClipCatalog, ClipSelector};
pub use config::{CategoryConfig, ConfigHandle, EngineConfig};
pub use crate::core::{
    ChannelSink, CueEngine, GameStateMonitor, MonitorStatus, PlaybackQueue, PlaybackRequest,
    PlaybackSink,
};
pub use cues::{CueCategory, CueRegistry, CueRule};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{ItemSlot, MatchPhase, StateSnapshot, Transition};

/// Errors surfaced by the cue engine
#[derive(Debug, thiserror::Error)]
pub enum CueError {
    #[error("Malformed telemetry payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown cue category: {0}")]
    UnknownCategory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CueError {
    fn from(err: serde_json::Error) -> Self {
        CueError::MalformedPayload(err.to_string())
    }
}

impl From<toml::de::Error> for CueError {
    fn from(err: toml::de::Error) -> Self {
        CueError::InvalidConfig(err.to_string())
    }
}

/// Result type for cue engine operations
pub type Result<T> = std::result::Result<T, CueError>;
