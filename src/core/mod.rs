//! Core cue engine abstractions
//!
//! This module contains the runtime pieces driven by telemetry pushes:
//! - `GameStateMonitor` - Entry point holding the session's snapshots
//! - `CueEngine` - Evaluates rules and dispatches playback
//! - `PlaybackRequest` - Events handed to the playback sink

mod engine;
mod events;
mod monitor;
mod status;

pub use engine::CueEngine;
pub use events::{
    ChannelSink, ConnectedCallback, EventHandler, PlaybackQueue, PlaybackRequest, PlaybackSink,
};
pub use monitor::GameStateMonitor;
pub use status::MonitorStatus;
