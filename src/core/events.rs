//! Events emitted by the cue engine

use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::time::Instant;

use crate::clips::Clip;
use crate::cues::CueCategory;

/// Request to play one clip, emitted when a cue fires
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    /// Category whose rule fired
    pub category: CueCategory,
    /// Clip chosen for this firing
    pub clip: Clip,
    /// Playback volume in `[0, 1]`
    pub volume: f32,
    /// When the cue fired
    pub timestamp: Instant,
}

impl PlaybackRequest {
    /// Create a playback request stamped with the current time
    pub fn new(category: CueCategory, clip: Clip, volume: f32) -> Self {
        Self {
            category,
            clip,
            volume,
            timestamp: Instant::now(),
        }
    }
}

/// Receiver of playback requests
///
/// `play` is called while the engine holds its processing lock, so
/// implementations must hand the request off without waiting for playback.
pub trait PlaybackSink: Send + Sync {
    /// Queue a clip for playback
    fn play(&self, request: PlaybackRequest);
}

impl<F> PlaybackSink for F
where
    F: Fn(PlaybackRequest) + Send + Sync,
{
    fn play(&self, request: PlaybackRequest) {
        self(request)
    }
}

/// Sink that forwards requests over a channel to an audio thread
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<PlaybackRequest>,
}

impl PlaybackSink for ChannelSink {
    fn play(&self, request: PlaybackRequest) {
        match self.sender.try_send(request) {
            Ok(()) => {}
            Err(TrySendError::Full(request)) => {
                log::warn!("Playback queue full, dropping {} ({})", request.clip, request.category);
            }
            Err(TrySendError::Disconnected(request)) => {
                log::debug!("Playback receiver gone, dropping {}", request.clip);
            }
        }
    }
}

/// Constructors for channel-backed playback queues
pub struct PlaybackQueue;

impl PlaybackQueue {
    /// Queue without a capacity limit
    pub fn unbounded() -> (ChannelSink, Receiver<PlaybackRequest>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (ChannelSink { sender }, receiver)
    }

    /// Queue holding at most `capacity` pending requests; overflow is dropped
    pub fn bounded(capacity: usize) -> (ChannelSink, Receiver<PlaybackRequest>) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        (ChannelSink { sender }, receiver)
    }
}

/// Callback run when the game is first heard from
pub type ConnectedCallback = Box<dyn Fn() + Send + Sync>;

/// Listeners for monitor lifecycle events
pub struct EventHandler {
    connected: Vec<ConnectedCallback>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            connected: Vec::new(),
        }
    }

    /// Add a callback for the first valid update
    pub fn on_connected(&mut self, callback: ConnectedCallback) {
        self.connected.push(callback);
    }

    /// Notify all connection listeners
    pub fn emit_connected(&self) {
        for callback in &self.connected {
            callback();
        }
    }

    /// Check if there are any listeners
    pub fn has_listeners(&self) -> bool {
        !self.connected.is_empty()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn request(clip: &str) -> PlaybackRequest {
        PlaybackRequest::new(CueCategory::HeroDied, Clip::new(clip), 0.5)
    }

    #[test]
    fn test_channel_sink_delivers_in_order() {
        let (sink, receiver) = PlaybackQueue::unbounded();

        sink.play(request("A"));
        sink.play(request("B"));

        let clips: Vec<_> = receiver.try_iter().map(|r| r.clip).collect();
        assert_eq!(clips, vec![Clip::new("A"), Clip::new("B")]);
    }

    #[test]
    fn test_bounded_sink_drops_overflow_without_blocking() {
        let (sink, receiver) = PlaybackQueue::bounded(1);

        sink.play(request("A"));
        sink.play(request("B"));

        assert_eq!(receiver.len(), 1);
        assert_eq!(receiver.recv().unwrap().clip, Clip::new("A"));
    }

    #[test]
    fn test_disconnected_sink_is_silent() {
        let (sink, receiver) = PlaybackQueue::unbounded();
        drop(receiver);

        sink.play(request("A"));
    }

    #[test]
    fn test_closure_sink() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let sink = move |_request: PlaybackRequest| {
            counter.fetch_add(1, Ordering::SeqCst);
        };

        sink.play(request("A"));
        sink.play(request("B"));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_event_handler_emits_to_all_listeners() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut handler = EventHandler::new();
        assert!(!handler.has_listeners());

        for _ in 0..2 {
            let counter = count.clone();
            handler.on_connected(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        handler.emit_connected();
        assert!(handler.has_listeners());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
