//! Game state monitor: entry point for telemetry pushes

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::engine::CueEngine;
use super::events::{ConnectedCallback, EventHandler, PlaybackRequest};
use super::status::MonitorStatus;
use crate::state::{parse_snapshot, StateSnapshot, Transition};
use crate::Result;

/// Session state guarded by the processing lock
struct Session {
    engine: CueEngine,
    previous: Option<Arc<StateSnapshot>>,
    current: Option<Arc<StateSnapshot>>,
    status: MonitorStatus,
}

/// Receives telemetry pushes and drives the cue engine
///
/// One monitor lives for one connected session. Pushes may arrive on any
/// thread; parsing, rule evaluation and dispatch for a push all happen under
/// one lock, so pushes are processed one at a time in arrival order.
pub struct GameStateMonitor {
    session: Mutex<Session>,
    /// Set once the first valid update has been seen
    connected: AtomicBool,
    /// Listeners for the first valid update
    events: Mutex<EventHandler>,
}

impl GameStateMonitor {
    /// Create a monitor driving `engine`
    pub fn new(engine: CueEngine) -> Self {
        Self {
            session: Mutex::new(Session {
                engine,
                previous: None,
                current: None,
                status: MonitorStatus::default(),
            }),
            connected: AtomicBool::new(false),
            events: Mutex::new(EventHandler::new()),
        }
    }

    /// Register a callback for the first valid update of the session
    ///
    /// Callbacks registered after that update never run.
    pub fn on_connected(&self, callback: ConnectedCallback) {
        self.events.lock().on_connected(callback);
    }

    /// Handle a raw push from the telemetry transport
    ///
    /// Malformed payloads are logged and dropped; the stored snapshots are
    /// left untouched and no rule runs.
    pub fn on_payload(&self, raw: &[u8]) {
        if let Err(err) = self.try_on_payload(raw) {
            log::warn!("Dropping telemetry payload: {}", err);
        }
    }

    /// Handle a raw push, returning the dispatched requests or the parse error
    pub fn try_on_payload(&self, raw: &[u8]) -> Result<Vec<PlaybackRequest>> {
        let mut session = self.session.lock();

        let snapshot = match parse_snapshot(raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                session.status.updates_rejected += 1;
                return Err(err);
            }
        };

        let requests = Self::process(&mut session, snapshot);
        drop(session);

        self.mark_connected();
        Ok(requests)
    }

    /// Handle an already parsed snapshot
    pub fn on_snapshot(&self, snapshot: StateSnapshot) -> Vec<PlaybackRequest> {
        let requests = {
            let mut session = self.session.lock();
            Self::process(&mut session, snapshot)
        };

        self.mark_connected();
        requests
    }

    /// Install `snapshot` as current and evaluate the transition from the old one
    fn process(session: &mut Session, snapshot: StateSnapshot) -> Vec<PlaybackRequest> {
        let current = Arc::new(snapshot);
        let previous = session.current.take();

        let requests = session
            .engine
            .on_transition(&Transition::new(previous.as_deref(), &current));

        session.status.connected = true;
        session.status.updates_accepted += 1;
        session.status.cues_played += requests.len() as u64;
        session.status.clock_time = current.clock_time;
        session.status.match_phase = current.match_phase;

        session.previous = previous;
        session.current = Some(current);
        requests
    }

    /// Run the connected callbacks on the first valid update
    ///
    /// Called after the session lock is released. The listeners are taken out
    /// of the handler before they run, so a callback may use the monitor.
    fn mark_connected(&self) {
        if !self.connected.swap(true, Ordering::SeqCst) {
            log::info!("Connected to game");
            let listeners = std::mem::take(&mut *self.events.lock());
            listeners.emit_connected();
        }
    }

    /// Whether any valid update has been received
    pub fn has_heard_from_game(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Snapshot before the latest one
    pub fn previous(&self) -> Option<Arc<StateSnapshot>> {
        self.session.lock().previous.clone()
    }

    /// Latest snapshot
    pub fn current(&self) -> Option<Arc<StateSnapshot>> {
        self.session.lock().current.clone()
    }

    /// Get the current status
    pub fn status(&self) -> MonitorStatus {
        self.session.lock().status.clone()
    }

    /// Run `f` with the engine while holding the processing lock
    pub fn with_engine<R>(&self, f: impl FnOnce(&CueEngine) -> R) -> R {
        f(&self.session.lock().engine)
    }

    /// End the session and hand back the engine
    pub fn into_engine(self) -> CueEngine {
        log::info!("Monitoring stopped");
        self.session.into_inner().engine
    }
}
