//! # Events emitted by the polling engine.
//!
//! The [`EventKind`] enum classifies events into:
//! - **Probe results**: one [`EventKind::ProbeCompleted`] per finished probe
//!   (the `pollResult` channel)
//! - **Session lifecycle**: [`EventKind::SessionStarted`] and
//!   [`EventKind::SessionStopped`], published only on real transitions
//!
//! The [`Event`] struct carries the session id, target, tick number and the
//! [`PollOutcome`] for probe results.
//!
//! ## Ordering guarantees
//! Every event has a process-wide sequence number (`seq`) assigned at
//! creation. Probe results are created at probe completion, so `seq` order
//! only approximates completion order when probes overlap on several
//! threads. Delivery order is the FIFO order of the bus: subscribers see
//! events in the order they were published, which may differ from `seq`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use url_poller::{Event, EventKind, PollOutcome};
//!
//! let out = PollOutcome::response("http://localhost/", 200, Duration::from_millis(3), None);
//! let ev = Event::new(EventKind::ProbeCompleted, 7, "http://localhost/")
//!     .with_tick(1)
//!     .with_outcome(out);
//!
//! assert_eq!(ev.kind.channel(), "pollResult");
//! assert_eq!(ev.session, 7);
//! assert!(ev.outcome.as_ref().is_some_and(|o| o.succeeded));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::probe::PollOutcome;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of engine events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A session entered `Running`.
    ///
    /// Sets:
    /// - `session`, `target`
    /// - `interval_secs`: session interval
    SessionStarted,

    /// A probe finished (successfully or not).
    ///
    /// Sets:
    /// - `session`, `target`
    /// - `tick`: 1-based tick number that started the probe
    /// - `outcome`: the probe result
    ProbeCompleted,

    /// A session finished teardown; no further results follow for it.
    ///
    /// Sets:
    /// - `session`, `target`
    /// - `tick`: number of ticks the session fired
    /// - `reason`: set when teardown observed an internal fault
    SessionStopped,
}

impl EventKind {
    /// Channel name used by the boundary layer.
    pub fn channel(&self) -> &'static str {
        match self {
            EventKind::SessionStarted => "sessionStarted",
            EventKind::ProbeCompleted => "pollResult",
            EventKind::SessionStopped => "sessionStopped",
        }
    }
}

/// Engine event with optional metadata.
#[derive(Debug, Clone)]
pub struct Event {
    /// Process-wide, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock creation time.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Id of the session the event belongs to.
    pub session: u64,
    /// Session target.
    pub target: Arc<str>,
    /// Tick number (see [`EventKind`] for meaning per kind).
    pub tick: Option<u64>,
    /// Session interval in seconds.
    pub interval_secs: Option<u64>,
    /// Probe result, for [`EventKind::ProbeCompleted`].
    pub outcome: Option<PollOutcome>,
    /// Human-readable detail.
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event with the current timestamp and next sequence number.
    pub fn new(kind: EventKind, session: u64, target: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            session,
            target: target.into(),
            tick: None,
            interval_secs: None,
            outcome: None,
            reason: None,
        }
    }

    /// Attaches a tick number.
    #[inline]
    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Attaches the session interval (stored as whole seconds).
    #[inline]
    pub fn with_interval(mut self, d: Duration) -> Self {
        self.interval_secs = Some(d.as_secs());
        self
    }

    /// Attaches a probe outcome.
    #[inline]
    pub fn with_outcome(mut self, outcome: PollOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[inline]
    pub fn is_poll_result(&self) -> bool {
        matches!(self.kind, EventKind::ProbeCompleted)
    }
}
