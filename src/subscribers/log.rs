//! # LogWriter — events to `tracing`
//!
//! A minimal subscriber that writes incoming [`Event`]s as `tracing` records
//! under the `url_poller::events` target. Install any `tracing` subscriber to
//! see them.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO url_poller::events: session started session=1 target_url="https://example.com/" interval_secs=5
//! INFO url_poller::events: poll ok session=1 tick=1 status=200 latency_ms=41
//! WARN url_poller::events: poll failed session=1 tick=2 reason=timeout error="operation timed out"
//! INFO url_poller::events: session stopped session=1 ticks=2
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::SessionStarted => {
                tracing::info!(
                    target: "url_poller::events",
                    session = e.session,
                    target_url = %e.target,
                    interval_secs = e.interval_secs,
                    "session started"
                );
            }
            EventKind::ProbeCompleted => {
                let Some(out) = &e.outcome else { return };
                let latency_ms = out.latency.as_millis() as u64;
                if out.succeeded {
                    tracing::info!(
                        target: "url_poller::events",
                        session = e.session,
                        tick = e.tick,
                        status = out.status_code,
                        latency_ms,
                        "poll ok"
                    );
                } else {
                    tracing::warn!(
                        target: "url_poller::events",
                        session = e.session,
                        tick = e.tick,
                        status = out.status_code,
                        reason = out.reason.map(|r| r.as_str()),
                        error = out.error.as_deref(),
                        latency_ms,
                        "poll failed"
                    );
                }
            }
            EventKind::SessionStopped => {
                tracing::info!(
                    target: "url_poller::events",
                    session = e.session,
                    ticks = e.tick,
                    reason = e.reason.as_deref(),
                    "session stopped"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
