//! # Run a single probe.
//!
//! Executes one [`Probe`] call with a hard timeout and publishes its outcome.
//!
//! ## Event flow
//! ```text
//! Completed:
//!   probe.probe() → PollOutcome → publish ProbeCompleted
//!
//! Overrun:
//!   timeout exceeded → PollOutcome::failure(Timeout) → publish ProbeCompleted
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** `ProbeCompleted` event
//! - The event is created at completion, so its `seq` reflects completion order
//! - Cancellation of the session does **not** reach the probe; only the timeout bounds it

use std::time::Duration;

use tokio::time::{self, Instant};
use url::Url;

use crate::{
    events::{Bus, Event, EventKind},
    probe::{FailureReason, PollOutcome, Probe},
};

/// Probes `target` once and publishes the outcome to `bus`.
pub(crate) async fn probe_once(
    probe: &dyn Probe,
    target: &Url,
    timeout: Duration,
    session: u64,
    tick: u64,
    bus: &Bus,
) {
    let started = Instant::now();

    let outcome = match time::timeout(timeout, probe.probe(target, timeout)).await {
        Ok(out) => out,
        Err(_elapsed) => PollOutcome::failure(
            target.as_str(),
            FailureReason::Timeout,
            format!("probe exceeded {timeout:?}"),
            started.elapsed(),
        ),
    };

    if !outcome.succeeded {
        tracing::warn!(
            session,
            tick,
            probe = probe.name(),
            status = outcome.status_code,
            reason = outcome.reason.map(|r| r.as_str()),
            "probe failed"
        );
    }

    bus.publish(
        Event::new(EventKind::ProbeCompleted, session, target.as_str())
            .with_tick(tick)
            .with_outcome(outcome),
    );
}
