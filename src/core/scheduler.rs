//! # Scheduler: the periodic probe loop of one session.
//!
//! Fires a probe on a fixed-period schedule until its token is cancelled,
//! then waits for the probes already in flight and exits.
//!
//! ## Architecture
//! ```text
//! Session::spawn ──► Scheduler::run(token)
//!
//! loop {
//!   select (biased) {
//!     token cancelled   → break
//!     probe joined      → panic? log fault, keep going
//!     tick              → tick += 1, spawn probe_once() into JoinSet
//!   }
//! }
//! drain JoinSet (in-flight probes finish and publish)
//! ```
//!
//! ## Rules
//! - Ticks are measured from loop start: `t0, t0 + N, t0 + 2N, ...`. The
//!   first probe fires immediately.
//! - Probes run in their own tasks, so a slow probe never delays the next
//!   tick. Missed ticks (runtime starvation) are skipped, not bursted.
//! - No probe starts once cancellation is observed.
//! - In-flight probes are never aborted; the probe timeout bounds the drain.
//! - A panicking probe is an internal fault: it is logged and counted, and
//!   the loop keeps ticking.

use std::{sync::Arc, time::Duration};

use tokio::{
    select,
    task::{JoinError, JoinSet},
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{core::runner::probe_once, events::Bus, probe::Probe};

/// Summary returned when a scheduler loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerExit {
    /// Number of ticks fired (= probes started).
    pub ticks: u64,
    /// Number of probes that panicked instead of producing an outcome.
    pub faults: u64,
}

/// Periodic probe loop for one session.
pub(crate) struct Scheduler {
    probe: Arc<dyn Probe>,
    target: Url,
    interval: Duration,
    timeout: Duration,
    session: u64,
    bus: Bus,
}

impl Scheduler {
    /// Creates a scheduler.
    ///
    /// `timeout` must be strictly below `interval`; see
    /// [`PollerConfig::timeout_for`](crate::PollerConfig::timeout_for).
    pub fn new(
        probe: Arc<dyn Probe>,
        target: Url,
        interval: Duration,
        timeout: Duration,
        session: u64,
        bus: Bus,
    ) -> Self {
        debug_assert!(timeout < interval, "probe timeout must be below interval");
        Self {
            probe,
            target,
            interval,
            timeout,
            session,
            bus,
        }
    }

    /// Runs the loop until `token` is cancelled, then drains in-flight probes.
    pub async fn run(self, token: CancellationToken) -> SchedulerExit {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut inflight: JoinSet<()> = JoinSet::new();
        let mut exit = SchedulerExit::default();

        loop {
            select! {
                biased;

                _ = token.cancelled() => break,

                Some(res) = inflight.join_next(), if !inflight.is_empty() => {
                    if let Err(e) = res {
                        self.report_fault(&mut exit, e);
                    }
                }

                _ = ticker.tick() => {
                    if token.is_cancelled() {
                        break;
                    }
                    exit.ticks += 1;
                    tracing::debug!(
                        session = self.session,
                        tick = exit.ticks,
                        inflight = inflight.len(),
                        "tick"
                    );
                    self.spawn_probe(&mut inflight, exit.ticks);
                }
            }
        }

        if !inflight.is_empty() {
            tracing::debug!(
                session = self.session,
                inflight = inflight.len(),
                "waiting for in-flight probes"
            );
        }
        while let Some(res) = inflight.join_next().await {
            if let Err(e) = res {
                self.report_fault(&mut exit, e);
            }
        }
        exit
    }

    fn spawn_probe(&self, inflight: &mut JoinSet<()>, tick: u64) {
        let probe = Arc::clone(&self.probe);
        let target = self.target.clone();
        let bus = self.bus.clone();
        let timeout = self.timeout;
        let session = self.session;

        inflight.spawn(async move {
            probe_once(probe.as_ref(), &target, timeout, session, tick, &bus).await;
        });
    }

    fn report_fault(&self, exit: &mut SchedulerExit, err: JoinError) {
        if err.is_panic() {
            exit.faults += 1;
            tracing::error!(
                session = self.session,
                probe = self.probe.name(),
                "probe panicked; no outcome for this tick"
            );
        }
    }
}
