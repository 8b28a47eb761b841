use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    config::PollerConfig,
    core::{
        scheduler::Scheduler,
        session::{Session, SessionInfo, SessionStatus},
    },
    error::StartError,
    events::{Bus, Event, EventKind},
    probe::Probe,
};

use super::{builder::ControllerBuilder, request::PollRequest, slot::Slot};

/// Result of [`Controller::stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// A session was active and has fully stopped.
    Stopped(SessionInfo),
    /// Nothing was running; no-op.
    NotRunning,
}

impl StopOutcome {
    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, StopOutcome::Stopped(_))
    }
}

/// Public entry point of the polling engine.
///
/// Owns a single session slot. At most one session is active at a time;
/// `start` on an active slot is rejected, `stop` on an idle slot is a no-op.
///
/// ### Rules
/// - `start` returns as soon as the scheduler is spawned (it does not wait for
///   the first probe).
/// - `stop` returns only after the scheduler loop exited and every in-flight
///   probe published its outcome.
/// - Concurrent `stop` calls all wait for the same teardown.
/// - Dropping the controller cancels any running session.
pub struct Controller {
    cfg: PollerConfig,
    probe: Arc<dyn Probe>,
    bus: Bus,
    slot: Arc<Mutex<Slot>>,
    next_id: AtomicU64,
    runtime_token: CancellationToken,
    dispatcher: Option<JoinHandle<()>>,
}

impl Controller {
    /// Returns a builder with the given configuration.
    pub fn builder(cfg: PollerConfig) -> ControllerBuilder {
        ControllerBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: PollerConfig,
        probe: Arc<dyn Probe>,
        bus: Bus,
        dispatcher: JoinHandle<()>,
    ) -> Self {
        Self {
            cfg,
            probe,
            bus,
            slot: Arc::new(Mutex::new(Slot::Idle)),
            next_id: AtomicU64::new(0),
            runtime_token: CancellationToken::new(),
            dispatcher: Some(dispatcher),
        }
    }

    /// Returns the configuration this controller was built with.
    pub fn config(&self) -> &PollerConfig {
        &self.cfg
    }

    /// Starts polling `target` every `interval_secs` seconds.
    ///
    /// Fails without touching the current state if the target is malformed,
    /// the interval is not positive, or a session is already active.
    pub async fn start(&self, target: &str, interval_secs: i64) -> Result<SessionInfo, StartError> {
        let req = PollRequest::parse(target, interval_secs, &self.cfg)?;

        let mut slot = self.slot.lock().await;
        match &*slot {
            Slot::Idle => {}
            Slot::Running(session) => {
                return Err(StartError::AlreadyRunning {
                    target: session.info.target.to_string(),
                    interval: session.info.interval,
                });
            }
            Slot::Stopping { info, .. } => {
                return Err(StartError::StopInProgress {
                    target: info.target.to_string(),
                });
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let info = SessionInfo {
            id,
            target: req.target.clone(),
            interval: req.interval,
            started_at: SystemTime::now(),
        };
        let timeout = self.cfg.timeout_for(req.interval);

        self.bus.publish(
            Event::new(EventKind::SessionStarted, id, info.target.as_str())
                .with_interval(req.interval),
        );

        let scheduler = Scheduler::new(
            Arc::clone(&self.probe),
            req.target,
            req.interval,
            timeout,
            id,
            self.bus.clone(),
        );
        *slot = Slot::Running(Session::spawn(info.clone(), scheduler, &self.runtime_token));

        tracing::info!(
            session = id,
            target_url = %info.target,
            interval_secs = info.interval.as_secs(),
            timeout_ms = timeout.as_millis() as u64,
            "polling started"
        );
        Ok(info)
    }

    /// Stops the active session and waits for it to wind down.
    ///
    /// Idempotent: returns [`StopOutcome::NotRunning`] when idle.
    pub async fn stop(&self) -> StopOutcome {
        let (info, done) = {
            let mut slot = self.slot.lock().await;
            match std::mem::replace(&mut *slot, Slot::Idle) {
                Slot::Idle => return StopOutcome::NotRunning,
                Slot::Stopping { info, done } => {
                    *slot = Slot::Stopping {
                        info: info.clone(),
                        done: done.clone(),
                    };
                    (info, done)
                }
                Slot::Running(session) => {
                    let info = session.info.clone();
                    let done = CancellationToken::new();
                    *slot = Slot::Stopping {
                        info: info.clone(),
                        done: done.clone(),
                    };
                    // No tick may spawn a probe once the slot reads `Stopping`.
                    session.cancel.cancel();
                    self.spawn_teardown(session, done.clone());
                    (info, done)
                }
            }
        };

        done.cancelled().await;
        StopOutcome::Stopped(info)
    }

    /// Current slot status.
    pub async fn status(&self) -> SessionStatus {
        self.slot.lock().await.status()
    }

    /// Snapshot of the active (running or stopping) session.
    pub async fn session(&self) -> Option<SessionInfo> {
        self.slot.lock().await.info().cloned()
    }

    /// Stops any session, then waits until subscribers have received every event.
    pub async fn shutdown(mut self) {
        let dispatcher = self.dispatcher.take();
        self.stop().await;
        drop(self);
        if let Some(handle) = dispatcher {
            let _ = handle.await;
        }
    }

    /// Cancels the session and moves the slot to `Idle` once the loop exits.
    ///
    /// Runs detached so a caller dropping its `stop` future cannot leave the
    /// slot stuck in `Stopping`.
    fn spawn_teardown(&self, session: Session, done: CancellationToken) {
        let slot = Arc::clone(&self.slot);
        let bus = self.bus.clone();

        tokio::spawn(async move {
            let Session { info, cancel, join } = session;
            cancel.cancel();

            let stopped = Event::new(EventKind::SessionStopped, info.id, info.target.as_str());
            let stopped = match join.await {
                Ok(exit) => {
                    tracing::info!(
                        session = info.id,
                        ticks = exit.ticks,
                        faults = exit.faults,
                        "polling stopped"
                    );
                    let stopped = stopped.with_tick(exit.ticks);
                    if exit.faults > 0 {
                        stopped.with_reason(format!("{} probe(s) panicked", exit.faults))
                    } else {
                        stopped
                    }
                }
                Err(e) => {
                    tracing::error!(session = info.id, error = %e, "scheduler task failed");
                    stopped.with_reason(format!("scheduler task failed: {e}"))
                }
            };
            bus.publish(stopped);

            *slot.lock().await = Slot::Idle;
            done.cancel();
        });
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.runtime_token.cancel();
    }
}
