//! # Session: one poll run.
//!
//! A session owns a target, a fixed interval and the cancellation handle of
//! its scheduler task. Status transitions belong to the controller:
//!
//! ```text
//! Idle ──start──► Running ──stop──► Stopping ──loop exited──► Idle
//! ```
//!
//! `Stopping` never goes back to `Running`; a new run is a new session with
//! a new id.

use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::scheduler::{Scheduler, SchedulerExit};

/// Lifecycle status of the controller's session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No session; `start` is accepted.
    #[default]
    Idle,
    /// A scheduler loop is ticking.
    Running,
    /// Cancellation was signaled; in-flight probes are finishing.
    Stopping,
}

/// Read-only description of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Process-unique session id.
    pub id: u64,
    /// Probed URL.
    pub target: Url,
    /// Tick period.
    pub interval: Duration,
    /// When the session entered `Running`.
    pub started_at: SystemTime,
}

/// Live session: description plus the handles needed to stop it.
pub(crate) struct Session {
    pub info: SessionInfo,
    pub cancel: CancellationToken,
    pub join: JoinHandle<SchedulerExit>,
}

impl Session {
    /// Spawns the scheduler loop under a child of `parent` and returns the session.
    pub fn spawn(info: SessionInfo, scheduler: Scheduler, parent: &CancellationToken) -> Self {
        let cancel = parent.child_token();
        let loop_token = cancel.clone();
        let join = tokio::spawn(async move { scheduler.run(loop_token).await });
        Self { info, cancel, join }
    }
}
