use tokio_util::sync::CancellationToken;

use crate::core::session::{Session, SessionInfo, SessionStatus};

/// The controller's single session slot.
pub(super) enum Slot {
    /// No session, ready to accept `start`.
    Idle,

    /// Session running; holds its cancel token and join handle.
    Running(Session),

    /// Session is being torn down.
    Stopping {
        /// Description of the session being stopped.
        info: SessionInfo,
        /// Cancelled by the teardown task once the slot is back to `Idle`.
        done: CancellationToken,
    },
}

impl Slot {
    pub fn status(&self) -> SessionStatus {
        match self {
            Slot::Idle => SessionStatus::Idle,
            Slot::Running(_) => SessionStatus::Running,
            Slot::Stopping { .. } => SessionStatus::Stopping,
        }
    }

    pub fn info(&self) -> Option<&SessionInfo> {
        match self {
            Slot::Idle => None,
            Slot::Running(session) => Some(&session.info),
            Slot::Stopping { info, .. } => Some(info),
        }
    }
}
