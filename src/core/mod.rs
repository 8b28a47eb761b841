//! Engine core: sessions, the periodic scheduler and single-probe execution.
//!
//! Nothing here is reachable from outside the crate except the plain data
//! types ([`SessionStatus`], [`SessionInfo`], [`SchedulerExit`]); the
//! [`Controller`](crate::Controller) is the only entry point.
//!
//! Internal modules:
//! - [`runner`]: executes one probe with a hard timeout and publishes the outcome;
//! - [`scheduler`]: fixed-period tick loop with cooperative cancellation;
//! - [`session`]: session data and the spawned scheduler handle.

mod runner;
pub(crate) mod scheduler;
pub(crate) mod session;

pub use scheduler::SchedulerExit;
pub use session::{SessionInfo, SessionStatus};
