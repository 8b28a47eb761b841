//! # Controller: start/stop control over a single polling session.
//!
//! The controller treats the engine as one **slot**. At any given time at
//! most one session occupies it:
//!
//! ```text
//!             start (valid, slot idle)
//!   ┌──────┐ ───────────────────────────► ┌─────────┐
//!   │ Idle │                              │ Running │
//!   └──────┘ ◄──────┐                     └────┬────┘
//!                   │ loop exited,             │ stop
//!                   │ in-flight probes done    ▼
//!                   │                     ┌──────────┐
//!                   └──────────────────── │ Stopping │
//!                                         └──────────┘
//! ```
//!
//! ## Invariants
//! - Check-and-set on the slot happens under one mutex: two concurrent
//!   `start` calls never create two running sessions.
//! - `start` on a `Running` or `Stopping` slot is rejected (single-flight, no queue).
//! - `Stopping` only moves to `Idle`.
//! - `stop` on `Idle` is a successful no-op and publishes nothing.

mod builder;
mod core;
mod request;
mod slot;

pub use builder::ControllerBuilder;
pub use self::core::{Controller, StopOutcome};
pub use request::PollRequest;
