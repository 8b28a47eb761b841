//! Engine events: types and the internal bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over an unbounded `tokio::sync::mpsc` channel
//!
//! ## Quick reference
//! - **Publishers**: `Controller` (session started), probe runner (poll
//!   results), session teardown (session stopped).
//! - **Consumer**: the controller's dispatcher task, which fans out to the
//!   [`SubscriberSet`](crate::SubscriberSet).

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};
