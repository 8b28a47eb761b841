//! # Event subscribers for the polling engine.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for observing events published by the engine.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   probe runner ── publish(Event) ──► Bus ──► dispatcher ──► SubscriberSet
//!                                                                  │
//!                                          ┌───────────────┬───────┴───────┐
//!                                          ▼               ▼               ▼
//!                                   ChannelSubscriber  LogWriter        Custom
//! ```
//!
//! ## Subscriber types
//! - [`ChannelSubscriber`] forwards events into a channel for a host to read
//! - `LogWriter` (feature `logging`) writes events through `tracing`

mod channel;
#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

pub use channel::{ChannelSubscriber, EventReceiver};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
