//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for observers of poll results
//! and session lifecycle events.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber unbounded queue** (a slow observer never loses results)
//! - **Panic isolation** (a panic is logged and the worker keeps going)
//!
//! ## Architecture
//! ```text
//! SubscriberSet ──► [unbounded queue] ──► worker task ──► subscriber.on_event()
//!                                      └─► panic caught → tracing::error!
//! ```
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use url_poller::{Event, EventKind, Subscribe};
//!
//! struct Uptime;
//!
//! #[async_trait]
//! impl Subscribe for Uptime {
//!     async fn on_event(&self, ev: &Event) {
//!         if let (EventKind::ProbeCompleted, Some(out)) = (ev.kind, &ev.outcome) {
//!             let _ = out.succeeded; // record it somewhere
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "uptime" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Observer of engine events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Events arrive in publish order (FIFO) for each subscriber.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from the subscriber's own worker task, never from a publisher.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`; override it with something short.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
