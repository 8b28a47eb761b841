//! # Event bus carrying engine events to the dispatcher.
//!
//! [`Bus`] is a thin wrapper around an unbounded [`tokio::sync::mpsc`] channel.
//! Schedulers, probe runners and the controller publish; a single dispatcher
//! task owned by the controller drains the queue and fans out to subscribers.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                     Consumer (one):
//!   probe runner ──┐
//!   probe runner ──┼──────► Bus ───────► dispatcher ────► SubscriberSet
//!   controller   ──┘   (unbounded mpsc)  (in Controller)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never waits.
//! - **Unbounded**: probe frequency is caller-controlled and low, so events
//!   are queued rather than dropped. Nothing is lost while the dispatcher lives.
//! - **FIFO**: one queue, one consumer; publish order is delivery order.
//! - **No persistence**: events published after the dispatcher stops are dropped.

use tokio::sync::mpsc;

use super::event::Event;

/// Queue for engine events.
///
/// Cheap to clone (holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: mpsc::UnboundedSender<Event>,
}

impl Bus {
    /// Creates a bus and the receiving half for its single consumer.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publishes an event.
    ///
    /// If the consumer is gone the event is dropped and this still returns immediately.
    pub fn publish(&self, ev: Event) {
        if let Err(e) = self.tx.send(ev) {
            tracing::trace!(seq = e.0.seq, "event dropped: bus closed");
        }
    }

    /// True once the consumer has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
