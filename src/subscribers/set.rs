//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] hands each [`Event`] to every subscriber **without
//! awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//! - No acknowledgement or backpressure: queues are unbounded.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::Event;

use super::Subscribe;

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::UnboundedSender<Arc<Event>>,
}

/// Fan-out with per-subscriber queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::unbounded_channel::<Arc<Event>>();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await
                    {
                        tracing::error!(
                            subscriber = sub.name(),
                            seq = ev.seq,
                            panic = ?panic_err,
                            "subscriber panicked"
                        );
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self { channels, workers }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's worker has gone away, the event is dropped for it
    /// and a warning is logged with the subscriber's name.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            if channel.sender.send(Arc::clone(&ev)).is_err() {
                tracing::warn!(
                    subscriber = channel.name,
                    seq = ev.seq,
                    "subscriber dropped event: worker closed"
                );
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    ///
    /// Events already queued are still delivered.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}
