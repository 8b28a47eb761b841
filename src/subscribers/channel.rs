//! # ChannelSubscriber — events as a stream
//!
//! Forwards every event into an unbounded channel so a host (an IPC bridge,
//! a UI loop, a test) can `recv().await` them in order.
//!
//! ```rust
//! use url_poller::ChannelSubscriber;
//!
//! let (sub, mut events) = ChannelSubscriber::pair();
//! // Controller::builder(cfg).with_subscribers(vec![sub]).build()?;
//! // while let Some(ev) = events.recv().await { ... }
//! # drop(events);
//! # drop(sub);
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Receiving end paired with a [`ChannelSubscriber`].
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Subscriber forwarding events into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSubscriber {
    tx: mpsc::UnboundedSender<Event>,
    poll_results_only: bool,
}

impl ChannelSubscriber {
    /// Creates a subscriber forwarding every event, plus its receiver.
    #[must_use]
    pub fn pair() -> (Arc<Self>, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx,
                poll_results_only: false,
            }),
            rx,
        )
    }

    /// Creates a subscriber forwarding only `pollResult` events, plus its receiver.
    #[must_use]
    pub fn poll_results() -> (Arc<Self>, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx,
                poll_results_only: true,
            }),
            rx,
        )
    }
}

#[async_trait]
impl Subscribe for ChannelSubscriber {
    async fn on_event(&self, ev: &Event) {
        if self.poll_results_only && !ev.is_poll_result() {
            return;
        }
        // Receiver gone: the host stopped listening.
        let _ = self.tx.send(ev.clone());
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn filters_lifecycle_events_when_asked() {
        let (sub, mut rx) = ChannelSubscriber::poll_results();
        sub.on_event(&Event::new(EventKind::SessionStarted, 1, "http://a/"))
            .await;
        sub.on_event(&Event::new(EventKind::ProbeCompleted, 1, "http://a/").with_tick(1))
            .await;
        drop(sub);

        let ev = rx.recv().await.expect("one event");
        assert_eq!(ev.kind, EventKind::ProbeCompleted);
        assert!(rx.recv().await.is_none());
    }
}
