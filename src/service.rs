//! # String boundary for hosts that bridge the engine across a process boundary.
//!
//! Exposes the two control operations with a plain string result and
//! renders poll results as single JSON values for the `pollResult` channel.
//! No error crosses this boundary: failures become `"Error: <message>"`.
//!
//! ```text
//! host ──start_polling(url, secs)──► PollerService ──► Controller::start
//!      ◄── "Started polling ..." / "Error: ..."
//! host ──stop_polling()────────────► PollerService ──► Controller::stop
//!      ◄── "Polling stopped" / "Not currently polling"
//! ```

use std::sync::Arc;

use crate::controller::{Controller, StopOutcome};
use crate::events::{Event, EventKind};
use crate::probe::PollOutcome;

/// Name of the event channel carrying poll results.
pub const POLL_RESULT_CHANNEL: &str = "pollResult";

/// String-result facade over a [`Controller`].
#[derive(Clone)]
pub struct PollerService {
    controller: Arc<Controller>,
}

impl PollerService {
    /// Wraps a controller.
    pub fn new(controller: Arc<Controller>) -> Self {
        Self { controller }
    }

    /// Returns the underlying controller.
    pub fn controller(&self) -> &Arc<Controller> {
        &self.controller
    }

    /// Starts polling; returns a confirmation or `"Error: <message>"`.
    pub async fn start_polling(&self, target: &str, interval_seconds: i64) -> String {
        match self.controller.start(target, interval_seconds).await {
            Ok(info) => format!(
                "Started polling {} every {} seconds",
                info.target,
                info.interval.as_secs()
            ),
            Err(e) => {
                tracing::debug!(error = e.as_label(), "start rejected");
                format!("Error: {e}")
            }
        }
    }

    /// Stops polling; always succeeds.
    pub async fn stop_polling(&self) -> String {
        match self.controller.stop().await {
            StopOutcome::Stopped(_) => "Polling stopped".to_string(),
            StopOutcome::NotRunning => "Not currently polling".to_string(),
        }
    }

    /// Renders the `pollResult` payload for an outcome.
    pub fn payload(outcome: &PollOutcome) -> serde_json::Value {
        outcome.to_json()
    }

    /// Maps an engine event to `(channel, payload)` for the `pollResult` channel.
    ///
    /// Lifecycle events return `None`.
    pub fn wire_message(ev: &Event) -> Option<(&'static str, serde_json::Value)> {
        match (ev.kind, &ev.outcome) {
            (EventKind::ProbeCompleted, Some(outcome)) => {
                Some((POLL_RESULT_CHANNEL, Self::payload(outcome)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn wire_message_only_for_poll_results() {
        let out = PollOutcome::response("http://a/", 200, Duration::from_millis(1), None);
        let ev = Event::new(EventKind::ProbeCompleted, 1, "http://a/").with_outcome(out);
        let (channel, payload) = PollerService::wire_message(&ev).expect("poll result");
        assert_eq!(channel, POLL_RESULT_CHANNEL);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["statusCode"], 200);

        let started = Event::new(EventKind::SessionStarted, 1, "http://a/");
        assert!(PollerService::wire_message(&started).is_none());
    }
}
