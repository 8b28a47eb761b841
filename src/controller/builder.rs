use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{
    config::PollerConfig,
    error::BuildError,
    events::{Bus, Event},
    probe::{HttpProbe, Probe},
    subscribers::{Subscribe, SubscriberSet},
};

use super::core::Controller;

/// Builder for constructing a [`Controller`].
pub struct ControllerBuilder {
    cfg: PollerConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    probe: Option<Arc<dyn Probe>>,
}

impl ControllerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: PollerConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            probe: None,
        }
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive poll results and session lifecycle events through
    /// dedicated workers with unbounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Replaces the default [`HttpProbe`].
    pub fn with_probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Builds the controller.
    ///
    /// Spawns the event dispatcher and subscriber workers, so it must be
    /// called from within a tokio runtime.
    pub fn build(self) -> Result<Controller, BuildError> {
        let probe: Arc<dyn Probe> = match self.probe {
            Some(probe) => probe,
            None => Arc::new(HttpProbe::new(&self.cfg)?),
        };

        let (bus, rx) = Bus::channel();
        let subs = SubscriberSet::new(self.subscribers);
        let dispatcher = spawn_dispatcher(rx, subs);

        Ok(Controller::new_internal(self.cfg, probe, bus, dispatcher))
    }
}

/// Drains the bus into the subscriber set.
///
/// Ends once every `Bus` clone is gone (controller dropped and all session
/// tasks finished); queued events are still delivered before workers stop.
fn spawn_dispatcher(mut rx: mpsc::UnboundedReceiver<Event>, subs: SubscriberSet) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            subs.emit(&ev);
        }
        subs.shutdown().await;
    })
}
