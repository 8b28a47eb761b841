//! # url-poller
//!
//! **url-poller** is a small polling engine: it probes one URL on a fixed
//! interval and streams every result to observers, under explicit
//! start/stop control.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!        start(url, secs) / stop()
//!                 │
//!                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Controller                                                       │
//! │  - single session slot (Idle / Running / Stopping) under a Mutex  │
//! │  - root CancellationToken (child token per session)               │
//! │  - Bus (unbounded event queue)                                    │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        ▼
//!     ┌──────────────────┐      every tick      ┌──────────────────┐
//!     │    Scheduler     │ ───────────────────► │  probe_once()    │
//!     │ (fixed-period    │  (own task per probe)│  Probe + timeout │
//!     │  tick loop)      │                      └────────┬─────────┘
//!     └──────────────────┘                               │ ProbeCompleted
//!                                                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                    Bus (unbounded mpsc, FIFO)                     │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          ┌────────────────┐
//!                          │   dispatcher   │
//!                          └───────┬────────┘
//!                                  ▼
//!                            SubscriberSet
//!                       ┌──────────┼──────────┐
//!                       ▼          ▼          ▼
//!                    worker1    worker2    workerN
//! ```
//!
//! ### Lifecycle
//! ```text
//! start ──► validate ──► lock slot ──► Idle? ──► spawn Scheduler ──► Running
//!
//! Scheduler loop {
//!   ├─► token cancelled?          ─► exit loop
//!   ├─► tick (t0 + k·interval)    ─► spawn probe_once(tick)
//!   └─► probe task joined         ─► panic? log, keep ticking
//! }
//! drain in-flight probes ─► publish outcomes ─► loop exits
//!
//! stop ──► Running → Stopping ──► cancel token ──► join loop ──► SessionStopped ──► Idle
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types                               |
//! |-------------------|-----------------------------------------------------------|-----------------------------------------|
//! | **Control**       | Single-flight start/stop with idempotent stop.            | [`Controller`], [`StopOutcome`]         |
//! | **Probes**        | Bounded-time HTTP checks with classified failures.        | [`Probe`], [`HttpProbe`], [`PollOutcome`] |
//! | **Events**        | Ordered poll results and session lifecycle.               | [`Event`], [`EventKind`]                |
//! | **Subscribers**   | Isolated observers with their own queues.                 | [`Subscribe`], [`ChannelSubscriber`]    |
//! | **Boundary**      | String results and JSON payloads for IPC hosts.           | [`PollerService`]                       |
//! | **Configuration** | Probe timeout, body preview, user agent, schemes.         | [`PollerConfig`]                        |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a subscriber that writes events through `tracing`.
//!
//! ## Example
//! ```no_run
//! use url_poller::{ChannelSubscriber, Controller, PollerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (sub, mut events) = ChannelSubscriber::poll_results();
//!     let controller = Controller::builder(PollerConfig::default())
//!         .with_subscriber(sub)
//!         .build()?;
//!
//!     controller.start("https://example.com/", 5).await?;
//!     if let Some(ev) = events.recv().await {
//!         println!("{:?}", ev.outcome);
//!     }
//!     controller.stop().await;
//!     Ok(())
//! }
//! ```
mod config;
mod controller;
mod core;
mod error;
mod events;
mod probe;
mod service;
mod subscribers;

// ---- Public re-exports ----

pub use config::{PollerConfig, DEFAULT_BODY_PREVIEW_BYTES, DEFAULT_PROBE_TIMEOUT};
pub use controller::{Controller, ControllerBuilder, PollRequest, StopOutcome};
pub use self::core::{SchedulerExit, SessionInfo, SessionStatus};
pub use error::{BuildError, StartError};
pub use events::{Event, EventKind};
pub use probe::{classify, classify_chain, FailureReason, HttpProbe, PollOutcome, Probe};
pub use service::{PollerService, POLL_RESULT_CHANNEL};
pub use subscribers::{ChannelSubscriber, EventReceiver, Subscribe, SubscriberSet};

// Optional: expose a tracing-backed logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
