//! # Probes: one bounded-time check of a target.
//!
//! A [`Probe`] turns a target URL into a [`PollOutcome`]. It never returns an
//! error and must not panic on a bad target: every transport or protocol
//! problem is reported as a failed outcome with a [`FailureReason`].
//!
//! ## Contents
//! - [`Probe`] the async seam used by the scheduler
//! - [`HttpProbe`] the default `reqwest`-backed implementation
//! - [`PollOutcome`], [`FailureReason`] the normalized result
//!
//! ## Implementing custom probes
//! ```no_run
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use url::Url;
//! use url_poller::{PollOutcome, Probe};
//!
//! struct AlwaysUp;
//!
//! #[async_trait]
//! impl Probe for AlwaysUp {
//!     async fn probe(&self, target: &Url, _timeout: Duration) -> PollOutcome {
//!         PollOutcome::response(target.as_str(), 200, Duration::ZERO, None)
//!     }
//! }
//! ```

mod classify;
mod http;
mod outcome;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

pub use classify::{classify, classify_chain};
pub use http::HttpProbe;
pub use outcome::{FailureReason, PollOutcome};

/// Single check of a target endpoint.
///
/// ### Implementation requirements
/// - Finish within `timeout` (the runner enforces it anyway and reports an
///   overrun as [`FailureReason::Timeout`]).
/// - Convert failures into outcomes; do not panic.
/// - Hold no state between calls that affects the result.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Probes `target` once.
    async fn probe(&self, target: &Url, timeout: Duration) -> PollOutcome;

    /// Returns the probe name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
