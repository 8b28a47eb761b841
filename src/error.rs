//! Error types used by the polling engine.
//!
//! This module defines two error enums:
//!
//! - [`StartError`] — validation and state failures of `Controller::start`.
//! - [`BuildError`] — failures while constructing a [`Controller`](crate::Controller).
//!
//! Probe failures are **not** errors: they are ordinary
//! [`PollOutcome`](crate::PollOutcome)s with `succeeded = false`.
//!
//! Both types provide `as_label` (stable snake_case, for logs/metrics) and
//! `as_message` helpers.

use std::time::Duration;

use thiserror::Error;

/// # Errors produced by `Controller::start`.
///
/// All variants are validation errors: they are reported synchronously,
/// leave the controller state untouched, and are never retried.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// Target is empty, unparsable, lacks a host, or uses a disallowed scheme.
    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget {
        /// The target as supplied by the caller.
        target: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Interval is zero or negative.
    #[error("invalid interval {seconds}s: interval must be greater than 0 seconds")]
    InvalidInterval {
        /// The interval as supplied by the caller.
        seconds: i64,
    },

    /// A session is already running.
    #[error("already polling {target} every {interval:?}; stop the current session first")]
    AlreadyRunning {
        /// Target of the running session.
        target: String,
        /// Interval of the running session.
        interval: Duration,
    },

    /// The previous session is still tearing down.
    #[error("previous session for {target} is still stopping")]
    StopInProgress {
        /// Target of the stopping session.
        target: String,
    },
}

impl StartError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use url_poller::StartError;
    ///
    /// let err = StartError::InvalidInterval { seconds: 0 };
    /// assert_eq!(err.as_label(), "invalid_interval");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StartError::InvalidTarget { .. } => "invalid_target",
            StartError::InvalidInterval { .. } => "invalid_interval",
            StartError::AlreadyRunning { .. } => "already_running",
            StartError::StopInProgress { .. } => "stop_in_progress",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}

/// # Errors produced while building a controller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BuildError {
    /// The HTTP client backing the default probe could not be created.
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

impl BuildError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BuildError::Client(_) => "build_client",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}
