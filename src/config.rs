//! # Poller configuration.
//!
//! Provides [`PollerConfig`], the settings shared by every session a
//! [`Controller`](crate::Controller) runs.
//!
//! Config is used in two ways:
//! 1. **Controller creation**: `Controller::builder(config)`
//! 2. **Per-session derivation**: the effective probe timeout is computed from
//!    the session interval via [`PollerConfig::timeout_for`].
//!
//! ## Sentinel values
//! - `probe_timeout = 0s` → no fixed cap, only the interval-derived bound applies
//! - `body_preview_bytes = 0` → the response body is never read

use std::time::Duration;

/// Default fixed probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of body bytes captured into `PollOutcome::body_preview`.
pub const DEFAULT_BODY_PREVIEW_BYTES: usize = 200;

/// Global configuration for the polling engine.
///
/// ## Field semantics
/// - `probe_timeout`: Upper bound for a single probe (`0s` = interval-derived bound only)
/// - `body_preview_bytes`: Body prefix captured per probe (`0` = skip body)
/// - `user_agent`: `User-Agent` header sent with every probe
/// - `allowed_schemes`: URL schemes accepted as targets
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over repeating the
/// sentinel checks.
#[derive(Clone, Debug)]
pub struct PollerConfig {
    /// Fixed cap on a single probe.
    ///
    /// The effective timeout is always strictly below the session interval,
    /// see [`PollerConfig::timeout_for`].
    pub probe_timeout: Duration,

    /// Number of leading body bytes kept as a preview.
    pub body_preview_bytes: usize,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// Target URL schemes accepted by `start` (compared case-insensitively).
    pub allowed_schemes: Vec<String>,
}

impl PollerConfig {
    /// Returns the effective probe timeout for a session with the given interval.
    ///
    /// The interval-derived bound is `interval - interval / 10`, so a probe can
    /// never outlive its tick. A non-zero `probe_timeout` lowers it further.
    ///
    /// ```
    /// use std::time::Duration;
    /// use url_poller::PollerConfig;
    ///
    /// let cfg = PollerConfig::default();
    /// assert_eq!(cfg.timeout_for(Duration::from_secs(1)), Duration::from_millis(900));
    /// assert_eq!(cfg.timeout_for(Duration::from_secs(60)), Duration::from_secs(10));
    /// ```
    pub fn timeout_for(&self, interval: Duration) -> Duration {
        let bound = interval.saturating_sub(interval / 10);
        match self.fixed_timeout() {
            Some(fixed) => fixed.min(bound),
            None => bound,
        }
    }

    /// Returns the fixed probe timeout as an `Option`.
    #[inline]
    pub fn fixed_timeout(&self) -> Option<Duration> {
        if self.probe_timeout == Duration::ZERO {
            None
        } else {
            Some(self.probe_timeout)
        }
    }

    /// Returns the body preview limit as an `Option`.
    #[inline]
    pub fn preview_limit(&self) -> Option<usize> {
        if self.body_preview_bytes == 0 {
            None
        } else {
            Some(self.body_preview_bytes)
        }
    }

    /// True if `scheme` is one of [`PollerConfig::allowed_schemes`].
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

impl Default for PollerConfig {
    /// Default configuration:
    ///
    /// - `probe_timeout = 10s`
    /// - `body_preview_bytes = 200`
    /// - `user_agent = "url-poller/<crate version>"`
    /// - `allowed_schemes = ["http", "https"]`
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            body_preview_bytes: DEFAULT_BODY_PREVIEW_BYTES,
            user_agent: concat!("url-poller/", env!("CARGO_PKG_VERSION")).to_string(),
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}
