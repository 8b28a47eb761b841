use std::time::Duration;

use url::Url;

use crate::config::PollerConfig;
use crate::error::StartError;

/// Validated `start` arguments.
///
/// Checks run in order: target (non-empty, absolute URL, allowed scheme,
/// has a host), then interval (> 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    /// Parsed target.
    pub target: Url,
    /// Tick period.
    pub interval: Duration,
}

impl PollRequest {
    /// Validates raw caller input.
    pub fn parse(target: &str, interval_secs: i64, cfg: &PollerConfig) -> Result<Self, StartError> {
        let invalid = |reason: String| StartError::InvalidTarget {
            target: target.to_string(),
            reason,
        };

        let trimmed = target.trim();
        if trimmed.is_empty() {
            return Err(invalid("target is empty".into()));
        }
        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !cfg.allows_scheme(url.scheme()) {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".into()));
        }

        if interval_secs <= 0 {
            return Err(StartError::InvalidInterval {
                seconds: interval_secs,
            });
        }

        Ok(Self {
            target: url,
            interval: Duration::from_secs(interval_secs.unsigned_abs()),
        })
    }
}
