//! # Normalized probe results.
//!
//! [`PollOutcome`] is what every probe produces, success or failure. It is
//! immutable once built and serializes to a single JSON value, which is the
//! payload of the `pollResult` channel:
//!
//! ```text
//! {
//!   "timestamp": "2024-05-01T10:00:00Z",
//!   "target": "https://example.com/",
//!   "success": false,
//!   "statusCode": null,
//!   "reason": "connection-refused",
//!   "error": "error sending request ...",
//!   "latencyMs": 3,
//!   "bodyPreview": null
//! }
//! ```

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Classified cause of a transport-level probe failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// The probe did not complete within its timeout.
    Timeout,
    /// The target host actively refused the connection.
    ConnectionRefused,
    /// The target host name could not be resolved.
    DnsFailure,
    /// Any other transport or protocol error.
    Other,
}

impl FailureReason {
    /// Returns the wire name (`timeout`, `connection-refused`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Timeout => "timeout",
            FailureReason::ConnectionRefused => "connection-refused",
            FailureReason::DnsFailure => "dns-failure",
            FailureReason::Other => "other",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one probe.
///
/// - `succeeded`: true iff a response with a 2xx status arrived
/// - `status_code`: set whenever a response arrived (including non-2xx)
/// - `reason` / `error`: set only for transport failures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOutcome {
    /// Completion time of the probe.
    pub timestamp: DateTime<Utc>,
    /// Probed URL.
    pub target: String,
    /// Whether the probe counts as healthy.
    #[serde(rename = "success")]
    pub succeeded: bool,
    /// HTTP status, if a response was received.
    pub status_code: Option<u16>,
    /// Classified failure cause, if the request itself failed.
    pub reason: Option<FailureReason>,
    /// Raw failure message, if the request itself failed.
    pub error: Option<String>,
    /// Time from request start to completion.
    #[serde(rename = "latencyMs", serialize_with = "as_millis")]
    pub latency: Duration,
    /// Leading bytes of the response body (lossy UTF-8).
    pub body_preview: Option<String>,
}

impl PollOutcome {
    /// Builds an outcome for a received response.
    pub fn response(
        target: impl Into<String>,
        status_code: u16,
        latency: Duration,
        body_preview: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            target: target.into(),
            succeeded: (200..300).contains(&status_code),
            status_code: Some(status_code),
            reason: None,
            error: None,
            latency,
            body_preview,
        }
    }

    /// Builds an outcome for a request that failed before a response arrived.
    pub fn failure(
        target: impl Into<String>,
        reason: FailureReason,
        error: impl Into<String>,
        latency: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            target: target.into(),
            succeeded: false,
            status_code: None,
            reason: Some(reason),
            error: Some(error.into()),
            latency,
            body_preview: None,
        }
    }

    /// Serializes the outcome into the single value carried by `pollResult`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis().min(u128::from(u64::MAX)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        let ok = PollOutcome::response("http://a/", 204, Duration::from_millis(5), None);
        assert!(ok.succeeded);
        let redirect = PollOutcome::response("http://a/", 301, Duration::ZERO, None);
        assert!(!redirect.succeeded);
        assert_eq!(redirect.status_code, Some(301));
        assert_eq!(redirect.reason, None);
    }

    #[test]
    fn failure_serializes_with_kebab_reason() {
        let out = PollOutcome::failure(
            "http://example.invalid/",
            FailureReason::DnsFailure,
            "dns error",
            Duration::from_millis(12),
        );
        let json = out.to_json();
        assert_eq!(json["success"], false);
        assert_eq!(json["reason"], "dns-failure");
        assert_eq!(json["latencyMs"], 12);
        assert_eq!(json["statusCode"], serde_json::Value::Null);
        assert!(json["timestamp"].as_str().is_some());
    }
}
