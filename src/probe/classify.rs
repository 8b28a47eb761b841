//! Maps transport errors onto [`FailureReason`].
//!
//! reqwest exposes `is_timeout()` directly; connection refusals and DNS
//! failures are only visible further down the `source()` chain (an
//! `io::Error` for refusals, a resolver error whose message mentions the
//! lookup for DNS). The chain is walked outermost first.

use std::error::Error as StdError;
use std::io;

use super::outcome::FailureReason;

/// Resolver messages across platforms and hyper-util versions.
const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "temporary failure in name resolution",
];

/// Classifies a failed reqwest request.
pub fn classify(err: &reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        return FailureReason::Timeout;
    }
    classify_chain(err)
}

/// Classifies an arbitrary error by walking its source chain.
pub fn classify_chain(err: &(dyn StdError + 'static)) -> FailureReason {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return FailureReason::ConnectionRefused,
                io::ErrorKind::TimedOut => return FailureReason::Timeout,
                _ => {}
            }
        }

        let msg = e.to_string().to_ascii_lowercase();
        if DNS_MARKERS.iter().any(|m| msg.contains(m)) {
            return FailureReason::DnsFailure;
        }
        if msg.contains("connection refused") {
            return FailureReason::ConnectionRefused;
        }
        cur = e.source();
    }
    FailureReason::Other
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    /// Wrapper that mimics reqwest/hyper layering: a generic message with a cause.
    #[derive(Debug)]
    struct Layer {
        msg: &'static str,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.msg)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source
                .as_deref()
                .map(|e| e as &(dyn StdError + 'static))
        }
    }

    fn wrap(msg: &'static str, inner: impl StdError + Send + Sync + 'static) -> Layer {
        Layer {
            msg,
            source: Some(Box::new(inner)),
        }
    }

    #[test]
    fn refused_io_error_deep_in_chain() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "os error 111");
        let err = wrap("error sending request", wrap("client error (Connect)", io_err));
        assert_eq!(classify_chain(&err), FailureReason::ConnectionRefused);
    }

    #[test]
    fn dns_message_in_chain() {
        let resolver = io::Error::new(io::ErrorKind::Other, "failed to lookup address information");
        let err = wrap("error sending request", wrap("dns error", resolver));
        assert_eq!(classify_chain(&err), FailureReason::DnsFailure);
    }

    #[test]
    fn timed_out_io_error() {
        let io_err = io::Error::new(io::ErrorKind::TimedOut, "connect timed out");
        let err = wrap("error sending request", io_err);
        assert_eq!(classify_chain(&err), FailureReason::Timeout);
    }

    #[test]
    fn unknown_errors_fall_back_to_other() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "invalid HTTP version");
        let err = wrap("error sending request", io_err);
        assert_eq!(classify_chain(&err), FailureReason::Other);
    }
}
