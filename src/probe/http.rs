//! # HTTP probe backed by `reqwest`.
//!
//! Issues one `GET` per call and converts whatever happens into a
//! [`PollOutcome`]:
//!
//! ```text
//! GET target ──► response ──► read up to `body_preview_bytes` ──► PollOutcome::response
//!            └─► error    ──► classify()                     ──► PollOutcome::failure
//! ```
//!
//! The client is built once and shared; it keeps a connection pool but no
//! per-probe state.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use url::Url;

use crate::config::PollerConfig;
use crate::error::BuildError;

use super::classify::classify;
use super::outcome::PollOutcome;
use super::Probe;

/// Probe issuing plain HTTP `GET` requests.
#[derive(Clone, Debug)]
pub struct HttpProbe {
    client: reqwest::Client,
    preview_limit: Option<usize>,
}

impl HttpProbe {
    /// Builds a probe from the poller configuration.
    pub fn new(cfg: &PollerConfig) -> Result<Self, BuildError> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            preview_limit: cfg.preview_limit(),
        })
    }

    /// Reads at most `limit` bytes of the body. Read errors yield `None`.
    async fn read_preview(mut resp: reqwest::Response, limit: usize) -> Option<String> {
        let mut buf: Vec<u8> = Vec::with_capacity(limit.min(4096));
        while buf.len() < limit {
            match resp.chunk().await {
                Ok(Some(chunk)) => {
                    let take = (limit - buf.len()).min(chunk.len());
                    buf.extend_from_slice(&chunk[..take]);
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "body preview read failed");
                    return None;
                }
            }
        }
        Some(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &Url, timeout: Duration) -> PollOutcome {
        let started = Instant::now();
        let request = self.client.get(target.clone()).timeout(timeout);

        match request.send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let preview = match self.preview_limit {
                    Some(limit) => Self::read_preview(resp, limit).await,
                    None => None,
                };
                PollOutcome::response(target.as_str(), status, started.elapsed(), preview)
            }
            Err(e) => {
                let reason = classify(&e);
                PollOutcome::failure(target.as_str(), reason, e.to_string(), started.elapsed())
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
