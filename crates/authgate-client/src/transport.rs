//! HTTP transport.
//!
//! The gateway delegates all network I/O, timeout enforcement, and retry to
//! a [`Transport`]. The default [`RetryingTransport`] wraps `reqwest` with a
//! per-attempt timeout and bounded exponential backoff. Non-2xx responses
//! are not transport failures — the decoded body passes through so backend
//! error payloads reach the caller unmodified.

use crate::Result;

use authgate_api::Verb;
use serde_json::Value;
use std::time::Duration;

/// A request as handed to the transport, fully assembled by the gateway.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Absolute URL.
    pub url: String,

    /// HTTP verb.
    pub method: Verb,

    /// `Authorization` header value, when the intent carries a credential.
    pub bearer: Option<String>,

    /// JSON body, when the intent carries one.
    pub body: Option<Value>,

    /// Request any response cache be bypassed.
    pub no_store: bool,
}

/// Performs one request, honoring its own timeout and retry policy, and
/// yields the decoded response body.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: TransportRequest) -> Result<Value>;
}

/// Timeout and retry bounds for [`RetryingTransport`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,

    /// Per-attempt timeout.
    pub timeout: Duration,

    /// Base delay before the first retry; doubles per subsequent retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            timeout: Duration::from_secs(10),
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based).
    fn backoff_delay(&self, retry: u32) -> Duration {
        self.backoff * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

/// Default transport: `reqwest` with per-attempt timeout and bounded
/// exponential backoff.
#[cfg(feature = "transport-reqwest")]
#[derive(Debug, Clone)]
pub struct RetryingTransport {
    http: reqwest::Client,
    policy: RetryPolicy,
}

#[cfg(feature = "transport-reqwest")]
impl RetryingTransport {
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, policy })
    }

    async fn attempt(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let mut builder = match request.method {
            Verb::Post => self.http.post(&request.url),
            Verb::Patch => self.http.patch(&request.url),
        };

        builder = builder
            .timeout(self.policy.timeout)
            .header("Content-Type", "application/json");

        if request.no_store {
            builder = builder.header("Cache-Control", "no-cache");
        }
        if let Some(bearer) = &request.bearer {
            builder = builder.header("Authorization", bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder.send().await
    }
}

#[cfg(feature = "transport-reqwest")]
impl Transport for RetryingTransport {
    async fn send(&self, request: TransportRequest) -> Result<Value> {
        let mut last_err: Option<reqwest::Error> = None;

        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                let delay = self.policy.backoff_delay(attempt - 1);
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    method = request.method.as_str(),
                    url = %request.url,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&request).await {
                // Decode once, outside the retry loop.
                Ok(response) => return Ok(response.json::<Value>().await?),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        error = %e,
                        method = request.method.as_str(),
                        url = %request.url,
                        "request attempt failed"
                    );
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) => Err(e.into()),
            None => Err(crate::Error::Transport("no attempts configured".to_string())),
        }
    }
}
