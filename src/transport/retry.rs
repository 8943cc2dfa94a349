//! Retrying transport.
//!
//! This is the only place request-level backoff happens. Capabilities never loop
//! on transport failures themselves; consistency polling (see
//! [`crate::consistency`]) is a separate concern layered on top.

use super::policy::{Decision, RetryPolicy};
use super::request::{Payload, Request};
use super::Transport;
use crate::{BoxStream, Result};
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Wraps a single-attempt [`Transport`] with the client's [`RetryPolicy`].
pub struct RetryingTransport {
    inner: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl RetryingTransport {
    pub fn new(inner: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute one logical request, retrying retryable failures.
    pub async fn execute(&self, request: &Request) -> Result<Payload> {
        let request_id = Uuid::new_v4().to_string();
        self.with_retries(request, || self.inner.send(request, &request_id))
            .await
    }

    /// Execute and require a JSON body.
    pub async fn execute_json(&self, request: &Request) -> Result<serde_json::Value> {
        self.execute(request).await?.into_json()
    }

    /// Open a byte stream, retrying only while the stream is being opened.
    ///
    /// Once the stream is returned no further attempts are made, so callers never
    /// see duplicated chunks.
    pub async fn execute_stream(&self, request: &Request) -> Result<BoxStream<'static, Bytes>> {
        let request_id = Uuid::new_v4().to_string();
        self.with_retries(request, || self.inner.open_stream(request, &request_id))
            .await
    }

    pub fn close(&self) {
        self.inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    async fn with_retries<T, F, Fut>(&self, request: &Request, mut attempt_fn: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.policy.attempts();
        let mut attempt: u32 = 0;

        loop {
            let err = match attempt_fn().await {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };

            match self.policy.decide(&err, attempt) {
                Decision::Retry { delay } => {
                    warn!(
                        method = request.method.as_str(),
                        path = request.path.as_str(),
                        error_code = err.code.as_str(),
                        http_status = err.status_code,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        "neuredge request attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Decision::Fail => {
                    if err.is_retryable() {
                        warn!(
                            method = request.method.as_str(),
                            path = request.path.as_str(),
                            error_code = err.code.as_str(),
                            attempts = attempt + 1,
                            "neuredge request failed after exhausting retries"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}
