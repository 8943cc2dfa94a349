//! 传输层：单次 HTTP 请求、错误分类与重试。
//!
//! Transport layer for the Neuredge API.
//!
//! - [`Transport`] performs exactly one attempt and classifies failures.
//! - [`RetryingTransport`] applies the client's [`RetryPolicy`] on top.
//! - [`sse`] turns a streaming body into JSON frames.

pub mod error_classification;
mod http;
mod policy;
mod request;
mod retry;
pub mod sse;

pub use error_classification::{classify_response, decode_success};
pub use http::HttpTransport;
pub use policy::RetryPolicy;
pub use request::{Method, Payload, Request};
pub use retry::RetryingTransport;

use crate::{BoxStream, Result};
use async_trait::async_trait;
use bytes::Bytes;

/// One attempt against the API.
///
/// Implementations never retry. `request_id` is generated once per logical
/// request and must be sent unchanged on every attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request, request_id: &str) -> Result<Payload>;

    /// Open a streaming response. Non-2xx statuses are classified before the
    /// stream is returned.
    async fn open_stream(
        &self,
        request: &Request,
        request_id: &str,
    ) -> Result<BoxStream<'static, Bytes>>;

    /// Release the underlying session. Later calls fail with `CLIENT_CLOSED`.
    fn close(&self);

    fn is_closed(&self) -> bool;
}
