use super::error_classification::{classify_response, classify_transport_error, decode_success};
use super::request::{Method, Payload, Request};
use super::Transport;
use crate::client::config::ClientConfig;
use crate::{BoxStream, Error, Result};
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Proxy;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub(crate) const REQUEST_ID_HEADER: &str = "x-neuredge-request-id";

/// Single-attempt HTTP transport backed by one `reqwest::Client` session.
///
/// The session is the only mutable state: `close()` swaps it out, after which
/// every call fails with `CLIENT_CLOSED` without touching the network.
pub struct HttpTransport {
    session: ArcSwapOption<reqwest::Client>,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout());

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::invalid_request(format!("Invalid proxy_url '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::invalid_request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            session: ArcSwapOption::from_pointee(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn session(&self) -> Result<Arc<reqwest::Client>> {
        self.session.load_full().ok_or_else(Error::client_closed)
    }

    fn build_request(
        &self,
        session: &reqwest::Client,
        request: &Request,
        request_id: &str,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut req = match request.method {
            Method::Get => session.get(&url),
            Method::Post => session.post(&url),
            Method::Delete => session.delete(&url),
        };

        req = req
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, request_id);

        if let Some(body) = &request.body {
            req = req.json(body);
        }
        req
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request, request_id: &str) -> Result<Payload> {
        let session = self.session()?;
        let start = Instant::now();

        let resp = self
            .build_request(&session, request, request_id)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| classify_transport_error(&e))?;

        if !(200..300).contains(&status) {
            let err = classify_response(status, &body);
            info!(
                method = request.method.as_str(),
                path = request.path.as_str(),
                http_status = status,
                error_code = err.code.as_str(),
                request_id,
                duration_ms = start.elapsed().as_millis() as u64,
                "neuredge request failed"
            );
            return Err(err);
        }

        info!(
            method = request.method.as_str(),
            path = request.path.as_str(),
            http_status = status,
            request_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "neuredge request completed"
        );
        decode_success(status, body, request.expects_binary)
    }

    async fn open_stream(
        &self,
        request: &Request,
        request_id: &str,
    ) -> Result<BoxStream<'static, Bytes>> {
        let session = self.session()?;
        let start = Instant::now();

        let resp = self
            .build_request(&session, request, request_id)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.bytes().await.map_err(|e| classify_transport_error(&e))?;
            let err = classify_response(status, &body);
            info!(
                path = request.path.as_str(),
                http_status = status,
                error_code = err.code.as_str(),
                request_id,
                duration_ms = start.elapsed().as_millis() as u64,
                "neuredge stream failed to open"
            );
            return Err(err);
        }

        info!(
            path = request.path.as_str(),
            http_status = status,
            request_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "neuredge stream opened"
        );

        // Dropping the returned stream drops the response and releases the connection.
        let byte_stream = resp
            .bytes_stream()
            .map_err(|e| classify_transport_error(&e));
        Ok(Box::pin(byte_stream))
    }

    fn close(&self) {
        self.session.store(None);
    }

    fn is_closed(&self) -> bool {
        self.session.load().is_none()
    }
}
