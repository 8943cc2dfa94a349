//! In-memory transport for retry and consistency tests.
//!
//! Replies are scripted per `(method, path)`. Each call pops the next reply; the
//! last one sticks, so a route answered with one reply answers it forever.
//! HTTP replies go through the SDK's own classifier, so tests observe the same
//! errors the real transport would produce.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use neuredge_sdk::transport::{classify_response, decode_success, Method, Payload, Request, Transport};
use neuredge_sdk::{BoxStream, Error, NeuredgeClient, Result};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub enum Reply {
    Http(u16, Bytes),
    Network(&'static str),
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Reply::Http(status, Bytes::from(body.to_string()))
    }

    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn raw(status: u16, body: &'static [u8]) -> Self {
        Reply::Http(status, Bytes::from_static(body))
    }
}

#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub request_id: String,
    pub at: Instant,
}

#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
    closed: AtomicBool,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, replies: Vec<Reply>) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), replies.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls_to(method, path).len()
    }

    fn next_reply(&self, request: &Request, request_id: &str) -> Result<Reply> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::client_closed());
        }
        self.calls.lock().unwrap().push(Call {
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
            request_id: request_id.to_string(),
            at: Instant::now(),
        });

        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(&(request.method, request.path.clone()))
            .unwrap_or_else(|| panic!("unscripted request {} {}", request.method, request.path));
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        Ok(reply.unwrap_or_else(|| panic!("empty script for {} {}", request.method, request.path)))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &Request, request_id: &str) -> Result<Payload> {
        match self.next_reply(request, request_id)? {
            Reply::Http(status, body) if (200..300).contains(&status) => {
                decode_success(status, body, request.expects_binary)
            }
            Reply::Http(status, body) => Err(classify_response(status, &body)),
            Reply::Network(msg) => Err(Error::network(msg)),
        }
    }

    async fn open_stream(
        &self,
        request: &Request,
        request_id: &str,
    ) -> Result<BoxStream<'static, Bytes>> {
        match self.next_reply(request, request_id)? {
            Reply::Http(status, body) if (200..300).contains(&status) => {
                Ok(Box::pin(futures::stream::iter(vec![Ok(body)])))
            }
            Reply::Http(status, body) => Err(classify_response(status, &body)),
            Reply::Network(msg) => Err(Error::network(msg)),
        }
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Client wired to `transport` with the given retry settings.
pub fn client_with(
    transport: Arc<ScriptedTransport>,
    max_retries: u32,
    retry_delay_secs: f64,
) -> NeuredgeClient {
    NeuredgeClient::builder()
        .api_key("test-key")
        .base_url("http://scripted.invalid")
        .max_retries(max_retries)
        .retry_delay(retry_delay_secs)
        .without_keyring()
        .with_transport(transport)
        .build()
        .expect("client builds")
}
