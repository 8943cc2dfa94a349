//! Logical request and response payload shapes.

use crate::{Error, Result};
use bytes::Bytes;
use serde_json::Value;
use std::fmt;

/// HTTP methods used by the platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical API call. Retries re-send the same request unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path relative to the client's base URL, always starting with `/`.
    pub path: String,
    pub body: Option<Value>,
    /// Accept a raw byte payload (e.g. generated images) instead of JSON.
    pub expects_binary: bool,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            expects_binary: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn binary(mut self) -> Self {
        self.expects_binary = true;
        self
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON. An empty 2xx body decodes to `Value::Null`.
    Json(Value),
    /// Raw bytes, only produced for requests that expect binary content.
    Binary(Bytes),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Binary(_) => None,
        }
    }

    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(v) => Ok(v),
            Payload::Binary(b) => Err(Error::invalid_response(format!(
                "Expected a JSON response, got {} bytes of binary content",
                b.len()
            ))),
        }
    }
}
