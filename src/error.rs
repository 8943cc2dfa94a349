use crate::error_code::ErrorCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The single error shape surfaced by the SDK.
///
/// Raw transport failures (reqwest errors, non-2xx responses, malformed bodies)
/// are always translated into this type before they leave the transport layer,
/// so callers only ever branch on [`Error::code`].
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{code} (HTTP {status_code}): {message}")]
pub struct Error {
    pub message: String,
    pub code: ErrorCode,
    /// HTTP status of the failing response, `0` when no response was received.
    pub status_code: u16,
    /// Raw structured error payload returned by the server, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    pub fn new(message: impl Into<String>, code: ErrorCode, status_code: u16) -> Self {
        Self {
            message: message.into(),
            code,
            status_code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Connection refused, DNS failure, timeout, or a body that could not be read.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(
            format!("Network error: {}", message.into()),
            ErrorCode::NetworkError,
            0,
        )
    }

    pub fn authentication() -> Self {
        Self::new("Invalid API key", ErrorCode::AuthenticationError, 401)
    }

    /// Rejected input or client configuration; never reaches the network.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::InvalidRequest, 0)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::InvalidResponse, 500)
    }

    pub fn index_not_found(name: &str) -> Self {
        Self::new(
            format!("Index {} not found", name),
            ErrorCode::IndexNotFound,
            404,
        )
    }

    pub fn client_closed() -> Self {
        Self::new("Client has been closed", ErrorCode::ClientClosed, 0)
    }

    /// Whether the retrying transport may issue the request again.
    pub fn is_retryable(&self) -> bool {
        self.code.retryable()
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::invalid_response(format!("Failed to decode response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_includes_code_and_status() {
        let err = Error::index_not_found("docs");
        assert_eq!(err.to_string(), "INDEX_NOT_FOUND (HTTP 404): Index docs not found");
    }

    #[test]
    fn test_serializes_without_empty_details() {
        let err = Error::network("connection refused");
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["code"], "NETWORK_ERROR");
        assert_eq!(v["status_code"], 0);
        assert!(v.get("details").is_none());

        let err = err.with_details(json!({"type": "x"}));
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["details"]["type"], "x");
    }
}
