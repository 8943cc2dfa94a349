//! 错误码：SDK 统一错误分类及其重试语义。
//!
//! Neuredge error codes.
//!
//! Every failure surfaced by the SDK carries one of these codes. Callers branch
//! on the code, never on the message text.
//!
//! | Code                   | Origin                                   | Retried |
//! |------------------------|------------------------------------------|---------|
//! | `NETWORK_ERROR`        | connection refused, DNS, timeout         | yes     |
//! | `AUTHENTICATION_ERROR` | HTTP 401                                 | never   |
//! | `QUOTA_EXCEEDED`       | server error type `quota_exceeded`       | never   |
//! | `REQUEST_FAILED`       | non-2xx with an unstructured body        | yes     |
//! | `INDEX_NOT_FOUND`      | vector index missing                     | yes     |
//! | `INDEX_EXISTS`         | vector index name already taken          | yes     |
//! | `INVALID_REQUEST`      | rejected input or client configuration   | yes     |
//! | `INVALID_RESPONSE`     | 2xx body with an unexpected shape        | yes     |
//! | `UNKNOWN_ERROR`        | structured error without a type          | yes     |
//! | `CLIENT_CLOSED`        | call issued after `close()`              | never   |
//!
//! ## Example
//!
//! ```rust
//! use neuredge_sdk::error_code::ErrorCode;
//!
//! let code = ErrorCode::from_code("quota_exceeded");
//! assert_eq!(code, ErrorCode::QuotaExceeded);
//! assert!(!code.retryable());
//! assert_eq!(code.as_str(), "QUOTA_EXCEEDED");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable error code attached to every [`crate::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NetworkError,
    AuthenticationError,
    QuotaExceeded,
    RequestFailed,
    IndexNotFound,
    IndexExists,
    InvalidRequest,
    InvalidResponse,
    UnknownError,
    /// The client was closed; no network I/O was attempted.
    ClientClosed,
    /// Any other uppercased `error.type` reported by the server.
    Other(String),
}

impl ErrorCode {
    /// Returns the canonical code string (e.g., `"NETWORK_ERROR"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::AuthenticationError => "AUTHENTICATION_ERROR",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::RequestFailed => "REQUEST_FAILED",
            Self::IndexNotFound => "INDEX_NOT_FOUND",
            Self::IndexExists => "INDEX_EXISTS",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::ClientClosed => "CLIENT_CLOSED",
            Self::Other(code) => code.as_str(),
        }
    }

    /// Returns whether the retrying transport may try the request again.
    ///
    /// Authentication and quota failures will not go away on their own, and a
    /// closed client has no session to retry on.
    #[inline]
    pub fn retryable(&self) -> bool {
        !matches!(
            self,
            Self::AuthenticationError | Self::QuotaExceeded | Self::ClientClosed
        )
    }

    /// Maps a server-provided error type to a code.
    ///
    /// Matching is case-insensitive; unknown types are kept verbatim (uppercased)
    /// in [`ErrorCode::Other`].
    pub fn from_code(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        match upper.as_str() {
            "NETWORK_ERROR" => Self::NetworkError,
            "AUTHENTICATION_ERROR" => Self::AuthenticationError,
            "QUOTA_EXCEEDED" => Self::QuotaExceeded,
            "REQUEST_FAILED" => Self::RequestFailed,
            "INDEX_NOT_FOUND" => Self::IndexNotFound,
            "INDEX_EXISTS" => Self::IndexExists,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "INVALID_RESPONSE" => Self::InvalidResponse,
            "" | "UNKNOWN_ERROR" => Self::UnknownError,
            "CLIENT_CLOSED" => Self::ClientClosed,
            _ => Self::Other(upper),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_code(&raw))
    }
}
