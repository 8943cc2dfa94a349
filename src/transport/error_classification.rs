//! Error classification: raw failures → [`Error`].
//!
//! Every failure that leaves the transport goes through one of these functions,
//! so the rest of the SDK never sees a reqwest error or an HTTP status directly.

use super::request::Payload;
use crate::error_code::ErrorCode;
use crate::{Error, Result};
use bytes::Bytes;
use serde_json::Value;

/// Translate a connection-level failure (refused, DNS, timeout, broken body).
pub(crate) fn classify_transport_error(err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::network(format!("request timed out: {}", err));
    }
    Error::network(err.to_string())
}

/// Translate a non-2xx response.
pub fn classify_response(status: u16, body: &[u8]) -> Error {
    let parsed = serde_json::from_slice::<Value>(body).ok();

    if status == 401 {
        let mut err = Error::authentication();
        if let Some(error_data) = parsed.as_ref().and_then(|v| v.get("error")) {
            err = err.with_details(error_data.clone());
        }
        return err;
    }

    match parsed {
        Some(Value::Object(map)) => {
            let error_data = map
                .get("error")
                .cloned()
                .unwrap_or_else(|| Value::Object(map.clone()));
            classify_error_value(status, error_data)
        }
        _ => Error::new(
            format!("HTTP {} error", status),
            ErrorCode::RequestFailed,
            status,
        ),
    }
}

/// Classify the `error` member of a structured body.
pub(crate) fn classify_error_value(status: u16, error_data: Value) -> Error {
    match error_data {
        Value::Object(ref obj) => {
            let code = obj
                .get("type")
                .and_then(Value::as_str)
                .or_else(|| obj.get("code").and_then(Value::as_str))
                .map(ErrorCode::from_code)
                .unwrap_or(ErrorCode::UnknownError);
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            Error::new(message, code, status).with_details(error_data)
        }
        Value::String(message) => Error::new(message, ErrorCode::RequestFailed, status),
        other => Error::new(other.to_string(), ErrorCode::RequestFailed, status),
    }
}

/// Decode a 2xx body.
///
/// A JSON envelope of the form `{"success": false, "error": {...}}` is still a
/// failure even though the status says otherwise; this is how the platform
/// reports quota exhaustion on some endpoints.
pub fn decode_success(status: u16, body: Bytes, expects_binary: bool) -> Result<Payload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::Json(Value::Null));
    }

    match serde_json::from_slice::<Value>(&body) {
        Ok(json) => {
            if json.get("success").and_then(Value::as_bool) == Some(false) {
                if let Some(error_data) = json.get("error") {
                    return Err(classify_error_value(status, error_data.clone()));
                }
            }
            Ok(Payload::Json(json))
        }
        Err(_) if expects_binary => Ok(Payload::Binary(body)),
        Err(e) => Err(Error::invalid_response(format!(
            "Response body is not valid JSON: {}",
            e
        ))),
    }
}
