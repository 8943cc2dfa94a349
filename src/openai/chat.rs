//! Chat completions, unary and streaming.

use super::models::resolve_chat_model;
use super::types::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest};
use crate::capability::Capability;
use crate::transport::error_classification::classify_error_value;
use crate::transport::sse::decode_sse;
use crate::transport::{Request, RetryingTransport};
use crate::{BoxStream, Error, Result};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;

/// Forward-only stream of completion chunks. Dropping it closes the connection.
pub type ChatStream = BoxStream<'static, ChatCompletionChunk>;

#[derive(Clone)]
pub struct ChatCompletions {
    transport: Arc<RetryingTransport>,
}

impl Capability for ChatCompletions {
    fn base_path(&self) -> &'static str {
        "/v1"
    }
}

impl ChatCompletions {
    pub(crate) fn new(transport: Arc<RetryingTransport>) -> Self {
        Self { transport }
    }

    fn build_request(&self, request: &ChatCompletionRequest, stream: bool) -> Result<Request> {
        if request.messages.is_empty() {
            return Err(Error::invalid_request("messages must not be empty"));
        }
        let mut body = serde_json::to_value(request)?;
        body["model"] = Value::String(resolve_chat_model(&request.model).to_string());
        body["stream"] = Value::Bool(stream);
        Ok(Request::post(self.endpoint("/chat/completions"), body))
    }

    pub async fn create(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        let req = self.build_request(request, false)?;
        let resp = self.transport.execute_json(&req).await?;
        Ok(serde_json::from_value(resp)?)
    }

    /// Stream a completion.
    ///
    /// Opening the stream is retried like any request; once chunks start flowing
    /// a failure ends the stream with that error. Chunks without choices
    /// (keep-alives, usage trailers) are skipped.
    pub async fn create_stream(&self, request: &ChatCompletionRequest) -> Result<ChatStream> {
        let req = self.build_request(request, true)?;
        let bytes = self.transport.execute_stream(&req).await?;

        let chunks = decode_sse(bytes).filter_map(|frame| async move {
            match frame {
                Ok(value) => parse_chunk(value).transpose(),
                Err(e) => Some(Err(e)),
            }
        });
        Ok(Box::pin(chunks))
    }
}

fn parse_chunk(value: Value) -> Result<Option<ChatCompletionChunk>> {
    if let Some(error_data) = value.get("error") {
        return Err(classify_error_value(200, error_data.clone()));
    }
    let chunk: ChatCompletionChunk = serde_json::from_value(value)?;
    if chunk.choices.is_empty() {
        return Ok(None);
    }
    Ok(Some(chunk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_chunk() {
        let chunk = parse_chunk(json!({
            "id": "c1", "created": 1, "model": "m",
            "choices": [{"index": 0, "delta": {"content": "Hel"}}]
        }))
        .unwrap()
        .unwrap();
        assert_eq!(chunk.content(), Some("Hel"));
        assert_eq!(chunk.object, "chat.completion.chunk");

        assert!(parse_chunk(json!({"id": "c1", "choices": []})).unwrap().is_none());

        let err = parse_chunk(json!({"error": {"type": "quota_exceeded", "message": "limit"}}))
            .unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::QuotaExceeded);
    }
}
