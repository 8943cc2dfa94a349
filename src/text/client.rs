//! Text operations: summarization, translation and sentiment.

use super::types::{LanguageCode, SentimentResult};
use crate::capability::Capability;
use crate::transport::{Request, RetryingTransport};
use crate::{Error, Result};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextCapabilities {
    transport: Arc<RetryingTransport>,
}

impl Capability for TextCapabilities {
    fn base_path(&self) -> &'static str {
        ""
    }
}

impl TextCapabilities {
    pub(crate) fn new(transport: Arc<RetryingTransport>) -> Self {
        Self { transport }
    }

    pub async fn summarize(&self, text: &str) -> Result<String> {
        let resp = self
            .transport
            .execute_json(&Request::post(self.endpoint("/summarize"), json!({ "text": text })))
            .await?;
        string_at(&resp, "/result/summary")
    }

    /// Translate `text` into `target`. The source language is auto-detected when
    /// `source` is `None`.
    pub async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
        source: Option<LanguageCode>,
    ) -> Result<String> {
        let mut body = json!({ "text": text, "target_lang": target });
        if let Some(source) = source {
            body["source_lang"] = json!(source);
        }
        let resp = self
            .transport
            .execute_json(&Request::post(self.endpoint("/translate"), body))
            .await?;
        string_at(&resp, "/result/translation")
    }

    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResult> {
        let resp = self
            .transport
            .execute_json(&Request::post(self.endpoint("/sentiment"), json!({ "text": text })))
            .await?;
        let result = resp
            .get("result")
            .cloned()
            .ok_or_else(|| Error::invalid_response("Missing 'result' in sentiment response"))?;
        Ok(serde_json::from_value(result)?)
    }
}

fn string_at(resp: &Value, pointer: &str) -> Result<String> {
    resp.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_response(format!("Missing '{}' in response", pointer)))
}
