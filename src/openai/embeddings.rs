use super::models::resolve_embedding_model;
use super::types::{EmbeddingRequest, EmbeddingResponse};
use crate::capability::Capability;
use crate::transport::{Request, RetryingTransport};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct Embeddings {
    transport: Arc<RetryingTransport>,
}

impl Capability for Embeddings {
    fn base_path(&self) -> &'static str {
        "/v1"
    }
}

impl Embeddings {
    pub(crate) fn new(transport: Arc<RetryingTransport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        let mut body = serde_json::to_value(request)?;
        body["model"] = Value::String(resolve_embedding_model(&request.model).to_string());

        let resp = self
            .transport
            .execute_json(&Request::post(self.endpoint("/embeddings"), body))
            .await?;
        Ok(serde_json::from_value(resp)?)
    }
}
