//! OpenAI 兼容接口：chat completions 与 embeddings。
//!
//! OpenAI-compatible namespace (`/v1/chat/completions`, `/v1/embeddings`).
//!
//! Requests use OpenAI model names; recognised aliases are mapped to platform
//! models in [`models`].

mod chat;
mod embeddings;
pub mod models;
mod types;

pub use chat::{ChatCompletions, ChatStream};
pub use embeddings::Embeddings;
pub use types::{
    ChatChoice, ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, ChatDelta,
    ChatMessage, ChatRole, ChunkChoice, EmbeddingData, EmbeddingInput, EmbeddingRequest,
    EmbeddingResponse, EmbeddingUsage, ResponseMessage, Usage,
};

use crate::capability::Capability;
use crate::transport::RetryingTransport;
use std::sync::Arc;

#[derive(Clone)]
pub struct OpenAINamespace {
    chat: ChatCompletions,
    embeddings: Embeddings,
}

impl Capability for OpenAINamespace {
    fn base_path(&self) -> &'static str {
        "/v1"
    }
}

impl OpenAINamespace {
    pub(crate) fn new(transport: Arc<RetryingTransport>) -> Self {
        Self {
            chat: ChatCompletions::new(transport.clone()),
            embeddings: Embeddings::new(transport),
        }
    }

    pub fn chat(&self) -> &ChatCompletions {
        &self.chat
    }

    pub fn embeddings(&self) -> &Embeddings {
        &self.embeddings
    }
}
