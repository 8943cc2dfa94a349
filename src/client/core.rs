use crate::client::builder::NeuredgeClientBuilder;
use crate::client::config::ClientConfig;
use crate::image::ImageCapabilities;
use crate::openai::OpenAINamespace;
use crate::text::TextCapabilities;
use crate::transport::{Payload, Request, RetryPolicy, RetryingTransport, Transport};
use crate::vector::VectorStoreCapabilities;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Entry point to the Neuredge platform.
///
/// Configuration is immutable after construction. Clones share one HTTP
/// session, so [`NeuredgeClient::close`] on any clone closes all of them.
#[derive(Clone)]
pub struct NeuredgeClient {
    config: Arc<ClientConfig>,
    transport: Arc<RetryingTransport>,
    text: TextCapabilities,
    image: ImageCapabilities,
    vector: VectorStoreCapabilities,
    openai: OpenAINamespace,
}

/// Older name of [`NeuredgeClient`].
pub type Client = NeuredgeClient;

impl NeuredgeClient {
    /// Client with default settings and an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> NeuredgeClientBuilder {
        NeuredgeClientBuilder::new()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        NeuredgeClientBuilder::from_config(config).build()
    }

    /// Assemble a client around an already-validated config and a transport.
    pub(crate) fn with_transport(config: ClientConfig, inner: Arc<dyn Transport>) -> Self {
        let policy = RetryPolicy::from_config(&config);
        let transport = Arc::new(RetryingTransport::new(inner, policy));
        Self {
            config: Arc::new(config),
            text: TextCapabilities::new(transport.clone()),
            image: ImageCapabilities::new(transport.clone()),
            vector: VectorStoreCapabilities::new(transport.clone()),
            openai: OpenAINamespace::new(transport.clone()),
            transport,
        }
    }

    pub fn text(&self) -> &TextCapabilities {
        &self.text
    }

    pub fn image(&self) -> &ImageCapabilities {
        &self.image
    }

    pub fn vector(&self) -> &VectorStoreCapabilities {
        &self.vector
    }

    pub fn openai(&self) -> &OpenAINamespace {
        &self.openai
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.transport.policy()
    }

    /// Run an arbitrary request through the retrying transport.
    pub async fn execute(&self, request: &Request) -> Result<Payload> {
        self.transport.execute(request).await
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.transport.execute_json(&Request::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.transport.execute_json(&Request::post(path, body)).await
    }

    pub async fn delete(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = Request::delete(path);
        request.body = body;
        self.transport.execute_json(&request).await
    }

    /// Release the HTTP session. Every later call fails with `CLIENT_CLOSED`
    /// without touching the network. Closing twice is a no-op.
    pub fn close(&self) {
        self.transport.close();
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

impl std::fmt::Debug for NeuredgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeuredgeClient")
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}
