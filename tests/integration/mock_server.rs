//! Mock HTTP server setup for integration tests

use mockito::{Server, ServerGuard};
use neuredge_sdk::NeuredgeClient;

pub const API_KEY: &str = "test-key";

/// Test fixture that owns a mock server and builds clients pointed at it
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client with `max_retries` attempts and no backoff delay
    pub fn client(&self, max_retries: u32) -> NeuredgeClient {
        NeuredgeClient::builder()
            .api_key(API_KEY)
            .base_url(&self.base_url)
            .max_retries(max_retries)
            .retry_delay(0.0)
            .timeout_secs(5)
            .without_keyring()
            .build()
            .expect("client builds")
    }

    /// Build an SSE response body from JSON payloads, terminated by `[DONE]`
    pub fn sse_body(chunks: &[&str]) -> String {
        let mut body: String = chunks
            .iter()
            .map(|chunk| format!("data: {}\n\n", chunk))
            .collect();
        body.push_str("data: [DONE]\n\n");
        body
    }
}
