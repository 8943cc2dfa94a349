//! Chat Streaming Example
//!
//! Streams an OpenAI-compatible chat completion and prints tokens as they
//! arrive. Dropping the stream early releases the connection.
//!
//!   cargo run --example chat_stream -- "Tell me a haiku about Rust"

use futures::StreamExt;
use neuredge_sdk::openai::{ChatCompletionRequest, ChatMessage};
use neuredge_sdk::NeuredgeClient;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("neuredge_sdk=warn")
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Explain ownership in Rust in two sentences.".to_string());

    let client = NeuredgeClient::builder().build()?;
    let request = ChatCompletionRequest::new(vec![
        ChatMessage::system("You are a concise assistant."),
        ChatMessage::user(prompt),
    ])
    .with_model("gpt-3.5-turbo")
    .with_max_tokens(256);

    let mut stream = client.openai().chat().create_stream(&request).await?;
    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if let Some(text) = chunk.content() {
            write!(stdout, "{text}")?;
            stdout.flush()?;
        }
    }
    println!();

    client.close();
    Ok(())
}
