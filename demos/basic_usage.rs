//! Basic Usage Example
//!
//! Summarize, translate and analyze sentiment with one client.
//!
//! Set NEUREDGE_API_KEY (or store the key in the OS keyring under service
//! `neuredge`) and run:
//!
//!   cargo run --example basic_usage

use neuredge_sdk::text::LanguageCode;
use neuredge_sdk::{ErrorCode, NeuredgeClient};

const ARTICLE: &str = "Rust is a multi-paradigm, general-purpose programming language \
that emphasizes performance, type safety, and concurrency. It enforces memory safety \
without a garbage collector by tracking ownership and borrowing at compile time.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("neuredge_sdk=info")
        .init();

    let client = NeuredgeClient::builder().max_retries(3).retry_delay(1.0).build()?;
    println!("Connected to {}\n", client.base_url());

    let summary = client.text().summarize(ARTICLE).await?;
    println!("Summary: {summary}");

    let spanish = client
        .text()
        .translate(&summary, LanguageCode::Es, Some(LanguageCode::En))
        .await?;
    println!("Spanish: {spanish}");

    match client.text().analyze_sentiment("I love this SDK!").await {
        Ok(result) => println!("Sentiment: {:?} ({:.2})", result.sentiment, result.confidence),
        Err(e) if e.code == ErrorCode::QuotaExceeded => {
            println!("Quota exhausted, not retried: {}", e.message)
        }
        Err(e) => return Err(e.into()),
    }

    client.close();
    Ok(())
}
