//! # neuredge-sdk
//!
//! Neuredge AI 平台的 Rust SDK：文本、图像、向量存储与 OpenAI 兼容接口，内置重试与一致性轮询。
//!
//! Rust client for the Neuredge AI platform: text, image, vector store and
//! OpenAI-compatible chat/embeddings behind one typed request layer.
//!
//! ## Overview
//!
//! Every operation is built the same way: a capability turns typed arguments
//! into a [`transport::Request`], the retrying transport executes it with
//! exponential backoff, and vector operations that opt into consistency poll
//! the index until the write is visible.
//!
//! - **Retries**: `max_retries` attempts, sleeping `retry_delay * 2^attempt`
//!   between them. Authentication and quota failures are never retried.
//! - **One error type**: every failure is an [`Error`] carrying an
//!   [`ErrorCode`]; callers branch on the code.
//! - **Consistency**: best-effort polling after inserts and before trusting an
//!   empty search, see [`consistency`].
//! - **Streaming**: chat completions can be consumed as a `futures::Stream`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neuredge_sdk::NeuredgeClient;
//! use neuredge_sdk::openai::{ChatCompletionRequest, ChatMessage};
//!
//! #[tokio::main]
//! async fn main() -> neuredge_sdk::Result<()> {
//!     let client = NeuredgeClient::builder()
//!         .api_key("your-api-key")
//!         .max_retries(3)
//!         .build()?;
//!
//!     let summary = client.text().summarize("A long article ...").await?;
//!     println!("{summary}");
//!
//!     let completion = client
//!         .openai()
//!         .chat()
//!         .create(&ChatCompletionRequest::new(vec![ChatMessage::user("Hello!")]))
//!         .await?;
//!     println!("{:?}", completion.content());
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and configuration |
//! | [`transport`] | HTTP transport, error classification, retry policy, SSE |
//! | [`consistency`] | Bounded polling until a condition holds |
//! | [`text`] | Summarization, translation, sentiment |
//! | [`image`] | Image generation and data-URI helpers |
//! | [`vector`] | Vector indexes, vectors and similarity search |
//! | [`openai`] | OpenAI-compatible chat completions and embeddings |

pub mod capability;
pub mod client;
pub mod consistency;
pub mod error_code;
pub mod image;
pub mod openai;
pub mod text;
pub mod transport;
pub mod vector;

pub use capability::Capability;
pub use client::{Client, ClientConfig, NeuredgeClient, NeuredgeClientBuilder};
pub use consistency::{ConsistencyPolicy, PollOutcome};
pub use error_code::ErrorCode;

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::Error;
