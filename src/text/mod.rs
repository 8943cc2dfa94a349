//! Text capability (`/summarize`, `/translate`, `/sentiment`).

mod client;
mod types;

pub use client::TextCapabilities;
pub use types::{LanguageCode, Sentiment, SentimentResult};
