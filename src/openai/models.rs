//! OpenAI model name aliases.
//!
//! Recognised OpenAI names map to the platform model serving them; any other
//! name is passed through unchanged.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

static CHAT_MODEL_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("gpt-3.5-turbo", "@cf/meta/llama-3.1-8b-instruct"),
        ("gpt-4", "@cf/meta/llama-3.1-70b-instruct"),
    ])
});

// Both map to a 768-dimension model.
static EMBEDDING_MODEL_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("text-embedding-ada-002", "@cf/baai/bge-base-en-v1.5"),
        ("text-embedding-3-small", "@cf/baai/bge-base-en-v1.5"),
    ])
});

pub fn resolve_chat_model(model: &str) -> &str {
    CHAT_MODEL_ALIASES.get(model).copied().unwrap_or(model)
}

pub fn resolve_embedding_model(model: &str) -> &str {
    EMBEDDING_MODEL_ALIASES.get(model).copied().unwrap_or(model)
}
