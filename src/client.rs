//! Neuredge client.
//!
//! Keep the public surface small: build a [`NeuredgeClient`] with
//! [`NeuredgeClientBuilder`], then reach each capability through its accessor.
//! Implementation details live in submodules under `src/client/`.

pub mod builder;
pub mod config;
pub mod core;

pub use builder::NeuredgeClientBuilder;
pub use config::ClientConfig;
pub use core::{Client, NeuredgeClient};
