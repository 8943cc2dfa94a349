//! Image generation capability (`/image/generate`).

mod client;
mod types;

pub use client::ImageCapabilities;
pub use types::{
    decode_data_uri, encode_data_uri, GeneratedImages, ImageGenerationMode, ImageOptions,
    DEFAULT_IMAGE_MODEL, DEFAULT_IMAGE_SIZE,
};
