//! Image generation types and data-URI helpers.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MODEL: &str = "@cf/stabilityai/stable-diffusion-xl-base-1.0";
pub const DEFAULT_IMAGE_SIZE: u32 = 1024;
const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageGenerationMode {
    Fast,
    Standard,
}

/// Options for `/image/generate`. Unset optional fields are not sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub model: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ImageGenerationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_IMAGE_MODEL.to_string(),
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
            style: None,
            mode: None,
            negative_prompt: None,
            guidance: None,
            seed: None,
        }
    }
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_mode(mut self, mode: ImageGenerationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    pub fn with_guidance(mut self, guidance: f32) -> Self {
        self.guidance = Some(guidance);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generated images, each either a `data:` URI or whatever string the server
/// returned (usually a URL or bare base64).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedImages {
    pub images: Vec<String>,
}

impl GeneratedImages {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decode image `index` back to raw bytes.
    pub fn decode(&self, index: usize) -> Result<Vec<u8>> {
        let image = self.images.get(index).ok_or_else(|| {
            Error::invalid_request(format!(
                "Image index {} out of range ({} images)",
                index,
                self.images.len()
            ))
        })?;
        decode_data_uri(image)
    }
}

/// Wrap raw JPEG bytes as a `data:image/jpeg;base64,...` URI.
pub fn encode_data_uri(bytes: &[u8]) -> String {
    format!("{}{}", JPEG_DATA_URI_PREFIX, STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URI (any media type) or a bare base64 string.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let encoded = match uri.strip_prefix("data:") {
        Some(rest) => {
            let (meta, data) = rest
                .split_once(',')
                .ok_or_else(|| Error::invalid_response("Malformed data URI: missing ','"))?;
            if !meta.ends_with(";base64") {
                return Err(Error::invalid_response(
                    "Only base64-encoded data URIs are supported",
                ));
            }
            data
        }
        None => uri,
    };
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::invalid_response(format!("Invalid base64 image data: {}", e)))
}
