//! Image generation client.

use super::types::{encode_data_uri, GeneratedImages, ImageGenerationMode, ImageOptions};
use crate::capability::Capability;
use crate::transport::{Payload, Request, RetryingTransport};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageCapabilities {
    transport: Arc<RetryingTransport>,
}

impl Capability for ImageCapabilities {
    fn base_path(&self) -> &'static str {
        "/image"
    }
}

impl ImageCapabilities {
    pub(crate) fn new(transport: Arc<RetryingTransport>) -> Self {
        Self { transport }
    }

    /// Generate images for `prompt`.
    ///
    /// The endpoint answers either with raw image bytes (wrapped into a JPEG
    /// data URI here), a JSON object with an `images` array, or a single JSON
    /// string.
    pub async fn generate(&self, prompt: &str, options: ImageOptions) -> Result<GeneratedImages> {
        let mut body = serde_json::to_value(&options)?;
        body["prompt"] = Value::String(prompt.to_string());

        let request = Request::post(self.endpoint("/generate"), body).binary();
        let payload = self.transport.execute(&request).await?;
        images_from_payload(payload)
    }

    pub async fn generate_fast(&self, prompt: &str, options: ImageOptions) -> Result<GeneratedImages> {
        self.generate(prompt, options.with_mode(ImageGenerationMode::Fast))
            .await
    }

    pub async fn generate_standard(
        &self,
        prompt: &str,
        options: ImageOptions,
    ) -> Result<GeneratedImages> {
        self.generate(prompt, options.with_mode(ImageGenerationMode::Standard))
            .await
    }
}

fn images_from_payload(payload: Payload) -> Result<GeneratedImages> {
    match payload {
        Payload::Binary(bytes) => Ok(GeneratedImages {
            images: vec![encode_data_uri(&bytes)],
        }),
        Payload::Json(Value::String(image)) => Ok(GeneratedImages {
            images: vec![image],
        }),
        Payload::Json(Value::Object(map)) => {
            let images = match map.get("images") {
                Some(v) => serde_json::from_value(v.clone())?,
                None => Vec::new(),
            };
            Ok(GeneratedImages { images })
        }
        Payload::Json(other) => Err(Error::invalid_response(format!(
            "Unexpected image response: {}",
            other
        ))),
    }
}
