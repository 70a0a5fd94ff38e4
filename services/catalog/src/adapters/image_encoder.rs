//! services/catalog/src/adapters/image_encoder.rs
//!
//! Implements the `ImageEncoder` port by base64-encoding the image into a
//! `data:` URI on tokio's blocking pool.

use async_trait::async_trait;
use base64::Engine;
use print_catalog_core::{ImageEncoder, ImageFile, PortError, PortResult};

#[derive(Debug, Clone, Default)]
pub struct DataUrlEncoder;

impl DataUrlEncoder {
    pub fn new() -> Self {
        Self
    }
}

/// Builds `data:<mime>;base64,<payload>` for the given bytes.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, payload)
}

#[async_trait]
impl ImageEncoder for DataUrlEncoder {
    async fn encode_data_url(&self, image: &ImageFile) -> PortResult<String> {
        let mime_type = image.mime_type.clone();
        let bytes = image.bytes.clone();
        tokio::task::spawn_blocking(move || to_data_url(&mime_type, &bytes))
            .await
            .map_err(|e| PortError::Unexpected(format!("image encoding task failed: {}", e)))
    }
}
