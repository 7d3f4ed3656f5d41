//! Optional generative services: greeting rewrite and bouquet image generation

use crate::compose::encode::{EncodedImage, OutputFormat};
use crate::io::configuration::MAX_MESSAGE_CHARS;
use crate::io::error::{Result, service_error};
use async_trait::async_trait;
use tracing::warn;

/// Rewrites a greeting message
#[async_trait]
pub trait MessageEnhancer: Send + Sync {
    /// Return a rewritten version of `message`
    ///
    /// # Errors
    ///
    /// Returns an external service error if the rewrite fails
    async fn enhance(&self, message: &str) -> Result<String>;
}

/// Produces a bouquet image from a text prompt
#[async_trait]
pub trait BouquetImageGenerator: Send + Sync {
    /// Generate an image for `prompt`
    ///
    /// # Errors
    ///
    /// Returns an external service error if no image was produced
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}

/// Image returned by a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// MIME type reported by the generator
    pub mime: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Convert to an encoded image
    ///
    /// # Errors
    ///
    /// Returns an external service error for MIME types other than png/jpeg
    pub fn into_encoded(self) -> Result<EncodedImage> {
        let format = OutputFormat::from_mime(&self.mime).ok_or_else(|| {
            service_error(
                "image generator",
                &format!("unsupported image type '{}'", self.mime),
            )
        })?;
        Ok(EncodedImage::new(format, self.bytes))
    }
}

/// Trim and cap a rewritten greeting at the message length limit
pub fn clamp_message(text: &str) -> String {
    text.trim().chars().take(MAX_MESSAGE_CHARS).collect()
}

/// Rewrite `message`, falling back to the original on any failure
///
/// Blank rewrites also fall back.
pub async fn enhance_or_keep(enhancer: &(impl MessageEnhancer + ?Sized), message: &str) -> String {
    match enhancer.enhance(message).await {
        Ok(rewritten) => {
            let clamped = clamp_message(&rewritten);
            if clamped.is_empty() {
                message.to_string()
            } else {
                clamped
            }
        }
        Err(e) => {
            warn!(error = %e, "message enhancement failed, keeping original");
            message.to_string()
        }
    }
}
