//! PNG and JPEG encoding plus `data:` URL conversion

use crate::io::configuration::JPEG_QUALITY;
use crate::io::error::{BouquetError, Result, invalid_parameter, validation_error};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use std::fmt;
use std::str::FromStr;

/// Raster encoding of a rendered bouquet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless, used for downloads
    Png,
    /// Lossy and smaller, used for email
    Jpeg {
        /// Encoder quality in `1..=100`
        quality: u8,
    },
}

impl OutputFormat {
    /// JPEG at the quality used for emailed bouquets
    pub const fn email() -> Self {
        Self::Jpeg {
            quality: JPEG_QUALITY,
        }
    }

    /// MIME type of the encoded bytes
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    /// File extension without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }

    /// Format for a MIME type, JPEG gets the email quality
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::email()),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => f.write_str("png"),
            Self::Jpeg { quality } => write!(f, "jpeg@{quality}"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BouquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::email()),
            _ => Err(invalid_parameter("format", &s, &"expected 'png' or 'jpeg'")),
        }
    }
}

/// Encoded image bytes tagged with their format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    format: OutputFormat,
    bytes: Vec<u8>,
}

impl EncodedImage {
    /// Wrap bytes that are already encoded as `format`
    pub const fn new(format: OutputFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Encoding of the bytes
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Borrow the encoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Render as a `data:<mime>;base64,` URL
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            STANDARD.encode(&self.bytes)
        )
    }

    /// Parse a base64 `data:` URL holding a png or jpeg image
    ///
    /// # Errors
    ///
    /// Returns a validation error on the `image_data` field if the URL is not
    /// a base64 png/jpeg data URL or the payload is not valid base64
    pub fn from_data_url(url: &str) -> Result<Self> {
        let Some((header, payload)) = url.trim().split_once(',') else {
            return Err(validation_error("image_data", "Invalid image data"));
        };
        let format = header
            .strip_prefix("data:")
            .and_then(|meta| meta.strip_suffix(";base64"))
            .and_then(OutputFormat::from_mime)
            .ok_or_else(|| validation_error("image_data", "Invalid image data"))?;

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| validation_error("image_data", format!("Invalid base64 payload: {e}")))?;
        if bytes.is_empty() {
            return Err(validation_error("image_data", "Image data is empty"));
        }
        Ok(Self::new(format, bytes))
    }
}

/// Encode a rendered image
///
/// JPEG drops the alpha channel; rendered canvases are opaque.
///
/// # Errors
///
/// Returns an error if the encoder rejects the image
pub fn encode(image: &RgbaImage, format: OutputFormat) -> Result<EncodedImage> {
    let mut bytes = Vec::new();
    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
        }
    };

    result.map_err(|source| BouquetError::ImageEncode {
        format: format.mime(),
        source,
    })?;
    Ok(EncodedImage::new(format, bytes))
}
