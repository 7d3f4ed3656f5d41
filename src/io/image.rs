//! Sprite decoding and image file export

use crate::compose::encode::EncodedImage;
use crate::io::error::{BouquetError, Result};
use image::RgbaImage;
use std::path::Path;

/// Decode sprite bytes of any supported format into straight RGBA
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable png, jpeg or webp image
pub fn decode_sprite(bytes: &[u8], path: &Path) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| BouquetError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Write an encoded image to disk, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn write_image_file(encoded: &EncodedImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| BouquetError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, encoded.bytes()).map_err(|e| BouquetError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write image",
        source: e,
    })
}
