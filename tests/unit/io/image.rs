//! Tests for sprite decoding and image file export

#[cfg(test)]
mod tests {
    use bouquet::BouquetError;
    use bouquet::compose::encode::encode;
    use bouquet::compose::{EncodedImage, OutputFormat};
    use bouquet::io::image::{decode_sprite, write_image_file};
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    // Tests encoded PNG bytes decode back to RGBA
    // Verified by decoding to RGB
    #[test]
    fn test_decode_sprite() {
        let source = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 128]));
        let encoded = encode(&source, OutputFormat::Png).expect("encode");

        let decoded = decode_sprite(encoded.bytes(), Path::new("s.png")).expect("decode");
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1), &Rgba([10, 20, 30, 128]));
    }

    // Tests undecodable bytes name the offending file
    // Verified by dropping the path from the error
    #[test]
    fn test_decode_sprite_error() {
        match decode_sprite(b"not an image", Path::new("flowers/bad.png")) {
            Err(BouquetError::ImageLoad { path, .. }) => {
                assert_eq!(path, Path::new("flowers/bad.png"));
            }
            other => unreachable!("expected image load error, got {other:?}"),
        }
    }

    // Tests writing creates missing parent directories
    // Verified by writing without creating directories
    #[test]
    fn test_write_image_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("nested/deeper/out.png");
        let encoded = EncodedImage::new(OutputFormat::Png, vec![1, 2, 3]);

        write_image_file(&encoded, &path).expect("write");
        assert_eq!(std::fs::read(&path).expect("read"), vec![1, 2, 3]);
    }

    // Tests a parent that cannot be created is reported
    // Verified by ignoring the directory creation result
    #[test]
    fn test_write_image_file_error() {
        let temp_dir = TempDir::new().expect("temp dir");
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, b"x").expect("write blocker");

        let result = write_image_file(
            &EncodedImage::new(OutputFormat::Png, vec![1]),
            &blocker.join("out.png"),
        );
        assert!(matches!(
            result,
            Err(BouquetError::FileSystem {
                operation: "create directory",
                ..
            })
        ));
    }
}
