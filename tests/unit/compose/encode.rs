//! Tests for output formats, encoding and data URLs

#[cfg(test)]
mod tests {
    use bouquet::BouquetError;
    use bouquet::compose::encode::encode;
    use bouquet::compose::{EncodedImage, OutputFormat};
    use bouquet::io::configuration::JPEG_QUALITY;
    use image::{Rgba, RgbaImage};

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(16, 16, Rgba([255, 240, 250, 255]))
    }

    // Tests format metadata for both encodings
    // Verified by giving JPEG a .jpeg extension
    #[test]
    fn test_format_metadata() {
        assert_eq!(OutputFormat::Png.mime(), "image/png");
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::email().mime(), "image/jpeg");
        assert_eq!(OutputFormat::email().extension(), "jpg");
        assert_eq!(
            OutputFormat::email(),
            OutputFormat::Jpeg {
                quality: JPEG_QUALITY
            }
        );
    }

    // Tests format parsing from names and MIME types
    // Verified by rejecting the jpg alias
    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<OutputFormat>().ok(), Some(OutputFormat::Png));
        assert_eq!("jpg".parse::<OutputFormat>().ok(), Some(OutputFormat::email()));
        assert!(matches!(
            "gif".parse::<OutputFormat>(),
            Err(BouquetError::InvalidParameter { .. })
        ));
        assert_eq!(OutputFormat::from_mime("image/jpeg"), Some(OutputFormat::email()));
        assert_eq!(OutputFormat::from_mime("image/webp"), None);
    }

    // Tests PNG encoding is lossless
    // Verified by encoding RGB without alpha
    #[test]
    fn test_png_encoding_lossless() {
        let encoded = encode(&canvas(), OutputFormat::Png).expect("encode");
        assert_eq!(encoded.format(), OutputFormat::Png);
        let decoded = image::load_from_memory(encoded.bytes())
            .expect("decode")
            .to_rgba8();
        assert_eq!(decoded, canvas());
    }

    // Tests JPEG encoding produces a decodable image of the same size
    // Verified by passing RGBA bytes to the JPEG encoder
    #[test]
    fn test_jpeg_encoding() {
        let encoded = encode(&canvas(), OutputFormat::email()).expect("encode");
        let decoded = image::load_from_memory(encoded.bytes()).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    // Tests data URLs carry the MIME type and parse back
    // Verified by hard-coding image/png in the header
    #[test]
    fn test_data_url() {
        let encoded = encode(&canvas(), OutputFormat::email()).expect("encode");
        let url = encoded.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let parsed = EncodedImage::from_data_url(&url).expect("parse");
        assert_eq!(parsed, encoded);
        assert_eq!(parsed.into_bytes().len(), encoded.bytes().len());
    }

    // Tests malformed data URLs are field validation errors
    // Verified by accepting gif payloads
    #[test]
    fn test_data_url_rejections() {
        for bad in [
            "",
            "not a url",
            "data:image/gif;base64,R0lGOD",
            "data:image/png,plain",
            "data:image/png;base64,@@@",
            "data:image/png;base64,",
        ] {
            match EncodedImage::from_data_url(bad) {
                Err(BouquetError::Validation { issues }) => {
                    assert!(issues.iter().all(|issue| issue.field == "image_data"));
                }
                other => unreachable!("{bad:?} gave {other:?}"),
            }
        }
    }
}
