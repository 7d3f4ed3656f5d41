//! Tests for generative service fallbacks and generated image conversion

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bouquet::compose::OutputFormat;
    use bouquet::delivery::ai::{GeneratedImage, MessageEnhancer, clamp_message, enhance_or_keep};
    use bouquet::io::error::service_error;
    use bouquet::{BouquetError, Result};

    /// Returns a fixed reply, or fails when there is none
    struct FixedEnhancer(Option<String>);

    #[async_trait]
    impl MessageEnhancer for FixedEnhancer {
        async fn enhance(&self, _message: &str) -> Result<String> {
            self.0
                .clone()
                .ok_or_else(|| service_error("test enhancer", &"offline"))
        }
    }

    // Tests rewrites are trimmed and capped at the message limit
    // Verified by capping bytes instead of characters
    #[test]
    fn test_clamp_message() {
        assert_eq!(clamp_message("  hello \n"), "hello");
        let long = "ß".repeat(250);
        assert_eq!(clamp_message(&long).chars().count(), 200);
    }

    // Tests a successful rewrite replaces the message
    // Verified by always keeping the original
    #[tokio::test]
    async fn test_enhance_success() {
        let enhancer = FixedEnhancer(Some(" Sending you all my love! ".to_string()));
        assert_eq!(
            enhance_or_keep(&enhancer, "love u").await,
            "Sending you all my love!"
        );
    }

    // Tests failures and blank rewrites keep the original message
    // Verified by propagating the enhancer error
    #[tokio::test]
    async fn test_enhance_falls_back() {
        assert_eq!(enhance_or_keep(&FixedEnhancer(None), "hi").await, "hi");
        let blank = FixedEnhancer(Some("   ".to_string()));
        assert_eq!(enhance_or_keep(&blank, "hi").await, "hi");
    }

    // Tests generated images convert by MIME type
    // Verified by treating every MIME type as PNG
    #[test]
    fn test_generated_image_conversion() {
        let png = GeneratedImage {
            mime: "image/png".to_string(),
            bytes: vec![1],
        };
        assert_eq!(png.into_encoded().map(|e| e.format()).ok(), Some(OutputFormat::Png));

        let gif = GeneratedImage {
            mime: "image/gif".to_string(),
            bytes: vec![1],
        };
        assert!(matches!(
            gif.into_encoded(),
            Err(BouquetError::ExternalService { .. })
        ));
    }
}
