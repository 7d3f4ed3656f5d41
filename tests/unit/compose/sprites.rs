//! Tests for directory and in-memory sprite loaders

#[cfg(test)]
mod tests {
    use bouquet::BouquetError;
    use bouquet::compose::{DirectorySpriteLoader, MemorySpriteLoader, Sprite, SpriteLoader};
    use bouquet::layout::ItemKind;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::TempDir;

    // Tests sprite paths resolve under the kind folder
    // Verified by ignoring the kind folder
    #[test]
    fn test_sprite_path_layout() {
        let loader = DirectorySpriteLoader::new("assets");
        let path = loader
            .sprite_path(ItemKind::Prop, "teddy-bear.png")
            .expect("plain name");
        assert_eq!(path, loader.root().join("props").join("teddy-bear.png"));
    }

    // Tests names that could escape the asset directory are rejected
    // Verified by accepting any non-empty name
    #[test]
    fn test_sprite_path_rejects_traversal() {
        let loader = DirectorySpriteLoader::new("assets");
        for bad in ["", ".", "..", "../secret.png", "nested/rose.png", "a\\b.png"] {
            assert!(
                matches!(
                    loader.sprite_path(ItemKind::Flower, bad),
                    Err(BouquetError::Validation { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    // Tests a PNG on disk decodes to its pixel size
    // Verified by reading from the props folder for flowers
    #[tokio::test]
    async fn test_directory_loader_reads_png() {
        let temp_dir = TempDir::new().expect("temp dir");
        let flowers = temp_dir.path().join("flowers");
        fs::create_dir_all(&flowers).expect("flowers dir");
        RgbaImage::from_pixel(6, 12, Rgba([10, 200, 10, 255]))
            .save(flowers.join("fern.png"))
            .expect("write sprite");

        let loader = DirectorySpriteLoader::new(temp_dir.path());
        let sprite = loader.load(ItemKind::Flower, "fern.png").await.expect("load");
        assert_eq!((sprite.width(), sprite.height()), (6, 12));

        let missing = loader.load(ItemKind::Prop, "fern.png").await;
        assert!(matches!(missing, Err(BouquetError::FileSystem { .. })));
    }

    // Tests undecodable bytes surface as image load errors with the path
    // Verified by mapping decode errors to file system errors
    #[tokio::test]
    async fn test_directory_loader_rejects_garbage() {
        let temp_dir = TempDir::new().expect("temp dir");
        let props = temp_dir.path().join("props");
        fs::create_dir_all(&props).expect("props dir");
        fs::write(props.join("broken.png"), b"not an image").expect("write");

        let loader = DirectorySpriteLoader::new(temp_dir.path());
        match loader.load(ItemKind::Prop, "broken.png").await {
            Err(BouquetError::ImageLoad { path, .. }) => {
                assert!(path.ends_with("props/broken.png"));
            }
            other => unreachable!("expected image load error, got {other:?}"),
        }
    }

    // Tests the memory loader serves registered sprites by kind and name
    // Verified by keying only on the file name
    #[tokio::test]
    async fn test_memory_loader() {
        let sprite = Sprite::new(RgbaImage::new(3, 3));
        let loader = MemorySpriteLoader::new().with_sprite(ItemKind::Flower, "rose.png", sprite);

        let loaded = loader.load(ItemKind::Flower, "rose.png").await.expect("hit");
        assert_eq!(loaded.width(), 3);

        let wrong_kind = loader.load(ItemKind::Prop, "rose.png").await;
        assert!(matches!(
            wrong_kind,
            Err(BouquetError::ExternalService { .. })
        ));
    }
}
