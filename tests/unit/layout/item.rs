//! Tests for item kinds and their per-kind drawing parameters

#[cfg(test)]
mod tests {
    use bouquet::BouquetError;
    use bouquet::io::configuration::{HEAD_RATIO_FLOWER, HEAD_RATIO_PROP};
    use bouquet::layout::{ItemKind, LayoutItem};

    // Tests kind parsing accepts singular, plural and mixed case
    // Verified by dropping the plural arm
    #[test]
    fn test_kind_from_str() {
        assert_eq!("flower".parse::<ItemKind>().ok(), Some(ItemKind::Flower));
        assert_eq!("Flowers".parse::<ItemKind>().ok(), Some(ItemKind::Flower));
        assert_eq!(" PROP ".parse::<ItemKind>().ok(), Some(ItemKind::Prop));
        assert_eq!("props".parse::<ItemKind>().ok(), Some(ItemKind::Prop));
    }

    // Tests unknown kinds are rejected as invalid parameters
    // Verified by defaulting unknown input to Flower
    #[test]
    fn test_kind_from_str_rejects_unknown() {
        let result = "vase".parse::<ItemKind>();
        assert!(matches!(
            result,
            Err(BouquetError::InvalidParameter {
                parameter: "kind",
                ..
            })
        ));
    }

    // Tests folder names and head ratios per kind
    // Verified by swapping the prop and flower ratios
    #[test]
    fn test_kind_drawing_parameters() {
        assert_eq!(ItemKind::Flower.folder(), "flowers");
        assert_eq!(ItemKind::Prop.folder(), "props");
        assert!((ItemKind::Flower.head_ratio() - HEAD_RATIO_FLOWER).abs() < f32::EPSILON);
        assert!((ItemKind::Prop.head_ratio() - HEAD_RATIO_PROP).abs() < f32::EPSILON);
        assert_ne!(ItemKind::Flower.stem_rgba(), ItemKind::Prop.stem_rgba());
    }

    // Tests display and serde agree on the lowercase name
    // Verified by removing the serde rename
    #[test]
    fn test_kind_serialized_names() {
        assert_eq!(ItemKind::Prop.to_string(), "prop");
        let json = serde_json::to_string(&ItemKind::Flower).expect("serialize");
        assert_eq!(json, "\"flower\"");
        let back: ItemKind = serde_json::from_str("\"prop\"").expect("deserialize");
        assert_eq!(back, ItemKind::Prop);
    }

    // Tests flowers come before props in the canonical ordering
    // Verified by reversing ALL
    #[test]
    fn test_all_kinds_flowers_first() {
        assert_eq!(ItemKind::ALL, [ItemKind::Flower, ItemKind::Prop]);
    }

    // Tests layout item construction
    // Verified by ignoring the quantity argument
    #[test]
    fn test_layout_item_new() {
        let item = LayoutItem::new("rose.png", ItemKind::Flower, 3);
        assert_eq!(item.source_id, "rose.png");
        assert_eq!(item.kind, ItemKind::Flower);
        assert_eq!(item.quantity, 3);
    }
}
