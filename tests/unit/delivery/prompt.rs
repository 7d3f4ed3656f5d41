//! Tests for bouquet descriptions and generation prompts

#[cfg(test)]
mod tests {
    use bouquet::BouquetError;
    use bouquet::delivery::prompt::{
        describe_bouquet, describe_kind, enhance_prompt, image_prompt,
    };
    use bouquet::layout::ItemKind;
    use bouquet::selection::LabeledItem;

    fn item(label: &str, kind: ItemKind, quantity: u32) -> LabeledItem {
        LabeledItem {
            label: label.to_string(),
            kind,
            quantity,
        }
    }

    // Tests quantities pluralise labels above one
    // Verified by pluralising every label
    #[test]
    fn test_describe_kind() {
        let items = [
            item("Rose", ItemKind::Flower, 2),
            item("Tulip", ItemKind::Flower, 1),
            item("Teddy Bear", ItemKind::Prop, 1),
        ];
        assert_eq!(describe_kind(&items, ItemKind::Flower), "2 Roses, 1 Tulip");
        assert_eq!(describe_kind(&items, ItemKind::Prop), "1 Teddy Bear");
    }

    // Tests props are appended after flowers and a prop-only bouquet says so
    // Verified by dropping the no flowers fallback
    #[test]
    fn test_describe_bouquet() {
        let mixed = [
            item("Teddy Bear", ItemKind::Prop, 1),
            item("Rose", ItemKind::Flower, 3),
        ];
        assert_eq!(describe_bouquet(&mixed), "3 Roses with 1 Teddy Bear");

        let props_only = [item("Balloon", ItemKind::Prop, 2)];
        assert_eq!(describe_bouquet(&props_only), "no flowers with 2 Balloons");
    }

    // Tests the prompt embeds the description and the visual brief
    // Verified by omitting the description
    #[test]
    fn test_image_prompt() {
        let prompt = image_prompt(&[item("Rose", ItemKind::Flower, 1)]).expect("prompt");
        assert!(prompt.contains("The bouquet must contain: 1 Rose."));
        assert!(prompt.contains("light pink paper"));
        assert!(prompt.contains("1:1 aspect ratio"));
    }

    // Tests empty and zero-quantity inputs are rejected
    // Verified by prompting for an empty bouquet
    #[test]
    fn test_image_prompt_rejections() {
        assert!(matches!(
            image_prompt(&[]),
            Err(BouquetError::Validation { .. })
        ));
        assert!(matches!(
            image_prompt(&[item("Rose", ItemKind::Flower, 0)]),
            Err(BouquetError::Validation { .. })
        ));
    }

    // Tests the rewrite prompt carries the length cap and message
    // Verified by leaving out the original message
    #[test]
    fn test_enhance_prompt() {
        let prompt = enhance_prompt("love you", 200);
        assert!(prompt.contains("under 200 characters"));
        assert!(prompt.ends_with("Original message: love you"));
    }
}
