//! Natural-language bouquet descriptions for image generation

use crate::io::error::{Result, validation_error};
use crate::layout::ItemKind;
use crate::selection::LabeledItem;

/// Describe the items of one kind as `"2 Roses, 1 Tulip"`
///
/// Returns an empty string when no item of `kind` is present.
pub fn describe_kind(items: &[LabeledItem], kind: ItemKind) -> String {
    items
        .iter()
        .filter(|item| item.kind == kind)
        .map(|item| {
            let plural = if item.quantity > 1 { "s" } else { "" };
            format!("{} {}{plural}", item.quantity, item.label)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Describe the bouquet contents, e.g. `"2 Roses with 1 Teddy Bear"`
pub fn describe_bouquet(items: &[LabeledItem]) -> String {
    let flowers = describe_kind(items, ItemKind::Flower);
    let props = describe_kind(items, ItemKind::Prop);

    let flower_desc = if flowers.is_empty() {
        "no flowers".to_string()
    } else {
        flowers
    };
    if props.is_empty() {
        flower_desc
    } else {
        format!("{flower_desc} with {props}")
    }
}

/// Full image generation prompt for a selection
///
/// # Errors
///
/// Returns a validation error if `items` is empty or holds a zero quantity
pub fn image_prompt(items: &[LabeledItem]) -> Result<String> {
    if items.is_empty() {
        return Err(validation_error(
            "items",
            "At least one flower or prop is required",
        ));
    }
    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(validation_error(
            "quantity",
            format!("'{}' must have a quantity of at least 1", item.label),
        ));
    }

    Ok(format!(
        "Generate a single high-quality photorealistic image of a beautiful floral bouquet. \
         The bouquet must contain: {}. Style: elegant gift bouquet, tightly arranged cluster \
         of blooms at the top, stems converging below, wrapped in soft light pink paper with a \
         cream/yellow ribbon and bow. Pastel kawaii aesthetic, professional product photography, \
         soft lighting, clean background. Output a single square image (1:1 aspect ratio) of the \
         complete bouquet.",
        describe_bouquet(items)
    ))
}

/// Prompt asking a language model to rewrite a greeting
pub fn enhance_prompt(message: &str, max_chars: usize) -> String {
    format!(
        "Rewrite this message into a sweet, heartwarming greeting. Keep it under {max_chars} \
         characters. Return only the rewritten message, nothing else.\n\nOriginal message: {message}"
    )
}
