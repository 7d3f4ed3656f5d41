//! Item kinds, layout inputs and placed heads

use crate::io::configuration::{
    FLOWER_STEM_RGBA, HEAD_RATIO_FLOWER, HEAD_RATIO_PROP, PROP_STEM_RGBA,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a drawable asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A bloom with a green stem
    Flower,
    /// A decoration on a wooden stick
    Prop,
}

impl ItemKind {
    /// Every kind, flowers first
    pub const ALL: [Self; 2] = [Self::Flower, Self::Prop];

    /// Asset sub-folder holding sprites of this kind
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Flower => "flowers",
            Self::Prop => "props",
        }
    }

    /// Fraction of the source image, from the top, that holds the head
    pub const fn head_ratio(self) -> f32 {
        match self {
            Self::Flower => HEAD_RATIO_FLOWER,
            Self::Prop => HEAD_RATIO_PROP,
        }
    }

    /// Straight RGBA colour of the stem drawn for this kind
    pub const fn stem_rgba(self) -> [u8; 4] {
        match self {
            Self::Flower => FLOWER_STEM_RGBA,
            Self::Prop => PROP_STEM_RGBA,
        }
    }

    /// Lowercase name used in identifiers and serialized forms
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::Prop => "prop",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = crate::BouquetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flower" | "flowers" => Ok(Self::Flower),
            "prop" | "props" => Ok(Self::Prop),
            _ => Err(crate::io::error::invalid_parameter(
                "kind",
                &s,
                &"expected 'flower' or 'prop'",
            )),
        }
    }
}

/// One selected asset and how many copies of it go into the bouquet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    /// Asset filename inside the kind's folder
    pub source_id: String,
    /// Asset category
    pub kind: ItemKind,
    /// Number of heads to place
    pub quantity: u32,
}

impl LayoutItem {
    /// Create a layout item
    pub fn new(source_id: impl Into<String>, kind: ItemKind, quantity: u32) -> Self {
        Self {
            source_id: source_id.into(),
            kind,
            quantity,
        }
    }
}

/// A single head positioned inside the bouquet
///
/// Coordinates are normalized to the canvas, so the same layout renders at any size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Horizontal head position in `[0, 1]`
    pub x: f64,
    /// Vertical head position in `[0, 1]`, growing downwards
    pub y: f64,
    /// Size multiplier applied to the base sprite size
    pub scale: f64,
    /// Clockwise rotation aiming the stem at the tie point
    pub rotation_degrees: f64,
    /// Asset filename inside the kind's folder
    pub source_id: String,
    /// Asset category
    pub kind: ItemKind,
}
