//! Deterministic bouquet layout

/// Item kinds, layout inputs and placed heads
pub mod item;
/// Clustered dome placement of bouquet heads
pub mod placement;
/// Seeded and entropy-backed random sources
pub mod random;

pub use item::{ItemKind, LayoutItem, PlacedItem};
pub use placement::{compute_layout, compute_layout_with};
