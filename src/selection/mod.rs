//! Asset catalog and the user's bouquet selection

/// Asset directory listing
pub mod catalog;
/// Selected items and quantities
pub mod state;

pub use catalog::{Catalog, CatalogItem};
pub use state::{LabeledItem, SelectionEntry, SelectionState};
