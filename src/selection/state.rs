//! Per-session bouquet selection with quantities

use crate::io::error::{BouquetError, FieldIssue, Result};
use crate::layout::{ItemKind, LayoutItem};
use serde::{Deserialize, Serialize};

/// One chosen asset and how many of it are in the bouquet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// `"<kind>:<source_id>"`, unique within a selection
    pub id: String,
    /// Asset category
    pub kind: ItemKind,
    /// Display label
    pub label: String,
    /// Copies in the bouquet, always at least one
    pub quantity: u32,
}

impl SelectionEntry {
    /// Asset filename encoded in the id
    pub fn source_id(&self) -> &str {
        self.id
            .split_once(':')
            .map_or(self.id.as_str(), |(_, source_id)| source_id)
    }
}

/// Label, kind and quantity used to describe a selection in prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledItem {
    /// Display label
    pub label: String,
    /// Asset category
    pub kind: ItemKind,
    /// Copies in the bouquet
    pub quantity: u32,
}

/// Build the selection id for an asset
pub fn selection_id(kind: ItemKind, source_id: &str) -> String {
    format!("{kind}:{source_id}")
}

/// Ordered set of selected items owned by one builder session
///
/// Entries keep the order they were first added in. Serializes as the bare
/// entry list, the same shape [`SelectionState::from_entries`] accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionState {
    entries: Vec<SelectionEntry>,
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection offered as an example bouquet
    pub fn example() -> Self {
        let mut state = Self::new();
        state.add(ItemKind::Flower, "rose.png", "Rose");
        state.add(ItemKind::Flower, "tulip.png", "Tulip");
        state.add(ItemKind::Flower, "sunflower.png", "Sunflower");
        state.add(ItemKind::Prop, "teddy-bear.png", "Teddy Bear");
        state
    }

    /// Rebuild a selection from stored entries
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every entry with a zero quantity,
    /// an id that does not match its kind, or a duplicate id
    pub fn from_entries(entries: Vec<SelectionEntry>) -> Result<Self> {
        let mut issues = Vec::new();
        for (position, entry) in entries.iter().enumerate() {
            if entry.quantity == 0 {
                issues.push(FieldIssue::new(
                    "quantity",
                    format!("entry '{}' must have a quantity of at least 1", entry.id),
                ));
            }
            if !entry.id.starts_with(&format!("{}:", entry.kind)) || entry.source_id().is_empty()
            {
                issues.push(FieldIssue::new(
                    "id",
                    format!("entry '{}' is not of the form '{}:<file>'", entry.id, entry.kind),
                ));
            }
            if entries
                .iter()
                .take(position)
                .any(|earlier| earlier.id == entry.id)
            {
                issues.push(FieldIssue::new(
                    "id",
                    format!("entry '{}' appears more than once", entry.id),
                ));
            }
        }

        if issues.is_empty() {
            Ok(Self { entries })
        } else {
            Err(BouquetError::Validation { issues })
        }
    }

    /// Add one copy of an asset, creating its entry at quantity 1 if absent
    pub fn add(&mut self, kind: ItemKind, source_id: &str, label: &str) {
        self.add_many(kind, source_id, label, 1);
    }

    /// Add `count` copies of an asset in one step
    ///
    /// Quantities saturate at `u32::MAX`; a zero count leaves the selection
    /// unchanged.
    pub fn add_many(&mut self, kind: ItemKind, source_id: &str, label: &str, count: u32) {
        if count == 0 {
            return;
        }
        let id = selection_id(kind, source_id);
        if let Some(entry) = self.entry_mut(&id) {
            entry.quantity = entry.quantity.saturating_add(count);
        } else {
            self.entries.push(SelectionEntry {
                id,
                kind,
                label: label.to_string(),
                quantity: count,
            });
        }
    }

    /// Add one copy to an existing entry, unknown ids are ignored
    pub fn increment(&mut self, id: &str) {
        if let Some(entry) = self.entry_mut(id) {
            entry.quantity += 1;
        }
    }

    /// Remove one copy, dropping the entry when none remain
    pub fn decrement(&mut self, id: &str) {
        if let Some(entry) = self.entry_mut(id) {
            entry.quantity = entry.quantity.saturating_sub(1);
        }
        self.entries.retain(|entry| entry.quantity > 0);
    }

    /// Drop an entry regardless of its quantity
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Clear the whole selection
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Entries in the order they were first added
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Whether nothing is selected
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities
    pub fn total(&self) -> u32 {
        self.entries
            .iter()
            .fold(0, |sum: u32, entry| sum.saturating_add(entry.quantity))
    }

    /// Quantity selected for `id`, zero when absent
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map_or(0, |entry| entry.quantity)
    }

    /// Layout input for the current selection
    pub fn layout_items(&self) -> Vec<LayoutItem> {
        self.entries
            .iter()
            .map(|entry| LayoutItem::new(entry.source_id(), entry.kind, entry.quantity))
            .collect()
    }

    /// Labelled quantities for prompt building
    pub fn labeled_items(&self) -> Vec<LabeledItem> {
        self.entries
            .iter()
            .map(|entry| LabeledItem {
                label: entry.label.clone(),
                kind: entry.kind,
                quantity: entry.quantity,
            })
            .collect()
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut SelectionEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}
