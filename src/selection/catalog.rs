//! Asset directory listing and label derivation

use crate::io::error::{BouquetError, Result, service_error};
use crate::layout::ItemKind;
use serde::Serialize;
use std::path::Path;

/// File extensions recognised as sprite artwork
pub const ASSET_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// A drawable asset offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    /// Asset category
    #[serde(skip)]
    pub kind: ItemKind,
    /// Asset filename inside the kind's folder
    #[serde(rename = "filename")]
    pub source_id: String,
    /// Title-cased display label
    pub label: String,
}

impl CatalogItem {
    /// Describe an asset file, deriving its label from the filename
    pub fn from_filename(kind: ItemKind, filename: &str) -> Self {
        Self {
            kind,
            source_id: filename.to_string(),
            label: label_from_filename(filename),
        }
    }
}

/// Every flower and prop found in an asset directory
///
/// Serializes as `{"flowers": [{filename, label}], "props": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Flower assets sorted by label
    pub flowers: Vec<CatalogItem>,
    /// Prop assets sorted by label
    pub props: Vec<CatalogItem>,
}

impl Catalog {
    /// List `<root>/flowers` and `<root>/props`
    ///
    /// A missing kind folder simply contributes no items.
    ///
    /// # Errors
    ///
    /// Returns an external service error if `root` is not a directory, or a
    /// file system error if a kind folder cannot be read
    pub fn scan(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(service_error(
                "asset catalog",
                &format!("asset directory '{}' does not exist", root.display()),
            ));
        }

        Ok(Self {
            flowers: scan_kind(root, ItemKind::Flower)?,
            props: scan_kind(root, ItemKind::Prop)?,
        })
    }

    /// Items of one kind
    pub fn items(&self, kind: ItemKind) -> &[CatalogItem] {
        match kind {
            ItemKind::Flower => &self.flowers,
            ItemKind::Prop => &self.props,
        }
    }

    /// Items of `kind` whose label contains `query`, ignoring case
    ///
    /// A blank query matches everything.
    pub fn search(&self, kind: ItemKind, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        self.items(kind)
            .iter()
            .filter(|item| needle.is_empty() || item.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Find an asset by kind and filename
    pub fn find(&self, kind: ItemKind, source_id: &str) -> Option<&CatalogItem> {
        self.items(kind)
            .iter()
            .find(|item| item.source_id == source_id)
    }

    /// Total number of assets
    pub const fn len(&self) -> usize {
        self.flowers.len() + self.props.len()
    }

    /// Whether no assets were found
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turn `teddy-bear.png` into `Teddy Bear`
///
/// Strips a recognised image extension, splits on `-` and `_`, and
/// capitalises each word while lowercasing the rest.
pub fn label_from_filename(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, extension)) if is_asset_extension(extension) => stem,
        _ => filename,
    };

    stem.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_asset_extension(extension: &str) -> bool {
    ASSET_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(extension))
}

fn scan_kind(root: &Path, kind: ItemKind) -> Result<Vec<CatalogItem>> {
    let dir = root.join(kind.folder());
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read_error = |source| BouquetError::FileSystem {
        path: dir.clone(),
        operation: "list assets",
        source,
    };
    let mut items = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        let is_asset = path.is_file()
            && path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(is_asset_extension);
        if !is_asset {
            continue;
        }
        if let Some(filename) = path.file_name().and_then(|s| s.to_str()) {
            items.push(CatalogItem::from_filename(kind, filename));
        }
    }

    items.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.source_id.cmp(&b.source_id))
    });
    Ok(items)
}
