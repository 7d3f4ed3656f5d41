//! Asynchronous sprite sources

use crate::compose::surface::Sprite;
use crate::io::error::{BouquetError, Result, service_error, validation_error};
use crate::io::image::decode_sprite;
use crate::layout::ItemKind;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetches sprite artwork for a catalog item
#[async_trait]
pub trait SpriteLoader: Send + Sync {
    /// Load and decode the sprite for `source_id` of `kind`
    ///
    /// # Errors
    ///
    /// Returns an error if the sprite is missing or cannot be decoded
    async fn load(&self, kind: ItemKind, source_id: &str) -> Result<Sprite>;
}

/// Loads sprites from `<root>/<flowers|props>/<source_id>`
#[derive(Debug, Clone)]
pub struct DirectorySpriteLoader {
    root: PathBuf,
}

impl DirectorySpriteLoader {
    /// Create a loader rooted at an asset directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset directory this loader reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file a sprite is read from
    ///
    /// # Errors
    ///
    /// Returns a validation error if `source_id` is not a plain file name
    pub fn sprite_path(&self, kind: ItemKind, source_id: &str) -> Result<PathBuf> {
        let is_plain = !source_id.is_empty()
            && !source_id.contains(['/', '\\'])
            && source_id != "."
            && source_id != "..";
        if !is_plain {
            return Err(validation_error(
                "source_id",
                format!("'{source_id}' is not a plain file name"),
            ));
        }
        Ok(self.root.join(kind.folder()).join(source_id))
    }
}

#[async_trait]
impl SpriteLoader for DirectorySpriteLoader {
    async fn load(&self, kind: ItemKind, source_id: &str) -> Result<Sprite> {
        let path = self.sprite_path(kind, source_id)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| BouquetError::FileSystem {
                path: path.clone(),
                operation: "read sprite",
                source,
            })?;
        debug!(path = %path.display(), bytes = bytes.len(), "sprite read");
        decode_sprite(&bytes, &path).map(Sprite::new)
    }
}

/// Serves pre-decoded sprites, missing entries fail to load
#[derive(Debug, Clone, Default)]
pub struct MemorySpriteLoader {
    sprites: HashMap<(ItemKind, String), Sprite>,
}

impl MemorySpriteLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprite, replacing any previous one for the same item
    #[must_use]
    pub fn with_sprite(
        mut self,
        kind: ItemKind,
        source_id: impl Into<String>,
        sprite: Sprite,
    ) -> Self {
        self.sprites.insert((kind, source_id.into()), sprite);
        self
    }
}

#[async_trait]
impl SpriteLoader for MemorySpriteLoader {
    async fn load(&self, kind: ItemKind, source_id: &str) -> Result<Sprite> {
        self.sprites
            .get(&(kind, source_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                service_error("sprite store", &format!("no sprite for {kind}:{source_id}"))
            })
    }
}
