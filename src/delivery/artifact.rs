//! Persisting delivered bouquets under unique filenames

use crate::compose::encode::EncodedImage;
use crate::delivery::rate_limit::unix_millis;
use crate::io::configuration::{ARTIFACT_PREFIX, ARTIFACT_SUFFIX_LEN};
use crate::io::error::Result;
use crate::io::image::write_image_file;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::info;

/// Build `bouquet-<unix_ms>-<6 base36 chars>.<extension>`
pub fn artifact_filename(unix_ms: u64, rng: &mut impl Rng, extension: &str) -> String {
    let suffix: String = (0..ARTIFACT_SUFFIX_LEN)
        .filter_map(|_| char::from_digit(rng.random_range(0..36), 36))
        .collect();
    format!("{ARTIFACT_PREFIX}-{unix_ms}-{suffix}.{extension}")
}

/// A bouquet image written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Filename inside the artifact directory
    pub filename: String,
    /// Full path of the written file
    pub path: PathBuf,
}

/// Directory that delivered bouquet images are written to
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store writing into `dir`, created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory artifacts are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `image` under a fresh unique filename
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written
    pub fn store(&self, image: &EncodedImage) -> Result<StoredArtifact> {
        let filename = artifact_filename(
            unix_millis(),
            &mut rand::rng(),
            image.format().extension(),
        );
        let path = self.dir.join(&filename);
        write_image_file(image, &path)?;
        info!(path = %path.display(), bytes = image.bytes().len(), "bouquet artifact stored");
        Ok(StoredArtifact { filename, path })
    }
}
