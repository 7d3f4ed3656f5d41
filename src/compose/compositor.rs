//! Render pipeline applying planned draw commands with sequential sprite loads

use crate::compose::encode::{EncodedImage, OutputFormat, encode};
use crate::compose::scene::{DrawCommand, plan_scene};
use crate::compose::sprites::SpriteLoader;
use crate::compose::surface::{PixmapSurface, RasterSurface};
use crate::io::configuration::DEFAULT_CANVAS_SIZE;
use crate::io::error::Result;
use crate::layout::PlacedItem;
use image::RgbaImage;
use tracing::{debug, warn};

/// A sprite that could not be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSprite {
    /// Position of the item in the layout
    pub index: usize,
    /// Asset filename of the item
    pub source_id: String,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a single render pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Number of vector commands applied
    pub vector_commands: usize,
    /// Layout indices whose sprites were drawn, in draw order
    pub drawn: Vec<usize>,
    /// Sprites that failed to load or draw
    pub skipped: Vec<SkippedSprite>,
}

impl RenderReport {
    /// Number of sprite loads attempted
    pub const fn sprites_attempted(&self) -> usize {
        self.drawn.len() + self.skipped.len()
    }

    /// Whether every sprite made it onto the canvas
    pub const fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A rendered canvas and how it went
#[derive(Debug, Clone)]
pub struct Rendering {
    /// Straight-alpha canvas pixels
    pub image: RgbaImage,
    /// Draw statistics
    pub report: RenderReport,
}

/// Composites placed items onto a canvas
///
/// Sprites are awaited one at a time in layout order so lower heads always
/// land on top of higher ones.
#[derive(Debug, Clone)]
pub struct Compositor<L> {
    loader: L,
    width: u32,
    height: u32,
}

impl<L: SpriteLoader> Compositor<L> {
    /// Create a compositor producing default-sized square canvases
    pub const fn new(loader: L) -> Self {
        Self {
            loader,
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
        }
    }

    /// Change the canvas size
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Canvas size as `(width, height)`
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sprite source in use
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Draw `placed` onto an existing surface
    ///
    /// Missing or undecodable sprites are skipped and reported; the rest of
    /// the bouquet is still drawn.
    pub async fn render_onto<S>(&self, placed: &[PlacedItem], surface: &mut S) -> RenderReport
    where
        S: RasterSurface + Send + ?Sized,
    {
        let commands = plan_scene(placed, surface.width(), surface.height());
        let mut report = RenderReport::default();

        for command in &commands {
            if command.apply_vector(&mut *surface) {
                report.vector_commands += 1;
                continue;
            }
            let DrawCommand::Sprite { index, placement } = command else {
                continue;
            };
            let Some(item) = placed.get(*index) else {
                continue;
            };

            let outcome = match self.loader.load(item.kind, &item.source_id).await {
                Ok(sprite) => surface.draw_sprite(&sprite, placement),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => report.drawn.push(*index),
                Err(e) => {
                    warn!(index = *index, source_id = %item.source_id, error = %e, "skipping sprite");
                    report.skipped.push(SkippedSprite {
                        index: *index,
                        source_id: item.source_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            vector_commands = report.vector_commands,
            drawn = report.drawn.len(),
            skipped = report.skipped.len(),
            "render complete"
        );
        report
    }

    /// Render `placed` onto a fresh canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas cannot be allocated
    pub async fn render(&self, placed: &[PlacedItem]) -> Result<Rendering> {
        let mut surface = PixmapSurface::new(self.width, self.height)?;
        let report = self.render_onto(placed, &mut surface).await;
        Ok(Rendering {
            image: surface.into_image(),
            report,
        })
    }

    /// Render and encode `placed`
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas cannot be allocated or encoding fails
    pub async fn render_encoded(
        &self,
        placed: &[PlacedItem],
        format: OutputFormat,
    ) -> Result<(EncodedImage, RenderReport)> {
        let rendering = self.render(placed).await?;
        let encoded = encode(&rendering.image, format)?;
        Ok((encoded, rendering.report))
    }
}
