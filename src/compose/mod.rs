//! Compositing placed bouquet items into raster images

/// Render pipeline and render reports
pub mod compositor;
/// PNG/JPEG encoding and data URLs
pub mod encode;
/// Ordered draw command planning
pub mod scene;
/// Asynchronous sprite sources
pub mod sprites;
/// Raster surface abstraction
pub mod surface;

pub use compositor::{Compositor, RenderReport, Rendering};
pub use encode::{EncodedImage, OutputFormat};
pub use sprites::{DirectorySpriteLoader, MemorySpriteLoader, SpriteLoader};
pub use surface::{PixmapSurface, RasterSurface, Sprite};
