//! Raster surface abstraction and its tiny-skia backed implementation

use crate::io::error::{Result, render_error};
use image::{Rgba, RgbaImage};
use tiny_skia::{
    FillRule, FilterQuality, IntSize, LineCap, Paint, PathBuilder, Pixmap, PixmapPaint, Rect,
    Stroke, Transform,
};

/// A position on the surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal offset from the left edge
    pub x: f32,
    /// Vertical offset from the top edge
    pub y: f32,
}

impl Point {
    /// Create a point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(
            (other.x - self.x).mul_add(0.5, self.x),
            (other.y - self.y).mul_add(0.5, self.y),
        )
    }
}

/// Decoded sprite artwork, head on top and stem art below
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    /// Wrap a decoded image
    pub const fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Pixel width of the source artwork
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height of the source artwork
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the source artwork
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Number of source rows, from the top, that make up the head
    pub fn head_rows(&self, head_ratio: f32) -> u32 {
        ((self.height() as f32 * head_ratio).round() as u32).clamp(1, self.height().max(1))
    }
}

/// Where and how large a sprite head is drawn
///
/// The head's bottom centre sits on `anchor` before rotation, so rotating
/// swings the head around the point its stem leaves from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePlacement {
    /// Head position on the surface
    pub anchor: Point,
    /// Drawn width in pixels
    pub width: f32,
    /// Drawn height in pixels
    pub height: f32,
    /// Clockwise rotation around the anchor
    pub rotation_degrees: f32,
    /// Fraction of the source image, from the top, that is sampled
    pub head_ratio: f32,
}

/// A mutable raster the compositor draws onto
///
/// Colours are straight (non-premultiplied) RGBA.
pub trait RasterSurface {
    /// Surface width in pixels
    fn width(&self) -> u32;

    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Replace every pixel with `color`
    fn fill(&mut self, color: Rgba<u8>);

    /// Fill an axis-aligned ellipse
    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Rgba<u8>);

    /// Fill a closed polygon
    fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>);

    /// Stroke a quadratic Bézier curve with round caps
    fn stroke_quadratic(
        &mut self,
        from: Point,
        control: Point,
        to: Point,
        width: f32,
        color: Rgba<u8>,
    );

    /// Draw the head portion of a sprite
    ///
    /// # Errors
    ///
    /// Returns an error if the sprite cannot be sampled or transformed
    fn draw_sprite(&mut self, sprite: &Sprite, placement: &SpritePlacement) -> Result<()>;
}

/// Anti-aliased surface backed by a tiny-skia pixmap
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a transparent surface
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the allocation fails
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| render_error(&format!("cannot allocate {width}x{height} surface")))?;
        Ok(Self { pixmap })
    }

    /// Convert the surface into a straight-alpha RGBA image
    pub fn into_image(self) -> RgbaImage {
        let mut image = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (pixel, color) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let straight = color.demultiply();
            *pixel = Rgba([
                straight.red(),
                straight.green(),
                straight.blue(),
                straight.alpha(),
            ]);
        }
        image
    }

    fn paint(color: Rgba<u8>) -> Paint<'static> {
        let [r, g, b, a] = color.0;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }
}

impl RasterSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill(&mut self, color: Rgba<u8>) {
        let [r, g, b, a] = color.0;
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Rgba<u8>) {
        let oval = Rect::from_xywh(
            center.x - radius_x,
            center.y - radius_y,
            radius_x * 2.0,
            radius_y * 2.0,
        )
        .and_then(PathBuilder::from_oval);
        if let Some(path) = oval {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        let mut builder = PathBuilder::new();
        let mut corners = points.iter();
        let Some(first) = corners.next() else {
            return;
        };
        builder.move_to(first.x, first.y);
        for corner in corners {
            builder.line_to(corner.x, corner.y);
        }
        builder.close();

        if let Some(path) = builder.finish() {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_quadratic(
        &mut self,
        from: Point,
        control: Point,
        to: Point,
        width: f32,
        color: Rgba<u8>,
    ) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.quad_to(control.x, control.y, to.x, to.y);

        if let Some(path) = builder.finish() {
            let stroke = Stroke {
                width,
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &Self::paint(color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, placement: &SpritePlacement) -> Result<()> {
        let rows = sprite.head_rows(placement.head_ratio);
        let head = head_pixmap(sprite.image(), rows)
            .ok_or_else(|| render_error(&"sprite has no drawable pixels"))?;

        let transform = Transform::from_translate(placement.anchor.x, placement.anchor.y)
            .pre_concat(Transform::from_rotate(placement.rotation_degrees))
            .pre_translate(-placement.width / 2.0, -placement.height)
            .pre_scale(
                placement.width / head.width() as f32,
                placement.height / head.height() as f32,
            );

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, head.as_ref(), &paint, transform, None);
        Ok(())
    }
}

// Premultiplied copy of the top `rows` rows of `image`
fn head_pixmap(image: &RgbaImage, rows: u32) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), rows.min(image.height()))?;
    let byte_len = size.width() as usize * size.height() as usize * 4;
    let data = image
        .as_raw()
        .chunks_exact(4)
        .flat_map(premultiply)
        .take(byte_len)
        .collect();
    Pixmap::from_vec(data, size)
}

fn premultiply(pixel: &[u8]) -> [u8; 4] {
    match *pixel {
        [r, g, b, a] => {
            let scale = |channel: u8| ((u16::from(channel) * u16::from(a) + 127) / 255) as u8;
            [scale(r), scale(g), scale(b), a]
        }
        _ => [0; 4],
    }
}
