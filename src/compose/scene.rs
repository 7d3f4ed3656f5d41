//! Scene planning: placed heads become an ordered list of draw commands
//!
//! The order is fixed: background, shadow, wrap, stems, ribbon, then one
//! sprite per head in layout order.

use crate::compose::surface::{Point, RasterSurface, SpritePlacement};
use crate::io::configuration::{
    BACKGROUND_RGBA, BASE_SIZE_FRACTION, RIBBON_KNOT_RGBA, RIBBON_RGBA, SHADOW_RGBA,
    STEM_STAGGER_PX, STEM_WIDTH_PX, TIE_POINT_X, TIE_POINT_Y, WRAP_BASE_Y, WRAP_RGBA,
    WRAP_TAIL_RGBA,
};
use crate::layout::PlacedItem;
use image::Rgba;

// Shape proportions relative to the canvas
const SHADOW_CENTER_Y: f32 = 0.88;
const SHADOW_RADIUS_X: f32 = 0.35;
const SHADOW_RADIUS_Y: f32 = 0.04;
const WRAP_TOP_Y: f32 = 0.40;
const WRAP_TOP_HALF_WIDTH: f32 = 0.30;
const WRAP_NECK_HALF_WIDTH: f32 = 0.035;
const WRAP_BASE_HALF_WIDTH: f32 = 0.06;
const RIBBON_HALF_WIDTH: f32 = 0.07;
const RIBBON_HALF_HEIGHT: f32 = 0.015;
const BOW_LOBE_OFFSET: f32 = 0.065;
const BOW_LOBE_RADIUS_X: f32 = 0.055;
const BOW_LOBE_RADIUS_Y: f32 = 0.03;
const BOW_KNOT_RADIUS: f32 = 0.022;

/// Filled axis-aligned ellipse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Centre in pixels
    pub center: Point,
    /// Horizontal radius in pixels
    pub radius_x: f32,
    /// Vertical radius in pixels
    pub radius_y: f32,
    /// Fill colour
    pub color: Rgba<u8>,
}

/// One stem curving from a head down to the tie point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stem {
    /// Head position
    pub from: Point,
    /// Quadratic control point
    pub control: Point,
    /// Tie point
    pub to: Point,
    /// Stroke colour, chosen by item kind
    pub color: Rgba<u8>,
}

/// A single drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Flood the canvas
    Background(Rgba<u8>),
    /// Soft ellipse the bouquet stands on
    Shadow(Ellipse),
    /// Paper cone narrowing into the tie point plus the wrapped tail below it
    Wrap {
        /// Cone from the top band down to the neck
        cone: [Point; 4],
        /// Bundle from the neck down to the wrap base
        tail: [Point; 4],
    },
    /// Stem or prop stick
    Stem(Stem),
    /// Band around the tie point and its three-lobe bow
    Ribbon {
        /// Band quadrilateral
        band: [Point; 4],
        /// Left loop, right loop, centre knot
        lobes: [Ellipse; 3],
    },
    /// Head sprite of the placed item at `index`
    Sprite {
        /// Position of the item in the layout
        index: usize,
        /// Drawing geometry
        placement: SpritePlacement,
    },
}

impl DrawCommand {
    /// Apply a vector command to `surface`
    ///
    /// Sprite commands need loaded artwork and are left to the compositor;
    /// returns `false` for them.
    pub fn apply_vector(&self, surface: &mut (impl RasterSurface + ?Sized)) -> bool {
        match self {
            Self::Background(color) => surface.fill(*color),
            Self::Shadow(ellipse) => fill_ellipse(surface, ellipse),
            Self::Wrap { cone, tail } => {
                surface.fill_polygon(cone, Rgba(WRAP_RGBA));
                surface.fill_polygon(tail, Rgba(WRAP_TAIL_RGBA));
            }
            Self::Stem(stem) => surface.stroke_quadratic(
                stem.from,
                stem.control,
                stem.to,
                STEM_WIDTH_PX,
                stem.color,
            ),
            Self::Ribbon { band, lobes } => {
                surface.fill_polygon(band, Rgba(RIBBON_RGBA));
                for lobe in lobes {
                    fill_ellipse(surface, lobe);
                }
            }
            Self::Sprite { .. } => return false,
        }
        true
    }
}

fn fill_ellipse(surface: &mut (impl RasterSurface + ?Sized), ellipse: &Ellipse) {
    surface.fill_ellipse(ellipse.center, ellipse.radius_x, ellipse.radius_y, ellipse.color);
}

/// Plan every draw for `placed` on a `width` x `height` canvas
///
/// An empty layout yields only the background.
pub fn plan_scene(placed: &[PlacedItem], width: u32, height: u32) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Background(Rgba(BACKGROUND_RGBA))];
    if placed.is_empty() {
        return commands;
    }

    let w = width as f32;
    let h = height as f32;
    let tie = Point::new(TIE_POINT_X as f32 * w, TIE_POINT_Y as f32 * h);

    commands.push(DrawCommand::Shadow(Ellipse {
        center: Point::new(w / 2.0, SHADOW_CENTER_Y * h),
        radius_x: SHADOW_RADIUS_X * w,
        radius_y: SHADOW_RADIUS_Y * h,
        color: Rgba(SHADOW_RGBA),
    }));
    commands.push(wrap_command(tie, w, h));
    commands.extend(
        placed
            .iter()
            .enumerate()
            .map(|(index, item)| DrawCommand::Stem(stem_for(item, index, tie, w, h))),
    );
    commands.push(ribbon_command(tie, w, h));

    let base_size = w.min(h) * BASE_SIZE_FRACTION;
    commands.extend(placed.iter().enumerate().map(|(index, item)| {
        let size = base_size * item.scale as f32;
        let head_ratio = item.kind.head_ratio();
        DrawCommand::Sprite {
            index,
            placement: SpritePlacement {
                anchor: Point::new(item.x as f32 * w, item.y as f32 * h),
                width: size,
                height: size * head_ratio,
                rotation_degrees: item.rotation_degrees as f32,
                head_ratio,
            },
        }
    }));

    commands
}

/// Stem from the head at `index` to the tie point
///
/// Control points are staggered by `(index mod 3 - 1) * 12px` so neighbouring
/// stems fan out instead of overlapping.
pub fn stem_for(item: &PlacedItem, index: usize, tie: Point, w: f32, h: f32) -> Stem {
    let head = Point::new(item.x as f32 * w, item.y as f32 * h);
    let mid = head.midpoint(tie);
    let stagger = ((index % 3) as f32 - 1.0) * STEM_STAGGER_PX;
    Stem {
        from: head,
        control: Point::new(mid.x + stagger, mid.y),
        to: tie,
        color: Rgba(item.kind.stem_rgba()),
    }
}

fn wrap_command(tie: Point, w: f32, h: f32) -> DrawCommand {
    let top_y = WRAP_TOP_Y * h;
    let base_y = WRAP_BASE_Y as f32 * h;
    let neck = WRAP_NECK_HALF_WIDTH * w;
    let top = WRAP_TOP_HALF_WIDTH * w;
    let base = WRAP_BASE_HALF_WIDTH * w;

    DrawCommand::Wrap {
        cone: [
            Point::new(tie.x - top, top_y),
            Point::new(tie.x + top, top_y),
            Point::new(tie.x + neck, tie.y),
            Point::new(tie.x - neck, tie.y),
        ],
        tail: [
            Point::new(tie.x - neck, tie.y),
            Point::new(tie.x + neck, tie.y),
            Point::new(tie.x + base, base_y),
            Point::new(tie.x - base, base_y),
        ],
    }
}

fn ribbon_command(tie: Point, w: f32, h: f32) -> DrawCommand {
    let half_w = RIBBON_HALF_WIDTH * w;
    let half_h = RIBBON_HALF_HEIGHT * h;
    let lobe = |dx: f32| Ellipse {
        center: Point::new(tie.x + dx, tie.y),
        radius_x: BOW_LOBE_RADIUS_X * w,
        radius_y: BOW_LOBE_RADIUS_Y * h,
        color: Rgba(RIBBON_RGBA),
    };
    let knot_radius = BOW_KNOT_RADIUS * w.min(h);

    DrawCommand::Ribbon {
        band: [
            Point::new(tie.x - half_w, tie.y - half_h),
            Point::new(tie.x + half_w, tie.y - half_h),
            Point::new(tie.x + half_w, tie.y + half_h),
            Point::new(tie.x - half_w, tie.y + half_h),
        ],
        lobes: [
            lobe(-BOW_LOBE_OFFSET * w),
            lobe(BOW_LOBE_OFFSET * w),
            Ellipse {
                center: tie,
                radius_x: knot_radius,
                radius_y: knot_radius,
                color: Rgba(RIBBON_KNOT_RGBA),
            },
        ],
    }
}
