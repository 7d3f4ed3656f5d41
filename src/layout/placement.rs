//! Clustered dome placement with stems converging on the tie point
//!
//! Heads are sampled uniformly inside an ellipse, jittered, scaled (the first
//! flower becomes the larger hero) and rotated so their stems aim at the tie.

use crate::io::configuration::{
    HEAD_CENTER_X, HEAD_CENTER_Y, HEAD_RADIUS_X, HEAD_RADIUS_Y, HEAD_SCALE_MIN, HEAD_SCALE_SPAN,
    HERO_SCALE_MIN, HERO_SCALE_SPAN, JITTER_PX, JITTER_REFERENCE_PX, MAX_SCALE, TIE_POINT_X,
    TIE_POINT_Y,
};
use crate::layout::item::{ItemKind, LayoutItem, PlacedItem};
use crate::layout::random::{RandomSource, SeededRandom};
use std::f64::consts::TAU;

/// Lay out a bouquet reproducibly from a seed
///
/// Identical `items` and `seed` always produce identical placements.
pub fn compute_layout(items: &[LayoutItem], seed: u64) -> Vec<PlacedItem> {
    compute_layout_with(items, &mut SeededRandom::new(seed))
}

/// Lay out a bouquet drawing randomness from `random`
///
/// Each head consumes exactly five draws: angle, radius, x jitter, y jitter, scale.
pub fn compute_layout_with(items: &[LayoutItem], random: &mut impl RandomSource) -> Vec<PlacedItem> {
    let heads = expand_heads(items);

    let mut placed: Vec<PlacedItem> = heads
        .iter()
        .enumerate()
        .map(|(index, (source_id, kind))| {
            let angle = random.next_unit() * TAU;
            let radius = random.next_unit().sqrt();
            let jitter_x = jitter(random.next_unit());
            let jitter_y = jitter(random.next_unit());

            let x = radius.mul_add(HEAD_RADIUS_X * angle.cos(), HEAD_CENTER_X) + jitter_x;
            let y = radius.mul_add(HEAD_RADIUS_Y * angle.sin(), HEAD_CENTER_Y) + jitter_y;

            let is_hero = index == 0 && *kind == ItemKind::Flower;
            let scale = if is_hero {
                random.next_unit().mul_add(HERO_SCALE_SPAN, HERO_SCALE_MIN)
            } else {
                random.next_unit().mul_add(HEAD_SCALE_SPAN, HEAD_SCALE_MIN)
            };

            PlacedItem {
                x,
                y,
                scale: scale.min(MAX_SCALE),
                rotation_degrees: stem_rotation_toward_tie(x, y),
                source_id: (*source_id).to_string(),
                kind: *kind,
            }
        })
        .collect();

    // Heads higher on the canvas are drawn first
    placed.sort_by(|a, b| a.y.total_cmp(&b.y));
    placed
}

/// Rotation in degrees that points a stem hanging from `(x, y)` at the tie point
///
/// Zero means the stem hangs straight down.
pub fn stem_rotation_toward_tie(x: f64, y: f64) -> f64 {
    (TIE_POINT_X - x).atan2(TIE_POINT_Y - y).to_degrees()
}

// Flowers first, then props, each in selection order
fn expand_heads(items: &[LayoutItem]) -> Vec<(&str, ItemKind)> {
    ItemKind::ALL
        .iter()
        .flat_map(|&kind| {
            items
                .iter()
                .filter(move |item| item.kind == kind)
                .flat_map(|item| {
                    std::iter::repeat_n((item.source_id.as_str(), item.kind), item.quantity as usize)
                })
        })
        .collect()
}

fn jitter(unit: f64) -> f64 {
    (unit - 0.5) * 2.0 * JITTER_PX / JITTER_REFERENCE_PX
}
