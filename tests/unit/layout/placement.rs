//! Tests for clustered dome placement

#[cfg(test)]
mod tests {
    use bouquet::layout::placement::stem_rotation_toward_tie;
    use bouquet::layout::random::RandomSource;
    use bouquet::layout::{ItemKind, LayoutItem, compute_layout, compute_layout_with};

    /// Replays a fixed list of draws and counts how many were taken
    struct ScriptedRandom {
        values: Vec<f64>,
        taken: usize,
    }

    impl RandomSource for ScriptedRandom {
        fn next_unit(&mut self) -> f64 {
            let value = self.values.get(self.taken).copied().unwrap_or(0.5);
            self.taken += 1;
            value
        }
    }

    fn mixed_items() -> Vec<LayoutItem> {
        vec![
            LayoutItem::new("teddy-bear.png", ItemKind::Prop, 2),
            LayoutItem::new("rose.png", ItemKind::Flower, 3),
            LayoutItem::new("tulip.png", ItemKind::Flower, 1),
        ]
    }

    // Tests identical inputs produce identical layouts
    // Verified by seeding from the clock
    #[test]
    fn test_layout_is_deterministic() {
        let items = mixed_items();
        assert_eq!(compute_layout(&items, 42), compute_layout(&items, 42));
        assert_ne!(compute_layout(&items, 42), compute_layout(&items, 43));
    }

    // Tests the number of heads equals the summed quantities
    // Verified by placing one head per item
    #[test]
    fn test_layout_head_count() {
        let placed = compute_layout(&mixed_items(), 7);
        assert_eq!(placed.len(), 6);
        let flowers = placed.iter().filter(|p| p.kind == ItemKind::Flower).count();
        assert_eq!(flowers, 4);
    }

    // Tests empty input gives an empty layout
    // Verified by always emitting a hero
    #[test]
    fn test_empty_layout() {
        assert!(compute_layout(&[], 42).is_empty());
        assert!(compute_layout(&[LayoutItem::new("rose.png", ItemKind::Flower, 0)], 42).is_empty());
    }

    // Tests positions stay inside the jittered dome for many seeds
    // Verified by doubling the jitter
    #[test]
    fn test_positions_within_bounds() {
        let items = mixed_items();
        for seed in 0..200 {
            for item in compute_layout(&items, seed) {
                assert!((0.26..=0.74).contains(&item.x), "x = {}", item.x);
                assert!((0.14..=0.50).contains(&item.y), "y = {}", item.y);
            }
        }
    }

    // Tests hero and regular scale ranges
    // Verified by applying the hero range to every flower
    #[test]
    fn test_scale_ranges() {
        let items = mixed_items();
        for seed in 0..200 {
            let placed = compute_layout(&items, seed);
            let heroes: Vec<_> = placed.iter().filter(|p| p.scale >= 1.2).collect();
            assert_eq!(heroes.len(), 1, "seed {seed}");
            for item in &placed {
                assert!(item.scale <= 1.35);
                assert!(item.scale >= 0.85);
                if item.scale < 1.2 {
                    assert!(item.scale <= 1.15);
                }
            }
        }
    }

    // Tests a props-only bouquet has no hero
    // Verified by making the first head a hero regardless of kind
    #[test]
    fn test_props_only_has_no_hero() {
        let items = [LayoutItem::new("balloon.png", ItemKind::Prop, 4)];
        for seed in 0..50 {
            assert!(compute_layout(&items, seed).iter().all(|p| p.scale <= 1.15));
        }
    }

    // Tests output is sorted by y ascending
    // Verified by removing the sort
    #[test]
    fn test_sorted_by_y() {
        let placed = compute_layout(&mixed_items(), 99);
        assert!(placed.windows(2).all(|pair| match pair {
            [a, b] => a.y <= b.y,
            _ => true,
        }));
    }

    // Tests the rose and teddy bear bouquet for seed 42
    // Verified by placing props before flowers
    #[test]
    fn test_rose_and_teddy_seed_42() {
        let items = [
            LayoutItem::new("rose.png", ItemKind::Flower, 1),
            LayoutItem::new("teddy-bear.png", ItemKind::Prop, 1),
        ];
        let placed = compute_layout(&items, 42);
        assert_eq!(placed.len(), 2);

        let rose = placed
            .iter()
            .find(|p| p.kind == ItemKind::Flower)
            .expect("rose placed");
        let teddy = placed
            .iter()
            .find(|p| p.kind == ItemKind::Prop)
            .expect("teddy placed");
        assert_eq!(rose.source_id, "rose.png");
        assert_eq!(teddy.source_id, "teddy-bear.png");
        assert!(rose.scale >= 1.2);
        assert!(teddy.scale < 1.2);
    }

    // Tests five draws per head in angle, radius, jitter x, jitter y, scale order
    // Verified by drawing scale before jitter
    #[test]
    fn test_draw_order_per_head() {
        let items = [LayoutItem::new("rose.png", ItemKind::Flower, 1)];
        let mut random = ScriptedRandom {
            values: vec![0.0, 1.0, 0.5, 0.5, 0.0],
            taken: 0,
        };
        let placed = compute_layout_with(&items, &mut random);
        assert_eq!(random.taken, 5);

        let head = placed.first().expect("one head");
        // angle 0 and radius 1 put the head on the right edge of the dome
        assert!((head.x - 0.72).abs() < 1e-9);
        assert!((head.y - 0.32).abs() < 1e-9);
        assert!((head.scale - 1.2).abs() < 1e-9);
    }

    // Tests the stem rotation formula
    // Verified by swapping the atan2 arguments
    #[test]
    fn test_stem_rotation() {
        assert!(stem_rotation_toward_tie(0.5, 0.3).abs() < 1e-9);
        let left = stem_rotation_toward_tie(0.3, 0.52);
        assert!((left - 45.0).abs() < 1e-9);
        let right = stem_rotation_toward_tie(0.7, 0.52);
        assert!((right + 45.0).abs() < 1e-9);
    }

    // Tests every placed item carries the rotation for its position
    // Verified by storing radians
    #[test]
    fn test_rotation_matches_position() {
        for item in compute_layout(&mixed_items(), 5) {
            let expected = stem_rotation_toward_tie(item.x, item.y);
            assert!((item.rotation_degrees - expected).abs() < 1e-12);
        }
    }
}
