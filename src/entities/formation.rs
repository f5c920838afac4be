/// Hand-tuned row sizes for small formations, indexed by `count - 1`
const FORMATION_PATTERNS: [&[usize]; 9] = [
    &[1],
    &[2],
    &[1, 2],
    &[2, 2],
    &[2, 3],
    &[3, 3],
    &[1, 2, 4],
    &[2, 3, 3],
    &[3, 3, 3],
];

/// Offsets from the formation center for `count` units.
///
/// Each row is centered on x = 0, odd rows are staggered by half a spacing and row `r` sits at
/// `-r * spacing`. Counts beyond the tuned table grow a triangle: row `r` holds `r + 1` units.
pub fn formation_offsets(count: usize, spacing: f32) -> Vec<(f32, f32)> {
    let mut result = Vec::with_capacity(count);

    if let Some(pattern) = count.checked_sub(1).and_then(|i| FORMATION_PATTERNS.get(i)) {
        for (row, &units_in_row) in pattern.iter().enumerate() {
            push_row(&mut result, row, units_in_row, spacing);
        }
    } else {
        let mut units_left = count;
        let mut row = 0;
        while units_left > 0 {
            let units_in_row = (row + 1).min(units_left);
            push_row(&mut result, row, units_in_row, spacing);
            units_left -= units_in_row;
            row += 1;
        }
    }

    result
}

fn push_row(result: &mut Vec<(f32, f32)>, row: usize, units_in_row: usize, spacing: f32) {
    let row_y = -(row as f32) * spacing;
    let stagger = if row % 2 == 1 { spacing / 2.0 } else { 0.0 };
    let half_width = (units_in_row as f32 - 1.0) / 2.0;
    for i in 0..units_in_row {
        let x = (i as f32 - half_width) * spacing + stagger;
        result.push((x, row_y));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub x: f32,
    pub y: f32,
}

/// The player's squad. Units only exist as part of a layout and are rebuilt wholesale whenever
/// the unit count changes.
#[derive(Debug, Clone)]
pub struct Formation {
    pub units: Vec<Unit>,
    /// Row 0 height (the player line)
    pub anchor_y: f32,
    pub spacing: f32,
}

impl Formation {
    pub fn new(count: usize, center_x: f32, anchor_y: f32, spacing: f32) -> Self {
        let mut formation = Self {
            units: Vec::new(),
            anchor_y,
            spacing,
        };
        formation.recompute(count, center_x);
        formation
    }

    /// Rebuild the layout for `count` units around `center_x`
    pub fn recompute(&mut self, count: usize, center_x: f32) {
        self.units = formation_offsets(count, self.spacing)
            .into_iter()
            .map(|(dx, dy)| Unit {
                x: center_x + dx,
                y: self.anchor_y + dy,
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Mean x of all units
    pub fn center_x(&self) -> Option<f32> {
        if self.units.is_empty() {
            return None;
        }
        let sum: f32 = self.units.iter().map(|u| u.x).sum();
        Some(sum / self.units.len() as f32)
    }

    /// Ease the whole squad toward `target_x`, frame-rate normalized to 60 fps.
    /// Within 0.01 of the target the squad snaps onto it.
    pub fn ease_toward(&mut self, target_x: f32, move_speed: f32, delta_secs: f32) {
        let Some(center_x) = self.center_x() else {
            return;
        };
        let dx = target_x - center_x;
        let step = if dx.abs() > 0.01 {
            dx * move_speed * delta_secs * 60.0
        } else {
            dx
        };
        for unit in &mut self.units {
            unit.x += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sizes(offsets: &[(f32, f32)], spacing: f32) -> Vec<usize> {
        let mut sizes: Vec<usize> = Vec::new();
        for &(_, y) in offsets {
            let row = (-y / spacing).round() as usize;
            if sizes.len() <= row {
                sizes.resize(row + 1, 0);
            }
            sizes[row] += 1;
        }
        sizes
    }

    #[test]
    fn test_single_unit_at_origin() {
        assert_eq!(formation_offsets(1, 1.2), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_empty_formation() {
        assert!(formation_offsets(0, 1.2).is_empty());
    }

    #[test]
    fn test_seven_units_use_tuned_rows() {
        let offsets = formation_offsets(7, 1.0);
        assert_eq!(row_sizes(&offsets, 1.0), vec![1, 2, 4]);
    }

    #[test]
    fn test_odd_rows_are_staggered() {
        let offsets = formation_offsets(4, 2.0);
        // Row 0: two units centered on 0
        assert_eq!(offsets[0], (-1.0, 0.0));
        assert_eq!(offsets[1], (1.0, 0.0));
        // Row 1: shifted right by half a spacing
        assert_eq!(offsets[2], (0.0, -2.0));
        assert_eq!(offsets[3], (2.0, -2.0));
    }

    #[test]
    fn test_large_counts_grow_triangle() {
        let offsets = formation_offsets(12, 1.0);
        assert_eq!(row_sizes(&offsets, 1.0), vec![1, 2, 3, 4, 2]);
    }

    #[test]
    fn test_formation_recompute() {
        let mut formation = Formation::new(1, 0.0, -8.0, 1.2);
        assert_eq!(formation.len(), 1);
        assert_eq!(formation.units[0], Unit { x: 0.0, y: -8.0 });

        formation.recompute(3, 1.0);
        assert_eq!(formation.len(), 3);
        assert!(formation.units.iter().all(|u| u.y <= -8.0));
    }

    #[test]
    fn test_ease_toward_normalizes_to_60fps() {
        let mut formation = Formation::new(1, 0.0, -8.0, 1.2);
        formation.ease_toward(1.0, 0.2, 1.0 / 60.0);
        assert!((formation.units[0].x - 0.2).abs() < 1e-5);

        let mut formation = Formation::new(1, 0.0, -8.0, 1.2);
        formation.ease_toward(1.0, 0.2, 1.0 / 30.0);
        assert!((formation.units[0].x - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_ease_snaps_when_close() {
        let mut formation = Formation::new(2, 0.0, -8.0, 1.2);
        formation.ease_toward(0.005, 0.2, 1.0 / 60.0);
        let center = formation.center_x().unwrap();
        assert!((center - 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_empty_formation_has_no_center() {
        let mut formation = Formation::new(0, 0.0, -8.0, 1.2);
        assert!(formation.center_x().is_none());
        formation.ease_toward(1.0, 0.2, 1.0 / 60.0);
        assert!(formation.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_offset_count_matches(count in 1usize..=20, spacing in 0.5f32..3.0) {
                let offsets = formation_offsets(count, spacing);
                prop_assert_eq!(offsets.len(), count);
            }

            #[test]
            fn test_offsets_are_deterministic(count in 1usize..=20, spacing in 0.5f32..3.0) {
                prop_assert_eq!(formation_offsets(count, spacing), formation_offsets(count, spacing));
            }

            #[test]
            fn test_rows_stack_downward(count in 1usize..=20) {
                for (_, y) in formation_offsets(count, 1.2) {
                    prop_assert!(y <= 0.0);
                }
            }
        }
    }
}
