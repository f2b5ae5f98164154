//! Stroke application to a heightfield
//!
//! Footprint selection is an index window computed straight from world
//! coordinates ([`HeightField::sample_window`]), so a stroke costs the
//! brush area, not a full-grid scan. Every touched sample is clamped and
//! the field version bumps once per stroke.

use crate::terrain::heightfield::HeightField;
use super::stroke::{BrushMode, BrushStroke};

/// Per-tick blend rate for Flatten and Smooth. Convergence toward the
/// target compounds multiplicatively across ticks and never crosses it.
pub const BLEND_RATE: f32 = 0.1;

/// Quadratic distance falloff: 1 at the center, 0 at the rim and beyond
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if distance >= radius {
        return 0.0;
    }
    1.0 - (distance / radius) * (distance / radius)
}

/// Apply one brush stroke to the field.
///
/// Touches every sample within `stroke.radius` of `stroke.center` in the
/// XZ plane (elevation ignored), weighting each by quadratic falloff
/// times stroke strength. Returns the number of samples touched; zero
/// means the footprint missed the grid and the field is unchanged.
pub fn apply_stroke(field: &mut HeightField, stroke: &BrushStroke) -> usize {
    debug_assert!(stroke.radius > 0.0);
    debug_assert!((0.0..=1.0).contains(&stroke.strength));

    let Some(((row0, row1), (col0, col1))) = field.sample_window(stroke.center, stroke.radius)
    else {
        return 0;
    };

    let center = stroke.center;
    let radius_sq = stroke.radius * stroke.radius;
    let max_height = field.max_height();
    let side = field.samples_per_side();

    // Smooth pass A: unweighted mean over the footprint
    let target = match stroke.mode {
        BrushMode::Smooth => {
            let mut sum = 0.0;
            let mut count = 0usize;
            for row in row0..=row1 {
                for col in col0..=col1 {
                    let (x, z) = field.sample_to_world(row, col);
                    let dx = x - center.x;
                    let dz = z - center.y;
                    if dx * dx + dz * dz > radius_sq {
                        continue;
                    }
                    sum += field.samples()[row * side + col];
                    count += 1;
                }
            }
            if count == 0 {
                return 0;
            }
            sum / count as f32
        }
        BrushMode::Flatten => stroke.target_height,
        BrushMode::Raise | BrushMode::Lower => 0.0,
    };

    let resolution = field.resolution() as f32;
    let size = field.size();
    let mode = stroke.mode;
    let strength = stroke.strength;

    let mut touched = 0usize;
    let samples = field.samples_mut();
    for row in row0..=row1 {
        let z = (row as f32 / resolution - 0.5) * size;
        for col in col0..=col1 {
            let x = (col as f32 / resolution - 0.5) * size;
            let dx = x - center.x;
            let dz = z - center.y;
            let dist_sq = dx * dx + dz * dz;
            if dist_sq > radius_sq {
                continue;
            }

            let fall = 1.0 - dist_sq / radius_sq;
            let influence = fall * strength;

            let idx = row * side + col;
            let h = samples[idx];
            let next = match mode {
                BrushMode::Raise => h + influence,
                BrushMode::Lower => h - influence,
                BrushMode::Flatten | BrushMode::Smooth => {
                    h + (target - h) * (influence * BLEND_RATE)
                }
            };
            samples[idx] = next.clamp(-max_height, max_height);
            touched += 1;
        }
    }

    if touched > 0 {
        field.bump_version();
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn flat_field() -> HeightField {
        // R=2, size=2: samples at world -1, 0, 1 on each axis
        HeightField::new(2, 2.0, 10.0)
    }

    #[test]
    fn test_falloff_shape() {
        assert_eq!(falloff(0.0, 1.5), 1.0);
        assert_eq!(falloff(1.5, 1.5), 0.0);
        assert_eq!(falloff(2.0, 1.5), 0.0);
        // Halfway out: 1 - 0.25
        assert!((falloff(0.75, 1.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_raise_center_and_corners() {
        let mut field = flat_field();
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::ZERO, 1.5, 1.0);
        let touched = apply_stroke(&mut field, &stroke);
        assert_eq!(touched, 9);

        // Center gets the full unit lift
        assert!((field.get(1, 1).unwrap() - 1.0).abs() < 1e-6);

        // Corners sit at distance sqrt(2) < 1.5: falloff 1 - 2/2.25
        let expected = 1.0 - 2.0 / 2.25;
        assert!((field.get(0, 0).unwrap() - expected).abs() < 1e-5);
        assert!((field.get(2, 2).unwrap() - expected).abs() < 1e-5);

        // Edge midpoints at distance 1: falloff 1 - 1/2.25
        let expected_edge = 1.0 - 1.0 / 2.25;
        assert!((field.get(0, 1).unwrap() - expected_edge).abs() < 1e-5);
    }

    #[test]
    fn test_rim_samples_untouched_in_value() {
        // Radius exactly 1: edge midpoints sit on the rim, falloff 0
        let mut field = flat_field();
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::ZERO, 1.0, 1.0);
        apply_stroke(&mut field, &stroke);

        assert!((field.get(1, 1).unwrap() - 1.0).abs() < 1e-6);
        assert_eq!(field.get(0, 1).unwrap(), 0.0);
        assert_eq!(field.get(1, 0).unwrap(), 0.0);
        // Corners outside the radius entirely
        assert_eq!(field.get(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_raise_then_lower_restores() {
        let mut field = flat_field();
        field.fill(|x, z| (x + z) * 0.5);
        let before: Vec<f32> = field.samples().to_vec();

        let raise = BrushStroke::new(BrushMode::Raise, Vec2::new(0.3, -0.2), 1.2, 0.7);
        let lower = BrushStroke::new(BrushMode::Lower, Vec2::new(0.3, -0.2), 1.2, 0.7);
        apply_stroke(&mut field, &raise);
        apply_stroke(&mut field, &lower);

        for (a, b) in before.iter().zip(field.samples()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_strokes_compound_across_ticks() {
        let mut field = flat_field();
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::ZERO, 1.5, 1.0);
        apply_stroke(&mut field, &stroke);
        apply_stroke(&mut field, &stroke);
        assert!((field.get(1, 1).unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_after_stroke() {
        let mut field = HeightField::new(2, 2.0, 1.5);
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::ZERO, 1.5, 1.0);
        for _ in 0..5 {
            apply_stroke(&mut field, &stroke);
        }
        let (min, max) = field.min_max();
        assert!(min >= -1.5 && max <= 1.5);
        assert_eq!(field.get(1, 1).unwrap(), 1.5);
    }

    #[test]
    fn test_flatten_converges_without_crossing() {
        let mut field = flat_field();
        field.fill(|_, _| 5.0);
        let stroke =
            BrushStroke::new(BrushMode::Flatten, Vec2::ZERO, 3.0, 1.0).with_target(2.0);

        let mut prev = field.get(1, 1).unwrap();
        for _ in 0..50 {
            apply_stroke(&mut field, &stroke);
            let h = field.get(1, 1).unwrap();
            // Monotone approach from above, never crossing the target
            assert!(h <= prev + 1e-6);
            assert!(h >= 2.0);
            prev = h;
        }
        // One tick never jumps straight to the target
        assert!(prev > 2.0);
        assert!(prev < 2.5);

        // And from below
        let mut field = flat_field();
        field.fill(|_, _| -1.0);
        apply_stroke(&mut field, &stroke);
        let h = field.get(1, 1).unwrap();
        assert!(h > -1.0 && h < 2.0);
    }

    #[test]
    fn test_smooth_uniform_field_fixed_point() {
        let mut field = flat_field();
        field.fill(|_, _| 3.0);
        let stroke = BrushStroke::new(BrushMode::Smooth, Vec2::ZERO, 2.0, 1.0);

        for _ in 0..10 {
            apply_stroke(&mut field, &stroke);
        }
        assert!(field.samples().iter().all(|&h| (h - 3.0).abs() < 1e-6));
    }

    #[test]
    fn test_smooth_contracts_toward_mean() {
        let mut field = flat_field();
        field.set(1, 1, 9.0).unwrap();
        let stroke = BrushStroke::new(BrushMode::Smooth, Vec2::ZERO, 3.0, 1.0);

        let mean = 1.0; // 9.0 over 9 samples
        let before_spread = 9.0 - mean;
        apply_stroke(&mut field, &stroke);
        let after = field.get(1, 1).unwrap();
        assert!(after < 9.0);
        assert!(after - mean < before_spread);
        // Neighbors move up toward the mean
        assert!(field.get(0, 1).unwrap() > 0.0);
    }

    #[test]
    fn test_zero_strength_is_noop() {
        let mut field = flat_field();
        field.fill(|x, z| x - z);
        let before: Vec<f32> = field.samples().to_vec();

        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::ZERO, 1.5, 0.0);
        apply_stroke(&mut field, &stroke);
        assert_eq!(before, field.samples());
    }

    #[test]
    fn test_offgrid_stroke_touches_nothing() {
        let mut field = flat_field();
        let v0 = field.version();
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::new(100.0, 100.0), 1.5, 1.0);
        assert_eq!(apply_stroke(&mut field, &stroke), 0);
        assert_eq!(field.version(), v0);
    }

    #[test]
    fn test_samples_outside_radius_untouched() {
        let mut field = HeightField::new(8, 16.0, 10.0);
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::new(-6.0, -6.0), 2.0, 1.0);
        apply_stroke(&mut field, &stroke);

        // Far corner of the grid is well outside the footprint
        assert_eq!(field.get(8, 8).unwrap(), 0.0);
        // But something near the center of the footprint moved
        let (row, col) = field.world_to_sample(-6.0, -6.0).unwrap();
        assert!(field.get(row, col).unwrap() > 0.0);
    }

    #[test]
    fn test_stroke_bumps_version_once() {
        let mut field = flat_field();
        let v0 = field.version();
        let stroke = BrushStroke::new(BrushMode::Raise, Vec2::ZERO, 1.5, 1.0);
        apply_stroke(&mut field, &stroke);
        assert_eq!(field.version(), v0 + 1);
    }
}
