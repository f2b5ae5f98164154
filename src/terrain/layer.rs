//! Self-similar terrain layer family
//!
//! The sculptable near field and the decorative backdrop tiers are the
//! same dune family at different sizes: each successive layer doubles
//! the world patch, drops grid resolution, compresses height, and
//! re-seeds the noise so the tiers never visibly repeat.

use super::generator::{DuneGenerator, DuneParams};
use super::heightfield::HeightField;

/// Parameters for one terrain layer
#[derive(Clone, Debug)]
pub struct LayerParams {
    /// World side length of the layer's patch
    pub size: f32,
    /// Grid resolution (cells per side)
    pub resolution: usize,
    /// Multiplier applied to generator output
    pub height_scale: f32,
    /// Elevation clamp of the built field
    pub max_height: f32,
    /// Noise parameters (seed + bands)
    pub dune: DuneParams,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            size: 500.0,
            resolution: 128,
            height_scale: 1.0,
            max_height: 40.0,
            dune: DuneParams::default(),
        }
    }
}

impl LayerParams {
    /// Build and bulk-populate the field for this layer
    pub fn build(&self) -> HeightField {
        let generator = DuneGenerator::new(self.dune.clone());
        let mut field = HeightField::new(self.resolution, self.size, self.max_height);
        generator.populate(&mut field, self.height_scale);
        field
    }
}

/// Derive the backdrop family behind a base layer. Layer `i` (1-based)
/// doubles the patch per step, reduces resolution by 1.5× (floored at
/// 16), scales height by `1 - 0.15·i`, stretches the noise by
/// `1/(i + 1)`, and re-seeds.
pub fn backdrop_layers(base: &LayerParams, count: usize) -> Vec<LayerParams> {
    (1..=count)
        .map(|i| {
            let mut dune = base.dune.clone();
            dune.seed = base.dune.seed.wrapping_add(i as u32);
            dune.scale = base.dune.scale / (i as f32 + 1.0);

            LayerParams {
                size: base.size * 2f32.powi(i as i32),
                resolution: ((base.resolution as f32 / 1.5f32.powi(i as i32)) as usize)
                    .max(16),
                height_scale: base.height_scale * (1.0 - 0.15 * i as f32).max(0.0),
                max_height: base.max_height,
                dune,
            }
        })
        .collect()
}
