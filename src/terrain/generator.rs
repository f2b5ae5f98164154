//! Noise-based procedural dune generation

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::heightfield::HeightField;

/// One octave band of the dune profile
#[derive(Clone, Copy, Debug)]
pub struct NoiseBand {
    /// Spatial frequency (cycles per world unit)
    pub frequency: f32,
    /// Contribution to the elevation sum
    pub amplitude: f32,
}

/// Parameters controlling dune generation
#[derive(Clone, Debug)]
pub struct DuneParams {
    pub seed: u32,
    /// Ordered coarse-to-fine bands; the first carries the main dune ridges
    pub bands: Vec<NoiseBand>,
    /// Exponent sharpening the primary ridge band (1.5 typical)
    pub ridge_exponent: f32,
    /// Strength of the wind-direction height modulation
    pub wind_strength: f32,
    /// Exponent isolating occasional sharp crests
    pub crest_exponent: f32,
    /// Amplitude of the sharp-crest term
    pub crest_amplitude: f32,
    /// FBM octaves for micro-detail
    pub detail_octaves: u32,
    /// Amplitude of the micro-detail term (0 disables it)
    pub detail_amplitude: f32,
    /// Frequency multiplier applied to all bands (layers use < 1 to
    /// stretch the same dune family over larger patches)
    pub scale: f32,
}

impl Default for DuneParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            bands: vec![
                NoiseBand { frequency: 0.002, amplitude: 15.0 },
                NoiseBand { frequency: 0.005, amplitude: 2.0 },
                NoiseBand { frequency: 0.008, amplitude: 1.2 },
                NoiseBand { frequency: 0.05, amplitude: 0.35 },
            ],
            ridge_exponent: 1.5,
            wind_strength: 0.4,
            crest_exponent: 4.0,
            crest_amplitude: 2.0,
            detail_octaves: 3,
            detail_amplitude: 0.4,
            scale: 1.0,
        }
    }
}

/// Procedural dune generator.
///
/// `height_at` is a pure function of `(x, z)` and the construction seed:
/// ridge-shaped gradient noise for the main dunes, finer bands for
/// secondary bedforms, a slow wind-direction modulation, occasional
/// sharpened crests, and fractal micro-detail on top. Output is
/// unclamped; clamping happens when values are written into a
/// [`HeightField`].
pub struct DuneGenerator {
    params: DuneParams,
    band_noise: Perlin,
    wind_a: Perlin,
    wind_b: Perlin,
    crest: Perlin,
    detail: Fbm<Perlin>,
}

impl DuneGenerator {
    /// Create a new generator with the given parameters
    pub fn new(params: DuneParams) -> Self {
        let detail = Fbm::<Perlin>::new(params.seed.wrapping_add(4))
            .set_octaves(params.detail_octaves.max(1) as usize)
            .set_persistence(0.5);

        Self {
            band_noise: Perlin::new(params.seed),
            wind_a: Perlin::new(params.seed.wrapping_add(1)),
            wind_b: Perlin::new(params.seed.wrapping_add(2)),
            crest: Perlin::new(params.seed.wrapping_add(3)),
            detail,
            params,
        }
    }

    /// Get generator parameters
    pub fn params(&self) -> &DuneParams {
        &self.params
    }

    /// Dune elevation at world position (x, z)
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let scale = self.params.scale;

        let mut height = 0.0;
        for (i, band) in self.params.bands.iter().enumerate() {
            // Fractional per-band offsets decorrelate the shared noise
            // source and keep the origin off the Perlin lattice.
            let offset = 53.71 * (i as f64 + 1.0);
            let nx = (x * band.frequency * scale) as f64 + offset;
            let nz = (z * band.frequency * scale) as f64 + offset;

            // Folded noise gives the sharp-valley ridge profile of dunes
            let n = self.band_noise.get([nx, nz]).abs() as f32;
            let n = if i == 0 {
                n.powf(self.params.ridge_exponent)
            } else {
                n
            };
            height += n * band.amplitude;
        }

        // Slow modulation approximating prevailing wind direction
        let wx = (x * 0.001 * scale) as f64;
        let wz = (z * 0.001 * scale) as f64;
        let wind = self.wind_a.get([wx + 0.5, wz + 0.5]) as f32
            * self.wind_b.get([wx * 2.0 - 0.5, wz * 2.0 - 0.5]) as f32;
        height *= 1.0 + wind * self.params.wind_strength;

        // Occasional sharpened crest lines
        let cx = (x * 0.01 * scale) as f64 + 0.25;
        let cz = (z * 0.01 * scale) as f64 + 0.25;
        let crest = (self.crest.get([cx, cz]) as f32).max(0.0);
        height += crest.powf(self.params.crest_exponent) * self.params.crest_amplitude;

        if self.params.detail_amplitude != 0.0 {
            let dx = (x * 0.05 * scale) as f64;
            let dz = (z * 0.05 * scale) as f64;
            height += self.detail.get([dx, dz]) as f32 * self.params.detail_amplitude;
        }

        height
    }

    /// Bulk-populate a field, mapping noise output through `height_scale`
    pub fn populate(&self, field: &mut HeightField, height_scale: f32) {
        field.fill(|x, z| self.height_at(x, z) * height_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBES: [(f32, f32); 5] = [
        (0.0, 0.0),
        (123.4, 56.7),
        (-200.0, 310.5),
        (480.0, -480.0),
        (37.2, 37.2),
    ];

    #[test]
    fn test_height_at_deterministic() {
        let gen1 = DuneGenerator::new(DuneParams::default());
        let gen2 = DuneGenerator::new(DuneParams::default());

        for (x, z) in PROBES {
            assert_eq!(gen1.height_at(x, z), gen2.height_at(x, z));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let gen1 = DuneGenerator::new(DuneParams { seed: 1, ..Default::default() });
        let gen2 = DuneGenerator::new(DuneParams { seed: 2, ..Default::default() });

        let differs = PROBES
            .iter()
            .any(|&(x, z)| gen1.height_at(x, z) != gen2.height_at(x, z));
        assert!(differs);
    }

    #[test]
    fn test_height_varies_spatially() {
        let generator = DuneGenerator::new(DuneParams::default());
        let h0 = generator.height_at(123.4, 56.7);
        let h1 = generator.height_at(-200.0, 310.5);
        assert_ne!(h0, h1);
    }

    #[test]
    fn test_band_amplitudes_bound_output() {
        // Dropping the wind/crest/detail terms, folded noise stays in
        // [0, 1], so the band sum is bounded by the amplitude sum.
        let params = DuneParams {
            wind_strength: 0.0,
            crest_amplitude: 0.0,
            detail_amplitude: 0.0,
            ..Default::default()
        };
        let bound: f32 = params.bands.iter().map(|b| b.amplitude).sum::<f32>() * 1.01;
        let generator = DuneGenerator::new(params);

        for (x, z) in PROBES {
            let h = generator.height_at(x, z);
            assert!(h >= 0.0 && h <= bound, "height {} out of [0, {}]", h, bound);
        }
    }

    #[test]
    fn test_scale_stretches_pattern() {
        let base = DuneGenerator::new(DuneParams::default());
        let stretched = DuneGenerator::new(DuneParams {
            scale: 0.5,
            ..Default::default()
        });

        // Half frequency at (2x, 2z) reproduces the base pattern at (x, z)
        let h_base = base.height_at(123.4, 56.7);
        let h_stretched = stretched.height_at(246.8, 113.4);
        assert!((h_base - h_stretched).abs() < 1e-4);
    }

    #[test]
    fn test_populate_fills_and_clamps() {
        let generator = DuneGenerator::new(DuneParams::default());
        let mut field = HeightField::new(16, 500.0, 4.0);
        generator.populate(&mut field, 1.0);

        assert!(field.version() > 0);
        let (min, max) = field.min_max();
        assert!(min >= -4.0 && max <= 4.0);
        // Dune noise is non-constant over half a kilometer
        assert!(max > min);
    }
}
