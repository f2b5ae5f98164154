//! Mutable elevation grid with world-space coordinate mapping

use rayon::prelude::*;

use crate::core::error::Error;
use crate::core::types::{Result, Vec2};

/// A square grid of elevation samples describing a terrain surface.
///
/// The grid holds `(resolution + 1)²` samples in row-major order and maps
/// them onto a `size × size` world patch centered on the origin, with
/// columns along +X and rows along +Z. Every sample stays within
/// `[-max_height, max_height]`; values are clamped at the write boundary.
/// Resolution and size are fixed for the field's lifetime; regeneration
/// constructs a new field.
///
/// The version counter increments on every mutation batch so dependents
/// (mesh rebuilds, exports) can detect staleness deterministically.
#[derive(Clone, Debug)]
pub struct HeightField {
    resolution: usize,
    size: f32,
    max_height: f32,
    data: Vec<f32>,
    version: u64,
}

impl HeightField {
    /// Create a zero-filled field. `resolution` is the cell count per
    /// side; the sample grid is one larger in each direction.
    pub fn new(resolution: usize, size: f32, max_height: f32) -> Self {
        debug_assert!(resolution > 0);
        debug_assert!(size > 0.0);
        debug_assert!(max_height > 0.0);

        let side = resolution + 1;
        Self {
            resolution,
            size,
            max_height,
            data: vec![0.0; side * side],
            version: 0,
        }
    }

    /// Grid resolution (cells per side)
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// World side length
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Elevation clamp magnitude
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Samples per grid side (`resolution + 1`)
    pub fn samples_per_side(&self) -> usize {
        self.resolution + 1
    }

    /// Current mutation version. Strictly increases on fill/set/stroke.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Row-major sample storage
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Read one sample. Out-of-bounds indices are an error, never wrapped.
    pub fn get(&self, row: usize, col: usize) -> Result<f32> {
        self.check_bounds(row, col)?;
        Ok(self.data[row * self.samples_per_side() + col])
    }

    /// Write one sample, clamping the value to `[-max_height, max_height]`.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        self.check_bounds(row, col)?;
        let idx = row * self.samples_per_side() + col;
        self.data[idx] = value.clamp(-self.max_height, self.max_height);
        self.version += 1;
        Ok(())
    }

    /// World position of a sample
    pub fn sample_to_world(&self, row: usize, col: usize) -> (f32, f32) {
        let x = (col as f32 / self.resolution as f32 - 0.5) * self.size;
        let z = (row as f32 / self.resolution as f32 - 0.5) * self.size;
        (x, z)
    }

    /// Nearest sample to a world position, or None outside the grid
    pub fn world_to_sample(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let col = ((x / self.size + 0.5) * self.resolution as f32).round();
        let row = ((z / self.size + 0.5) * self.resolution as f32).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row > self.resolution || col > self.resolution {
            return None;
        }
        Some((row, col))
    }

    /// Inclusive `(rows, cols)` index window covering every sample whose
    /// world position can lie within `radius` of `center` in the XZ
    /// plane (`center.x` is world x, `center.y` is world z).
    /// Derived directly from the affine mapping, so footprint lookup cost
    /// scales with the brush area rather than the grid. Returns None when
    /// the disc misses the grid entirely.
    pub fn sample_window(
        &self,
        center: Vec2,
        radius: f32,
    ) -> Option<((usize, usize), (usize, usize))> {
        let to_grid = |w: f32| (w / self.size + 0.5) * self.resolution as f32;

        let col0 = to_grid(center.x - radius).ceil() as i64;
        let col1 = to_grid(center.x + radius).floor() as i64;
        let row0 = to_grid(center.y - radius).ceil() as i64;
        let row1 = to_grid(center.y + radius).floor() as i64;

        let max = self.resolution as i64;
        if col1 < 0 || row1 < 0 || col0 > max || row0 > max {
            return None;
        }

        Some((
            (row0.max(0) as usize, row1.min(max) as usize),
            (col0.max(0) as usize, col1.min(max) as usize),
        ))
    }

    /// Bulk-overwrite every sample from a generator function of world
    /// `(x, z)`. Rows are filled in parallel; values clamp at the write
    /// boundary and the version bumps once for the whole batch.
    pub fn fill<F>(&mut self, f: F)
    where
        F: Fn(f32, f32) -> f32 + Sync,
    {
        let side = self.samples_per_side();
        let resolution = self.resolution as f32;
        let size = self.size;
        let max_height = self.max_height;

        self.data
            .par_chunks_mut(side)
            .enumerate()
            .for_each(|(row, samples)| {
                let z = (row as f32 / resolution - 0.5) * size;
                for (col, sample) in samples.iter_mut().enumerate() {
                    let x = (col as f32 / resolution - 0.5) * size;
                    *sample = f(x, z).clamp(-max_height, max_height);
                }
            });

        self.version += 1;
    }

    /// Minimum and maximum sample elevation
    pub fn min_max(&self) -> (f32, f32) {
        let min = self.data.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        (min, max)
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row > self.resolution || col > self.resolution {
            return Err(Error::OutOfBounds {
                row,
                col,
                resolution: self.resolution,
            });
        }
        Ok(())
    }
}
