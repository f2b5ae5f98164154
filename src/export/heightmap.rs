//! Normalized grayscale heightmap export

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{Rgba, RgbaImage};

use crate::core::types::Result;
use crate::terrain::heightfield::HeightField;

/// Writes heightfield snapshots as 8-bit grayscale PNGs.
///
/// Each export linearly normalizes the field's current min/max range to
/// 0..255 and replicates the intensity across RGB with opaque alpha.
/// Under the single-threaded session model, exports run between ticks
/// and read the live sample array; a concurrent host must hand the
/// exporter a copied field instead.
#[derive(Clone, Debug)]
pub struct HeightmapExporter {
    prefix: String,
    out_dir: PathBuf,
}

impl HeightmapExporter {
    /// Create an exporter writing `<prefix>-<unix-ms>.png` under `out_dir`
    pub fn new(prefix: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Output directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render the field to a grayscale image without touching the
    /// filesystem. A field with zero elevation range renders all-black
    /// rather than dividing by zero.
    pub fn render(&self, field: &HeightField) -> RgbaImage {
        let (min_h, mut max_h) = field.min_max();
        if max_h == min_h {
            max_h = min_h + 1.0;
        }
        let range = max_h - min_h;

        let side = field.samples_per_side() as u32;
        let samples = field.samples();
        let mut img = RgbaImage::new(side, side);
        for row in 0..side {
            for col in 0..side {
                let h = samples[(row * side + col) as usize];
                let normalized = (h - min_h) / range;
                let gray = (normalized * 255.0).round() as u8;
                img.put_pixel(col, row, Rgba([gray, gray, gray, 255]));
            }
        }
        img
    }

    /// Render and write one PNG. Returns the written path.
    pub fn export(&self, field: &HeightField) -> Result<PathBuf> {
        let img = self.render(field);
        std::fs::create_dir_all(&self.out_dir)?;

        let path = self.out_dir.join(format!("{}-{}.png", self.prefix, unix_ms()));
        img.save(&path)?;

        log::info!(
            "exported heightmap {} ({}x{}, version {})",
            path.display(),
            img.width(),
            img.height(),
            field.version(),
        );
        Ok(path)
    }
}

/// Milliseconds since the Unix epoch, for collision-avoiding filenames
fn unix_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
