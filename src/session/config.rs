//! Session configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::brush::BrushConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::terrain::generator::DuneParams;
use crate::terrain::layer::LayerParams;

/// Configuration for a sculpting session
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Random seed for dune generation
    pub seed: u32,
    /// World side length of the sculptable field
    pub size: f32,
    /// Grid resolution (cells per side)
    pub resolution: usize,
    /// Elevation clamp magnitude
    pub max_height: f32,
    /// Multiplier applied to generator output
    pub height_scale: f32,
    /// Decorative backdrop layers behind the sculptable field
    pub backdrop_layers: usize,
    /// Initial brush settings
    pub brush: BrushConfig,
    /// Filename prefix for exported heightmaps
    pub export_prefix: String,
    /// Output directory for exported heightmaps
    pub export_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            size: 500.0,
            resolution: 128,
            max_height: 40.0,
            height_scale: 1.0,
            backdrop_layers: 1,
            brush: BrushConfig::default(),
            export_prefix: "heightmap".to_string(),
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject dimensions the heightfield cannot represent
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(Error::Config("resolution must be at least 1".into()));
        }
        if !(self.size > 0.0) {
            return Err(Error::Config("size must be positive".into()));
        }
        if !(self.max_height > 0.0) {
            return Err(Error::Config("max_height must be positive".into()));
        }
        Ok(())
    }

    /// Layer parameters for the sculptable near field
    pub fn layer_params(&self) -> LayerParams {
        LayerParams {
            size: self.size,
            resolution: self.resolution,
            height_scale: self.height_scale,
            max_height: self.max_height,
            dune: DuneParams {
                seed: self.seed,
                ..DuneParams::default()
            },
        }
    }
}
