//! Host-facing brush configuration boundary
//!
//! Every brush setting change flows through [`BrushConfig::apply`], which
//! clamps radius and strength and drops non-finite values. Nothing
//! invalid reaches the stroke engine.

use serde::Deserialize;

use super::stroke::BrushMode;

/// Smallest accepted brush radius (world units)
pub const MIN_RADIUS: f32 = 1.0;
/// Largest accepted brush radius (world units)
pub const MAX_RADIUS: f32 = 50.0;
/// Strength is a percentage; normalized to [0, 1] for the engine
pub const MAX_STRENGTH: f32 = 100.0;

/// Brush settings as configured by the host.
///
/// `strength` is kept in host units (0-100 percent) and normalized via
/// [`strength01`](Self::strength01) when a stroke is built. The falloff
/// exponent is fixed (quadratic) and not configurable.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Active sculpting mode
    pub mode: BrushMode,
    /// Footprint radius in world units
    pub size: f32,
    /// Strength percentage (0-100)
    pub strength: f32,
    /// Target elevation for Flatten strokes
    pub flatten_target: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            mode: BrushMode::Raise,
            size: 10.0,
            strength: 50.0,
            flatten_target: 0.0,
        }
    }
}

/// A partial settings update from the host. Absent fields leave the
/// current value untouched.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrushUpdate {
    pub mode: Option<BrushMode>,
    pub size: Option<f32>,
    pub strength: Option<f32>,
    pub flatten_target: Option<f32>,
}

impl BrushConfig {
    /// Apply a host update, clamping each field to its valid range.
    /// Non-finite values are dropped.
    pub fn apply(&mut self, update: &BrushUpdate) {
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(size) = update.size {
            if size.is_finite() {
                self.size = size.clamp(MIN_RADIUS, MAX_RADIUS);
            }
        }
        if let Some(strength) = update.strength {
            if strength.is_finite() {
                self.strength = strength.clamp(0.0, MAX_STRENGTH);
            }
        }
        if let Some(target) = update.flatten_target {
            if target.is_finite() {
                self.flatten_target = target;
            }
        }
    }

    /// Re-clamp all fields (used after deserializing a config file)
    pub fn clamped(mut self) -> Self {
        if !self.size.is_finite() {
            self.size = Self::default().size;
        }
        if !self.strength.is_finite() {
            self.strength = Self::default().strength;
        }
        if !self.flatten_target.is_finite() {
            self.flatten_target = 0.0;
        }
        self.size = self.size.clamp(MIN_RADIUS, MAX_RADIUS);
        self.strength = self.strength.clamp(0.0, MAX_STRENGTH);
        self
    }

    /// Strength normalized to [0, 1]
    pub fn strength01(&self) -> f32 {
        (self.strength / MAX_STRENGTH).clamp(0.0, 1.0)
    }
}
