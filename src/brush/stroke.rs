//! Brush stroke representation

use serde::Deserialize;

use crate::core::types::Vec2;
use super::config::BrushConfig;

/// What a stroke does to the samples under its footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    /// Lift samples toward +max_height
    #[default]
    Raise,
    /// Push samples toward -max_height
    Lower,
    /// Blend samples toward a fixed target elevation
    Flatten,
    /// Blend samples toward the footprint's mean elevation
    Smooth,
}

/// A single circular sculpting stroke in world space.
///
/// Ephemeral: the session builds one per tick from the sanitized brush
/// configuration and the projected cursor point, applies it, and drops
/// it. No stroke history is retained.
#[derive(Debug, Clone, Copy)]
pub struct BrushStroke {
    /// World-space center on the XZ plane
    pub center: Vec2,
    /// Footprint radius in world units (> 0)
    pub radius: f32,
    /// Normalized strength in [0, 1]
    pub strength: f32,
    /// Stroke mode
    pub mode: BrushMode,
    /// Elevation Flatten converges toward (ignored by other modes)
    pub target_height: f32,
}

impl BrushStroke {
    /// Create a new stroke
    pub fn new(mode: BrushMode, center: Vec2, radius: f32, strength: f32) -> Self {
        Self {
            center,
            radius,
            strength,
            mode,
            target_height: 0.0,
        }
    }

    /// Set the Flatten target elevation (builder pattern)
    pub fn with_target(mut self, target_height: f32) -> Self {
        self.target_height = target_height;
        self
    }

    /// Build this tick's stroke from sanitized config + projected point
    pub fn from_config(config: &BrushConfig, center: Vec2) -> Self {
        Self {
            center,
            radius: config.size,
            strength: config.strength01(),
            mode: config.mode,
            target_height: config.flatten_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_normalizes_strength() {
        let config = BrushConfig {
            mode: BrushMode::Flatten,
            size: 12.0,
            strength: 50.0,
            flatten_target: 3.0,
        };
        let stroke = BrushStroke::from_config(&config, Vec2::new(1.0, 2.0));

        assert_eq!(stroke.mode, BrushMode::Flatten);
        assert_eq!(stroke.radius, 12.0);
        assert_eq!(stroke.strength, 0.5);
        assert_eq!(stroke.target_height, 3.0);
        assert_eq!(stroke.center, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_mode_parses_lowercase_names() {
        let mode: BrushMode = serde_json::from_str("\"smooth\"").unwrap();
        assert_eq!(mode, BrushMode::Smooth);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result: Result<BrushMode, _> = serde_json::from_str("\"erode\"");
        assert!(result.is_err());
    }
}
