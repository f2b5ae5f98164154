//! Heightfield terrain: elevation grid, dune noise, layer family

pub mod heightfield;
pub use heightfield::HeightField;

pub mod generator;
pub use generator::{DuneGenerator, DuneParams, NoiseBand};

pub mod layer;
pub use layer::{backdrop_layers, LayerParams};
