//! Error types for the dunefield engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("sample index ({row}, {col}) out of bounds for resolution {resolution}")]
    OutOfBounds {
        row: usize,
        col: usize,
        resolution: usize,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
