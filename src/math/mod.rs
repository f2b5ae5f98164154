//! Mathematical utilities and data structures

pub mod ray;

pub use ray::Ray;
