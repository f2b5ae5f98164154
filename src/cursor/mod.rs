//! Cursor-to-world projection onto the sculpting reference plane

pub mod projector;

pub use projector::{CursorProjector, PointerState};
