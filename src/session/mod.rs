//! Sculpting session: per-tick glue between input, brush, and field
//!
//! The session is single-threaded and tick-driven: the host scheduler
//! calls [`SculptSession::tick`] once per frame with the current camera,
//! viewport, and pointer state. All field mutation happens inside the
//! tick, so exports and renderer snapshots between ticks always see a
//! consistent field.

pub mod config;
pub use config::SessionConfig;

use std::path::PathBuf;

use crate::brush::{self, BrushConfig, BrushStroke, BrushUpdate};
use crate::core::camera::Camera;
use crate::core::types::{Result, Vec2};
use crate::cursor::{CursorProjector, PointerState};
use crate::export::HeightmapExporter;
use crate::terrain::heightfield::HeightField;
use crate::terrain::layer::backdrop_layers;

/// Borrowed snapshot of the sculptable field for renderer consumption.
/// Compare `version` against the last rebuilt one to detect staleness.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    pub samples: &'a [f32],
    pub resolution: usize,
    pub size: f32,
    pub version: u64,
}

/// One sculpting session: owns the field and routes per-tick input
pub struct SculptSession {
    config: SessionConfig,
    field: HeightField,
    backdrop: Vec<HeightField>,
    brush: BrushConfig,
    projector: CursorProjector,
    exporter: HeightmapExporter,
    populated: bool,
}

impl SculptSession {
    /// Create an empty session. The field stays flat and unpopulated
    /// until [`regenerate`](Self::regenerate) seeds it.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let field = HeightField::new(config.resolution, config.size, config.max_height);
        let exporter = HeightmapExporter::new(&config.export_prefix, &config.export_dir);
        let brush = config.brush.clamped();

        Ok(Self {
            field,
            backdrop: Vec::new(),
            brush,
            projector: CursorProjector::default(),
            exporter,
            populated: false,
            config,
        })
    }

    /// (Re)build the terrain from noise with the given seed. The old
    /// field is discarded; its version history does not carry over.
    pub fn regenerate(&mut self, seed: u32) {
        self.config.seed = seed;
        let base = self.config.layer_params();
        self.field = base.build();
        self.backdrop = backdrop_layers(&base, self.config.backdrop_layers)
            .iter()
            .map(|params| params.build())
            .collect();
        self.populated = true;

        log::info!(
            "generated terrain: seed={} resolution={} size={} backdrop_layers={}",
            seed,
            self.config.resolution,
            self.config.size,
            self.backdrop.len(),
        );
    }

    /// Advance one simulation tick, applying at most one brush stroke.
    /// Returns true when the field changed. Inactive pointer, missing
    /// terrain, and a cursor ray parallel to the reference plane all
    /// skip the tick silently.
    pub fn tick(
        &mut self,
        camera: &Camera,
        viewport: (f32, f32),
        pointer: &PointerState,
    ) -> bool {
        if !self.populated || !pointer.active {
            return false;
        }
        let Some(point) = self.projector.project(camera, viewport, pointer.position)
        else {
            return false;
        };

        let stroke = BrushStroke::from_config(&self.brush, Vec2::new(point.x, point.z));
        brush::apply_stroke(&mut self.field, &stroke) > 0
    }

    /// Apply a pre-built stroke directly (scripted edits, tools that
    /// bypass cursor projection). No-op before terrain generation.
    pub fn apply_stroke(&mut self, stroke: &BrushStroke) -> bool {
        if !self.populated {
            return false;
        }
        brush::apply_stroke(&mut self.field, stroke) > 0
    }

    /// Apply a host brush-settings update. Values are clamped at this
    /// boundary; nothing invalid reaches the stroke engine.
    pub fn update_brush(&mut self, update: &BrushUpdate) {
        self.brush.apply(update);
    }

    /// Current (sanitized) brush settings
    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// The sculptable near field
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Decorative backdrop layer fields, nearest first
    pub fn backdrop(&self) -> &[HeightField] {
        &self.backdrop
    }

    /// Whether terrain has been generated yet
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Renderer-facing snapshot of the sculptable field
    pub fn snapshot(&self) -> FieldView<'_> {
        FieldView {
            samples: self.field.samples(),
            resolution: self.field.resolution(),
            size: self.field.size(),
            version: self.field.version(),
        }
    }

    /// Export the current elevation state as a PNG. Returns the written
    /// path, or None (with a warning) when no terrain exists yet. An
    /// export failure is terminal for this call only, not the session.
    pub fn export(&self) -> Result<Option<PathBuf>> {
        if !self.populated {
            log::warn!("export requested before terrain generation; skipping");
            return Ok(None);
        }
        Ok(Some(self.exporter.export(&self.field)?))
    }
}
