//! plotkit: a 2D data-visualization engine.
//!
//! Tabular numeric data goes in; deterministic geometric plot primitives
//! (pie wedges, bar rectangles, stair-step polylines) come out, positioned
//! via axis transforms, styled via a typed settings store and pluggable
//! color mapping, and kept consistent under data mutation through
//! synchronous change notification. Rasterization stays behind the
//! [`render::Renderer`] contract so drawing backends remain external
//! collaborators.

pub mod axes;
pub mod color;
pub mod data;
pub mod error;
pub mod plots;
pub mod render;
pub mod settings;
pub mod telemetry;

pub use error::{PlotError, PlotResult};
pub use plots::Plot;
