mod frame;
mod null_renderer;
mod primitives;

pub use frame::{FrameTransform, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    ClipRect, LinePrimitive, PolylinePrimitive, RectPrimitive, Viewport, WedgePrimitive,
};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic [`RenderFrame`]
/// so drawing code stays isolated from the data and geometry model. The
/// frame's transform context (translation, clip) is established before
/// its primitives are interpreted.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}
