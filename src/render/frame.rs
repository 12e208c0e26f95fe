use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::render::primitives::{
    ClipRect, LinePrimitive, PolylinePrimitive, RectPrimitive, Viewport, WedgePrimitive,
};

/// Coordinate-transform context established before primitives are drawn.
///
/// Primitive coordinates are relative to `(translate_x, translate_y)`;
/// the optional clip rect is expressed in untranslated frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FrameTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub clip: Option<ClipRect>,
}

impl FrameTransform {
    #[must_use]
    pub const fn translate(translate_x: f64, translate_y: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            clip: None,
        }
    }

    #[must_use]
    pub fn with_clip(mut self, clip: ClipRect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.translate_x.is_finite() || !self.translate_y.is_finite() {
            return Err(PlotError::InvalidData(
                "frame translation must be finite".to_owned(),
            ));
        }
        if let Some(clip) = self.clip {
            clip.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one plot draw pass.
///
/// Primitives are ordered; a backend interprets them front to back after
/// applying the transform context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub transform: FrameTransform,
    pub wedges: Vec<WedgePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub lines: Vec<LinePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transform: FrameTransform::default(),
            wedges: Vec::new(),
            rects: Vec::new(),
            polylines: Vec::new(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: FrameTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn push_wedge(&mut self, wedge: WedgePrimitive) {
        self.wedges.push(wedge);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_polyline(&mut self, polyline: PolylinePrimitive) {
        self.polylines.push(polyline);
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.transform.validate()?;

        for wedge in &self.wedges {
            wedge.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
            && self.rects.is_empty()
            && self.polylines.is_empty()
            && self.lines.is_empty()
    }
}
