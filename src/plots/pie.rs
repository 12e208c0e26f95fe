//! Pie geometry engine.
//!
//! Displays the rows of a numeric column as segments of a pie. Negative
//! values produce "empty" slices: they reserve their proportional angular
//! room for spacing consistency but render no fill.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::color::ColorMapper;
use crate::data::DataTable;
use crate::error::PlotResult;
use crate::render::{FrameTransform, RenderFrame, WedgePrimitive};
use crate::settings::Settings;

/// Radius of the pie relative to the plot area size.
pub const RADIUS: &str = "pieplot.radius";
/// Inner (donut-hole) radius relative to the outer radius.
pub const RADIUS_INNER: &str = "pieplot.radius.inner";
/// Whether segments run clockwise (`true`) or counter-clockwise.
pub const CLOCKWISE: &str = "pieplot.clockwise";
/// Starting angle of the first segment in degrees.
pub const START: &str = "pieplot.start";
/// Width of the gap contour between segments.
pub const GAP: &str = "pieplot.gap";

/// One row's angular wedge: start and span in degrees.
///
/// `span` is NaN for empty slices (negative or non-finite rows); those
/// keep their slot so slice indices stay aligned with row indices, but
/// nothing is rendered for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub start: f64,
    pub span: f64,
}

impl Slice {
    #[must_use]
    pub fn is_renderable(self) -> bool {
        self.span.is_finite()
    }
}

/// Cached pie geometry, rebuilt wholesale on every data change.
#[derive(Debug)]
pub(crate) struct PieEngine {
    value_column: usize,
    clockwise: bool,
    degrees_per_value: f64,
    slices: SmallVec<[Slice; 16]>,
}

impl PieEngine {
    pub(crate) fn new(value_column: usize) -> Self {
        Self {
            value_column,
            clockwise: true,
            degrees_per_value: 0.0,
            slices: SmallVec::new(),
        }
    }

    pub(crate) fn configure(&mut self, settings: &Settings) {
        self.clockwise = settings.bool_or(CLOCKWISE, true);
    }

    /// Recomputes slice boundaries from the designated value column.
    ///
    /// `sum = Σ |v|` over finite rows; `degrees_per_value = ±360 / sum`
    /// with the sign following the clockwise flag. Non-finite rows do not
    /// advance the running start angle; negative rows advance it by their
    /// absolute share while their own span stays NaN.
    pub(crate) fn recompute(&mut self, data: &DataTable) {
        let rows = data.row_count();

        let mut sum = 0.0;
        for row in 0..rows {
            if let Some(value) = self.finite_numeric(data, row) {
                sum += value.abs();
            }
        }

        self.degrees_per_value = if self.clockwise {
            -360.0 / sum
        } else {
            360.0 / sum
        };

        self.slices.clear();
        let mut slice_start = 0.0;
        for row in 0..rows {
            let mut slice = Slice {
                start: slice_start,
                span: f64::NAN,
            };
            if let Some(value) = self.finite_numeric(data, row) {
                if value >= 0.0 {
                    slice.span = value * self.degrees_per_value;
                }
                slice_start += value.abs() * self.degrees_per_value;
            }
            self.slices.push(slice);
        }

        debug!(rows, sum, "pie geometry recomputed");
    }

    pub(crate) fn emit(
        &self,
        settings: &Settings,
        mapper: &dyn ColorMapper,
        frame: &mut RenderFrame,
    ) -> PlotResult<()> {
        let width = f64::from(frame.viewport.width);
        let height = f64::from(frame.viewport.height);
        if width <= 0.0 || height <= 0.0 {
            return Ok(());
        }

        // Origin moves to the plot area center; wedges are center-relative.
        frame.transform = FrameTransform::translate(width / 2.0, height / 2.0);

        let size = width.min(height) * settings.number_or(RADIUS, 1.0);
        if size <= 0.0 {
            return Ok(());
        }
        let size_inner = size * settings.number_or(RADIUS_INNER, 0.0);
        let gap = settings.number_or(GAP, 0.0);
        let slice_offset = settings.number_or(START, 0.0);

        let slice_count = self.slices.len();
        for (index, slice) in self.slices.iter().enumerate() {
            let slice_no = index + 1;
            if !slice.is_renderable() {
                continue;
            }

            // The lookup offset gives each slice a deterministic distinct
            // sample instead of exact row-index alignment.
            let fill = mapper.get(slice_no as f64 - 1.0 / slice_count as f64);
            frame.push_wedge(WedgePrimitive {
                center_x: 0.0,
                center_y: 0.0,
                outer_diameter: size,
                inner_diameter: size_inner,
                start_angle_deg: slice_offset + slice.start,
                span_angle_deg: slice.span,
                gap_width: gap,
                fill,
            });
        }

        Ok(())
    }

    pub(crate) fn slices(&self) -> &[Slice] {
        &self.slices
    }

    fn finite_numeric(&self, data: &DataTable, row: usize) -> Option<f64> {
        data.get(self.value_column, row)
            .and_then(|value| value.as_number())
            .filter(|value| value.is_finite())
    }
}
