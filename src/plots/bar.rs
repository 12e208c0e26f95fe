//! Bar geometry engine.
//!
//! Each row contributes one vertical bar spanning from the y-axis zero
//! position to the row's value, centered on the row's x position.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::axes::Axis;
use crate::color::ColorMapper;
use crate::data::DataTable;
use crate::error::PlotResult;
use crate::render::{RectPrimitive, RenderFrame};
use crate::settings::Settings;

/// Bar width in x-axis units.
pub const WIDTH: &str = "barplot.width";

/// One cached bar sample in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

/// Cached bar samples, rebuilt wholesale on every data change.
#[derive(Debug)]
pub(crate) struct BarEngine {
    x_column: usize,
    y_column: usize,
    points: Vec<BarPoint>,
}

impl BarEngine {
    pub(crate) fn new(x_column: usize, y_column: usize) -> Self {
        Self {
            x_column,
            y_column,
            points: Vec::new(),
        }
    }

    /// Extracts finite (x, y) samples; malformed rows are skipped so the
    /// rest of the plot still renders.
    pub(crate) fn recompute(&mut self, data: &DataTable) {
        self.points.clear();
        for row in 0..data.row_count() {
            let x = numeric(data, self.x_column, row);
            let y = numeric(data, self.y_column, row);
            match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                    self.points.push(BarPoint { row, x, y });
                }
                _ => warn!(row, "skipping bar row without finite x/y values"),
            }
        }
    }

    pub(crate) fn emit(
        &self,
        settings: &Settings,
        mapper: &dyn ColorMapper,
        axis_x: &Axis,
        axis_y: &Axis,
        frame: &mut RenderFrame,
    ) -> PlotResult<()> {
        let width = f64::from(frame.viewport.width);
        let height = f64::from(frame.viewport.height);
        if width <= 0.0 || height <= 0.0 || self.points.is_empty() {
            return Ok(());
        }

        let bar_width_units = settings.number_or(WIDTH, 0.75);
        let zero_unit = axis_y.pos(0.0)?;
        let zero_px = (1.0 - zero_unit) * height;

        for point in &self.points {
            let unit_x = axis_x.pos(point.x)?;
            let unit_y = axis_y.pos(point.y)?;

            let center_px = unit_x * width;
            let value_px = (1.0 - unit_y) * height;
            let bar_width_px = bar_width_units / axis_x.range().abs() * width;

            let fill = mapper.get(unit_x);
            frame.push_rect(RectPrimitive::filled(
                center_px - bar_width_px / 2.0,
                value_px.min(zero_px),
                bar_width_px,
                (value_px - zero_px).abs(),
                fill,
            ));
        }

        Ok(())
    }

    pub(crate) fn points(&self) -> &[BarPoint] {
        &self.points
    }
}

fn numeric(data: &DataTable, col: usize, row: usize) -> Option<f64> {
    data.get(col, row).and_then(|value| value.as_number())
}
