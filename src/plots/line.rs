//! Discrete (stair-step) line geometry engine.
//!
//! Consecutive points are connected with horizontal-then-vertical-then-
//! horizontal stair segments instead of a direct diagonal. The fractional
//! "ascending point" places the vertical riser between the two x
//! positions; 1.0 (the default) puts it at the second point.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::axes::Axis;
use crate::color::ColorMapper;
use crate::data::DataTable;
use crate::error::PlotResult;
use crate::render::{PolylinePrimitive, RenderFrame};
use crate::settings::{SettingValue, Settings};

/// Fraction of the distance between two points where the riser occurs.
pub const ASCENDING: &str = "line.discrete.ascending";
/// Stroke width of the line.
pub const WIDTH: &str = "line.width";
/// Stroke color; when unset the plot's color mapper provides the paint.
pub const COLOR: &str = "line.color";

/// One cached run of consecutive finite samples in data space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LineRun {
    pub points: Vec<(f64, f64)>,
}

/// Cached line samples, rebuilt wholesale on every data change.
///
/// Non-finite rows break the polyline into separate runs so no segment is
/// ever drawn through a malformed point.
#[derive(Debug)]
pub(crate) struct LineEngine {
    x_column: usize,
    y_column: usize,
    runs: Vec<LineRun>,
}

impl LineEngine {
    pub(crate) fn new(x_column: usize, y_column: usize) -> Self {
        Self {
            x_column,
            y_column,
            runs: Vec::new(),
        }
    }

    pub(crate) fn recompute(&mut self, data: &DataTable) {
        self.runs.clear();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for row in 0..data.row_count() {
            let x = numeric(data, self.x_column, row);
            let y = numeric(data, self.y_column, row);
            match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                    current.push((x, y));
                }
                _ => {
                    warn!(row, "breaking line run at non-finite row");
                    if !current.is_empty() {
                        self.runs.push(LineRun {
                            points: std::mem::take(&mut current),
                        });
                    }
                }
            }
        }
        if !current.is_empty() {
            self.runs.push(LineRun { points: current });
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
        if width <= 0.0 || height <= 0.0 {
            return Ok(());
        }

        let ascending = settings.number_or(ASCENDING, 1.0);
        let stroke_width = settings.number_or(WIDTH, 1.5);
        let color = settings
            .get(COLOR)
            .and_then(SettingValue::as_color)
            .unwrap_or_else(|| mapper.get(0.0));

        for run in &self.runs {
            if run.points.len() < 2 {
                continue;
            }

            let mut mapped: SmallVec<[(f64, f64); 32]> = SmallVec::with_capacity(run.points.len());
            for &(x, y) in &run.points {
                let px = axis_x.pos(x)? * width;
                let py = (1.0 - axis_y.pos(y)?) * height;
                mapped.push((px, py));
            }

            frame.push_polyline(PolylinePrimitive {
                points: stair_path(&mapped, ascending),
                stroke_width,
                color,
            });
        }

        Ok(())
    }

    pub(crate) fn runs(&self) -> &[LineRun] {
        &self.runs
    }
}

/// Builds the stair-step vertex list for one run of pixel positions.
///
/// For each consecutive pair the riser sits at
/// `prev_x + (x - prev_x) * ascending`, yielding a horizontal segment to
/// the riser, the vertical riser, and a horizontal segment to the point.
fn stair_path(mapped: &[(f64, f64)], ascending: f64) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(mapped.len() * 3);
    for &(px, py) in mapped {
        match path.last().copied() {
            None => path.push((px, py)),
            Some((prev_x, prev_y)) => {
                let ascending_x = prev_x + (px - prev_x) * ascending;
                path.push((ascending_x, prev_y));
                path.push((ascending_x, py));
                path.push((px, py));
            }
        }
    }
    path
}

fn numeric(data: &DataTable, col: usize, row: usize) -> Option<f64> {
    data.get(col, row).and_then(|value| value.as_number())
}
