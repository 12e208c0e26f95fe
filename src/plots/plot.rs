use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::axes::{Axis, AxisListener};
use crate::color::{ColorMapper, QuasiRandomColors};
use crate::data::{DataListener, DataTable};
use crate::error::{PlotError, PlotResult};
use crate::render::{RenderFrame, Renderer, Viewport};
use crate::settings::{SettingValue, Settings};

use super::bar::{self, BarEngine, BarPoint};
use super::line::{self, LineEngine};
use super::pie::{self, PieEngine, Slice};

/// Tagged variant over the geometry engines.
///
/// All engines share one contract: configure from settings, recompute
/// cached geometry wholesale from the data source, and emit primitives
/// into a frame. The engine doubles as the plot's data listener, so every
/// added/updated/removed event triggers a full recompute before the
/// mutating call returns.
#[derive(Debug)]
pub(crate) enum GeometryEngine {
    Pie(PieEngine),
    Bar(BarEngine),
    Line(LineEngine),
}

impl GeometryEngine {
    fn configure(&mut self, settings: &Settings) {
        match self {
            Self::Pie(engine) => engine.configure(settings),
            Self::Bar(_) | Self::Line(_) => {}
        }
    }

    fn recompute(&mut self, data: &DataTable) {
        match self {
            Self::Pie(engine) => engine.recompute(data),
            Self::Bar(engine) => engine.recompute(data),
            Self::Line(engine) => engine.recompute(data),
        }
    }

    fn emit(
        &self,
        settings: &Settings,
        mapper: &dyn ColorMapper,
        axis_x: &Axis,
        axis_y: &Axis,
        frame: &mut RenderFrame,
    ) -> PlotResult<()> {
        match self {
            Self::Pie(engine) => engine.emit(settings, mapper, frame),
            Self::Bar(engine) => engine.emit(settings, mapper, axis_x, axis_y, frame),
            Self::Line(engine) => engine.emit(settings, mapper, axis_x, axis_y, frame),
        }
    }
}

impl DataListener for GeometryEngine {
    fn data_added(&mut self, source: &DataTable, _rows: &[usize]) {
        self.recompute(source);
    }

    fn data_updated(&mut self, source: &DataTable, _rows: &[usize]) {
        self.recompute(source);
    }

    fn data_removed(&mut self, source: &DataTable, _rows: &[usize]) {
        self.recompute(source);
    }
}

/// Marks the plot stale on axis range changes and data changes so hosts
/// can gate redraws on [`Plot::needs_redraw`].
struct RedrawFlag {
    stale: Rc<Cell<bool>>,
}

impl AxisListener for RedrawFlag {
    fn range_changed(&mut self, _axis: &Axis, _min: f64, _max: f64) {
        self.stale.set(true);
    }
}

impl DataListener for RedrawFlag {
    fn data_added(&mut self, _source: &DataTable, _rows: &[usize]) {
        self.stale.set(true);
    }

    fn data_updated(&mut self, _source: &DataTable, _rows: &[usize]) {
        self.stale.set(true);
    }

    fn data_removed(&mut self, _source: &DataTable, _rows: &[usize]) {
        self.stale.set(true);
    }
}

/// A plot: one data source, one settings snapshot, one color mapper, two
/// axes, and a geometry engine with its cached geometry.
///
/// The plot holds a non-owning `Rc` reference to its data source and
/// never mutates it. Construction installs the per-kind setting defaults,
/// computes the initial geometry, and registers the engine as a listener
/// on the source; the source holds only weak back-references, so dropping
/// the plot detaches it.
pub struct Plot {
    data: Rc<DataTable>,
    settings: Settings,
    mapper: Box<dyn ColorMapper>,
    axis_x: Rc<Axis>,
    axis_y: Rc<Axis>,
    engine: Rc<RefCell<GeometryEngine>>,
    stale: Rc<Cell<bool>>,
    // Keeps the weak registrations on the axes and the table alive.
    _redraw_flag: Rc<RefCell<RedrawFlag>>,
}

impl std::fmt::Debug for Plot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plot")
            .field("data", &self.data)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Plot {
    /// Creates a pie plot over column 0 of `data`, colored by a
    /// [`QuasiRandomColors`] mapper so every slice gets a distinct fill.
    ///
    /// Defaults: radius 1.0, inner radius 0.0, clockwise, start angle 0,
    /// gap 0.
    pub fn pie(data: Rc<DataTable>) -> PlotResult<Self> {
        Self::pie_with_mapper(data, Box::new(QuasiRandomColors::new()))
    }

    /// Creates a pie plot with an explicit color mapper.
    pub fn pie_with_mapper(data: Rc<DataTable>, mapper: Box<dyn ColorMapper>) -> PlotResult<Self> {
        if !data.is_numeric(0) {
            return Err(PlotError::InvalidConfiguration(
                "a pie plot needs a numeric value column".to_owned(),
            ));
        }

        let mut settings = Settings::new();
        settings.set_default(pie::RADIUS, 1.0);
        settings.set_default(pie::RADIUS_INNER, 0.0);
        settings.set_default(pie::CLOCKWISE, true);
        settings.set_default(pie::START, 0.0);
        settings.set_default(pie::GAP, 0.0);

        Self::build(
            data,
            settings,
            mapper,
            GeometryEngine::Pie(PieEngine::new(0)),
        )
    }

    /// Creates a bar plot over columns 0 (x) and 1 (y). Default bar
    /// width: 0.75 x-axis units.
    pub fn bar(data: Rc<DataTable>, mapper: Box<dyn ColorMapper>) -> PlotResult<Self> {
        Self::check_xy_columns(&data, "bar")?;

        let mut settings = Settings::new();
        settings.set_default(bar::WIDTH, 0.75);

        Self::build(
            data,
            settings,
            mapper,
            GeometryEngine::Bar(BarEngine::new(0, 1)),
        )
    }

    /// Creates a discrete (stair-step) line plot over columns 0 (x) and
    /// 1 (y). Defaults: ascending point 1.0, stroke width 1.5.
    pub fn line(data: Rc<DataTable>, mapper: Box<dyn ColorMapper>) -> PlotResult<Self> {
        Self::check_xy_columns(&data, "line")?;

        let mut settings = Settings::new();
        settings.set_default(line::ASCENDING, 1.0);
        settings.set_default(line::WIDTH, 1.5);

        Self::build(
            data,
            settings,
            mapper,
            GeometryEngine::Line(LineEngine::new(0, 1)),
        )
    }

    fn check_xy_columns(data: &DataTable, kind: &str) -> PlotResult<()> {
        if data.column_count() < 2 || !data.is_numeric(0) || !data.is_numeric(1) {
            return Err(PlotError::InvalidConfiguration(format!(
                "a {kind} plot needs numeric x and y columns"
            )));
        }
        Ok(())
    }

    fn build(
        data: Rc<DataTable>,
        settings: Settings,
        mapper: Box<dyn ColorMapper>,
        engine: GeometryEngine,
    ) -> PlotResult<Self> {
        let engine = Rc::new(RefCell::new(engine));
        {
            let mut engine = engine.borrow_mut();
            engine.configure(&settings);
            engine.recompute(&data);
        }
        let engine_listener: Rc<RefCell<dyn DataListener>> = engine.clone();
        data.add_listener(&engine_listener);

        let axis_x = Rc::new(Axis::new(0.0, 1.0));
        let axis_y = Rc::new(Axis::new(0.0, 1.0));

        let stale = Rc::new(Cell::new(true));
        let redraw_flag = Rc::new(RefCell::new(RedrawFlag {
            stale: stale.clone(),
        }));
        let axis_flag: Rc<RefCell<dyn AxisListener>> = redraw_flag.clone();
        axis_x.add_listener(&axis_flag);
        axis_y.add_listener(&axis_flag);
        let data_flag: Rc<RefCell<dyn DataListener>> = redraw_flag.clone();
        data.add_listener(&data_flag);

        Ok(Self {
            data,
            settings,
            mapper,
            axis_x,
            axis_y,
            engine,
            stale,
            _redraw_flag: redraw_flag,
        })
    }

    #[must_use]
    pub fn data(&self) -> &Rc<DataTable> {
        &self.data
    }

    #[must_use]
    pub fn axis_x(&self) -> &Rc<Axis> {
        &self.axis_x
    }

    #[must_use]
    pub fn axis_y(&self) -> &Rc<Axis> {
        &self.axis_y
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }

    /// Sets a settings override and synchronously refreshes the cached
    /// geometry, mirroring how data changes propagate.
    pub fn set_setting(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.settings.set(key, value);
        self.refresh();
    }

    /// Removes a settings override, falling back to the default layer.
    pub fn remove_setting(&mut self, key: &str) {
        self.settings.remove(key);
        self.refresh();
    }

    fn refresh(&self) {
        let mut engine = self.engine.borrow_mut();
        engine.configure(&self.settings);
        engine.recompute(&self.data);
        self.stale.set(true);
        debug!(revision = self.settings.revision(), "plot settings applied");
    }

    /// Whether anything changed (data, settings, axis ranges) since the
    /// last emitted frame.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.stale.get()
    }

    /// Builds the draw-primitive scene for one draw pass.
    ///
    /// Geometry is walked from the cache; colors resolve through the
    /// mapper and positions through the axes at emission time.
    pub fn frame(&self, viewport: Viewport) -> PlotResult<RenderFrame> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut frame = RenderFrame::new(viewport);
        self.engine.borrow().emit(
            &self.settings,
            self.mapper.as_ref(),
            &self.axis_x,
            &self.axis_y,
            &mut frame,
        )?;
        self.stale.set(false);
        Ok(frame)
    }

    /// Builds a frame and hands it to the backend.
    pub fn draw<R: Renderer>(&self, renderer: &mut R, viewport: Viewport) -> PlotResult<()> {
        let frame = self.frame(viewport)?;
        renderer.render(&frame)
    }

    /// Snapshot of the cached pie slices; `None` for non-pie plots.
    #[must_use]
    pub fn pie_slices(&self) -> Option<Vec<Slice>> {
        match &*self.engine.borrow() {
            GeometryEngine::Pie(engine) => Some(engine.slices().to_vec()),
            _ => None,
        }
    }

    /// Snapshot of the cached bar samples; `None` for non-bar plots.
    #[must_use]
    pub fn bar_points(&self) -> Option<Vec<BarPoint>> {
        match &*self.engine.borrow() {
            GeometryEngine::Bar(engine) => Some(engine.points().to_vec()),
            _ => None,
        }
    }

    /// Point counts of the cached line runs; `None` for non-line plots.
    #[must_use]
    pub fn line_run_lengths(&self) -> Option<Vec<usize>> {
        match &*self.engine.borrow() {
            GeometryEngine::Line(engine) => {
                Some(engine.runs().iter().map(|run| run.points.len()).collect())
            }
            _ => None,
        }
    }
}
