use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use plotkit::PlotError;
use plotkit::color::{Color, MultiColor};
use plotkit::data::{ColumnKind, DataListener, DataTable, Value};
use plotkit::plots::{Plot, pie};
use plotkit::render::Viewport;
use plotkit::settings::Settings;

fn value_table(values: &[f64]) -> Rc<DataTable> {
    let table = Rc::new(DataTable::new(&[("value", ColumnKind::Number)]).expect("valid table"));
    for &value in values {
        table.add_row(vec![Value::Number(value)]).expect("add row");
    }
    table
}

fn rgb_mapper() -> Box<MultiColor> {
    Box::new(MultiColor::new(vec![Color::RED, Color::GREEN, Color::BLUE]).expect("palette"))
}

#[test]
fn negative_values_become_empty_slices_that_reserve_room() {
    let data = value_table(&[-23.50, 100.00, 60.25]);
    let plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");

    let slices = plot.pie_slices().expect("pie slices");
    assert_eq!(slices.len(), 3);

    let sum_abs = 23.50 + 100.00 + 60.25;
    let degrees_per_value = -360.0 / sum_abs;

    // The negative row renders nothing but still occupies its slot.
    assert_eq!(slices[0].start, 0.0);
    assert!(slices[0].span.is_nan());
    assert!(!slices[0].is_renderable());

    // It still reserves its angular room: slice 2 starts past it.
    assert_relative_eq!(slices[1].start, 23.50 * degrees_per_value);
    assert_relative_eq!(slices[1].span, 100.00 * degrees_per_value);
    assert_relative_eq!(slices[2].start, 123.50 * degrees_per_value);
    assert_relative_eq!(slices[2].span, 60.25 * degrees_per_value);

    // Finite spans split the remaining circle in proportion 100 : 60.25.
    assert_relative_eq!(slices[1].span / slices[2].span, 100.0 / 60.25);
}

#[test]
fn clockwise_flag_controls_angular_sign() {
    let data = value_table(&[-23.50, 100.00, 60.25]);
    let mut plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");

    let slices = plot.pie_slices().expect("pie slices");
    assert!(slices[1].span < 0.0, "clockwise spans are negative");
    assert!(slices[2].span < 0.0);

    plot.set_setting(pie::CLOCKWISE, false);
    let slices = plot.pie_slices().expect("pie slices");
    assert!(slices[1].span > 0.0, "counter-clockwise spans are positive");
    assert!(slices[2].span > 0.0);
    assert_relative_eq!(slices[1].span, 100.0 / 183.75 * 360.0);
}

#[test]
fn non_finite_rows_do_not_advance_the_start_angle() {
    let data = value_table(&[50.0, f64::NAN, 50.0]);
    let plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");

    let slices = plot.pie_slices().expect("pie slices");
    assert!(slices[1].span.is_nan());
    // Slice 3 starts directly after slice 1; the NaN row reserved nothing.
    assert_relative_eq!(slices[2].start, slices[0].start + slices[0].span);
}

#[test]
fn data_changes_trigger_wholesale_recompute() {
    let data = value_table(&[100.0]);
    let plot = Plot::pie_with_mapper(data.clone(), rgb_mapper()).expect("pie plot");
    assert_eq!(plot.pie_slices().expect("pie slices").len(), 1);

    data.add_row(vec![Value::Number(100.0)]).expect("add row");
    let slices = plot.pie_slices().expect("pie slices");
    assert_eq!(slices.len(), 2);
    assert_relative_eq!(slices[0].span, -180.0);
    assert_relative_eq!(slices[1].span, -180.0);

    data.remove_row(0).expect("remove row");
    let slices = plot.pie_slices().expect("pie slices");
    assert_eq!(slices.len(), 1);
    assert_relative_eq!(slices[0].span, -360.0);

    data.update_cell(0, 0, Value::Number(50.0)).expect("update");
    let slices = plot.pie_slices().expect("pie slices");
    assert_relative_eq!(slices[0].span, -360.0, epsilon = 1e-9);
}

#[test]
fn frame_translates_origin_to_plot_center() {
    let data = value_table(&[100.0, 60.25]);
    let plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");

    let frame = plot.frame(Viewport::new(200, 100)).expect("frame");
    assert_eq!(frame.transform.translate_x, 100.0);
    assert_eq!(frame.transform.translate_y, 50.0);
    assert_eq!(frame.wedges.len(), 2);

    // Outer size follows min(width, height) at the default radius ratio.
    assert_eq!(frame.wedges[0].outer_diameter, 100.0);
    assert_eq!(frame.wedges[0].inner_diameter, 0.0);
    assert_eq!(frame.wedges[0].center_x, 0.0);
    assert_eq!(frame.wedges[0].center_y, 0.0);
}

#[test]
fn radius_and_gap_settings_shape_the_wedges() {
    let data = value_table(&[100.0, 60.25]);
    let mut plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");
    plot.set_setting(pie::RADIUS, 0.5);
    plot.set_setting(pie::RADIUS_INNER, 0.4);
    plot.set_setting(pie::GAP, 2.0);
    plot.set_setting(pie::START, 90.0);

    let frame = plot.frame(Viewport::new(400, 400)).expect("frame");
    let wedge = frame.wedges[0];
    assert_relative_eq!(wedge.outer_diameter, 200.0);
    assert_relative_eq!(wedge.inner_diameter, 80.0);
    assert_relative_eq!(wedge.gap_width, 2.0);
    // Start offset shifts every slice by the configured angle.
    assert_relative_eq!(wedge.start_angle_deg, 90.0);
}

#[test]
fn suppressed_slices_emit_no_wedges() {
    let data = value_table(&[-23.50, 100.00, 60.25]);
    let plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");

    let frame = plot.frame(Viewport::new(100, 100)).expect("frame");
    assert_eq!(frame.wedges.len(), 2, "negative slice renders nothing");
}

#[test]
fn slice_colors_use_the_offset_lookup_formula() {
    let data = value_table(&[10.0, 10.0, 10.0]);
    let plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");

    let frame = plot.frame(Viewport::new(100, 100)).expect("frame");
    // Lookup values are slice_no - 1/3: 0.667, 1.667, 2.667. The palette
    // index doubles them, so slice 1 interpolates past green and the rest
    // clamp to the final palette color.
    let mapper = MultiColor::new(vec![Color::RED, Color::GREEN, Color::BLUE]).expect("palette");
    let expected_first = {
        use plotkit::color::ColorMapper;
        mapper.get(1.0 - 1.0 / 3.0)
    };
    assert_eq!(frame.wedges[0].fill, expected_first);
    assert_eq!(frame.wedges[1].fill, Color::BLUE);
    assert_eq!(frame.wedges[2].fill, Color::BLUE);
}

#[test]
fn zero_radius_draws_nothing_without_touching_the_cache() {
    let data = value_table(&[100.0, 60.25]);
    let mut plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");
    plot.set_setting(pie::RADIUS, 0.0);

    let before = plot.pie_slices().expect("pie slices");
    let frame = plot.frame(Viewport::new(100, 100)).expect("frame");
    assert!(frame.is_empty());
    assert_eq!(plot.pie_slices().expect("pie slices"), before);
}

#[test]
fn invalid_viewport_is_rejected() {
    let data = value_table(&[100.0]);
    let plot = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");
    assert!(matches!(
        plot.frame(Viewport::new(0, 100)),
        Err(PlotError::InvalidViewport { .. })
    ));
}

#[test]
fn non_numeric_value_column_is_rejected() {
    let table = Rc::new(DataTable::new(&[("label", ColumnKind::Text)]).expect("valid table"));
    assert!(matches!(
        Plot::pie_with_mapper(table, rgb_mapper()),
        Err(PlotError::InvalidConfiguration(_))
    ));
}

#[test]
fn settings_round_trip_reproduces_identical_geometry() {
    let data = value_table(&[-23.50, 100.00, 60.25]);

    let mut original = Plot::pie_with_mapper(data.clone(), rgb_mapper()).expect("pie plot");
    original.set_setting(pie::RADIUS, 0.8);
    original.set_setting(pie::RADIUS_INNER, 0.3);
    original.set_setting(pie::GAP, 1.5);
    original.set_setting(pie::START, 45.0);
    original.set_setting(pie::CLOCKWISE, false);

    let json = serde_json::to_string(original.settings()).expect("serialize settings");
    let restored: Settings = serde_json::from_str(&json).expect("deserialize settings");

    let mut replica = Plot::pie_with_mapper(data, rgb_mapper()).expect("pie plot");
    for (key, value) in restored.override_entries() {
        replica.set_setting(key, value.clone());
    }

    let viewport = Viewport::new(640, 480);
    let original_frame = original.frame(viewport).expect("frame");
    let replica_frame = replica.frame(viewport).expect("frame");
    assert_eq!(original_frame, replica_frame);
}

#[test]
fn default_mapper_assigns_distinct_slice_colors() {
    let data = value_table(&[10.0, 10.0, 10.0, 10.0, 10.0]);
    let plot = Plot::pie(data).expect("pie plot");

    let frame = plot.frame(Viewport::new(100, 100)).expect("frame");
    assert_eq!(frame.wedges.len(), 5);
    for (i, a) in frame.wedges.iter().enumerate() {
        for b in &frame.wedges[i + 1..] {
            assert_ne!(a.fill, b.fill, "slice fills must differ");
        }
    }
}

#[test]
fn default_mapper_colors_are_stable_across_frames() {
    let data = value_table(&[30.0, 70.0]);
    let plot = Plot::pie(data).expect("pie plot");

    let first = plot.frame(Viewport::new(100, 100)).expect("frame");
    let second = plot.frame(Viewport::new(100, 100)).expect("frame");
    assert_eq!(first, second);
}

struct SliceCounter {
    plot: Rc<Plot>,
    seen: Option<usize>,
}

impl DataListener for SliceCounter {
    fn data_added(&mut self, _source: &DataTable, _rows: &[usize]) {
        self.seen = self.plot.pie_slices().map(|slices| slices.len());
    }

    fn data_updated(&mut self, _source: &DataTable, _rows: &[usize]) {}

    fn data_removed(&mut self, _source: &DataTable, _rows: &[usize]) {}
}

#[test]
fn listeners_may_read_the_plot_mid_notification() {
    let data = value_table(&[100.0]);
    let plot = Rc::new(Plot::pie_with_mapper(data.clone(), rgb_mapper()).expect("pie plot"));

    let counter = Rc::new(RefCell::new(SliceCounter {
        plot: plot.clone(),
        seen: None,
    }));
    let handle: Rc<RefCell<dyn DataListener>> = counter.clone();
    data.add_listener(&handle);

    data.add_row(vec![Value::Number(50.0)]).expect("add row");

    // The engine recomputed before this listener ran, and reading the
    // cached geometry from inside the callback is fine.
    assert_eq!(counter.borrow().seen, Some(2));
}

#[test]
fn redraw_flag_follows_data_and_settings_changes() {
    let data = value_table(&[100.0]);
    let mut plot = Plot::pie_with_mapper(data.clone(), rgb_mapper()).expect("pie plot");
    assert!(plot.needs_redraw(), "fresh plots start stale");

    let _ = plot.frame(Viewport::new(100, 100)).expect("frame");
    assert!(!plot.needs_redraw());

    data.add_row(vec![Value::Number(1.0)]).expect("add row");
    assert!(plot.needs_redraw());

    let _ = plot.frame(Viewport::new(100, 100)).expect("frame");
    plot.set_setting(pie::GAP, 1.0);
    assert!(plot.needs_redraw());
}
