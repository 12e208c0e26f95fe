use plotkit::axes::Axis;
use proptest::prelude::*;

proptest! {
    #[test]
    fn pos_round_trip_property(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        factor in 0.0f64..1.0
    ) {
        let max = min + span;
        let value = min + factor * span;

        let axis = Axis::new(min, max);
        let pos = axis.pos(value).expect("pos");
        let recovered = min + pos * axis.range();

        prop_assert!((recovered - value).abs() <= span * 1e-9);
    }

    #[test]
    fn pos_maps_bounds_to_unit_interval_property(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0
    ) {
        let axis = Axis::new(min, min + span);
        prop_assert!(axis.pos(min).expect("pos").abs() <= 1e-12);
        prop_assert!((axis.pos(min + span).expect("pos") - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn pos_is_monotone_property(
        min in -1_000.0f64..1_000.0,
        span in 0.001f64..1_000.0,
        a in -2.0f64..2.0,
        b in -2.0f64..2.0
    ) {
        let axis = Axis::new(min, min + span);
        let lo = a.min(b);
        let hi = a.max(b);
        let value_lo = min + lo * span;
        let value_hi = min + hi * span;

        prop_assert!(
            axis.pos(value_lo).expect("pos") <= axis.pos(value_hi).expect("pos")
        );
    }

    #[test]
    fn degenerate_range_always_errors_property(
        bound in -1_000_000.0f64..1_000_000.0,
        value in -1_000_000.0f64..1_000_000.0
    ) {
        let axis = Axis::new(bound, bound);
        prop_assert!(axis.pos(value).is_err());
    }
}
