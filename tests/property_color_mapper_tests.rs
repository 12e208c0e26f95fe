use plotkit::color::{Color, ColorMapper, MultiColor};
use proptest::prelude::*;

fn arbitrary_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b, a)| Color::rgba(r, g, b, a))
}

proptest! {
    #[test]
    fn lookup_is_total_property(
        colors in prop::collection::vec(arbitrary_color(), 2..8),
        value in prop::num::f64::ANY
    ) {
        let mapper = MultiColor::new(colors).expect("palette");
        // Every f64, including NaN and the infinities, yields a color.
        let _ = mapper.get(value);
    }

    #[test]
    fn endpoints_are_exact_property(
        colors in prop::collection::vec(arbitrary_color(), 2..8)
    ) {
        let first = colors[0];
        let last = colors[colors.len() - 1];
        let mapper = MultiColor::new(colors).expect("palette");

        prop_assert_eq!(mapper.get(0.0), first);
        prop_assert_eq!(mapper.get(1.0), last);
    }

    #[test]
    fn out_of_range_clamps_property(
        colors in prop::collection::vec(arbitrary_color(), 2..8),
        below in -1_000.0f64..0.0,
        above in 1.0f64..1_000.0
    ) {
        let first = colors[0];
        let last = colors[colors.len() - 1];
        let mapper = MultiColor::new(colors).expect("palette");

        prop_assert_eq!(mapper.get(below), first);
        prop_assert_eq!(mapper.get(above), last);
    }

    #[test]
    fn two_color_channels_stay_in_bounds_property(
        a in arbitrary_color(),
        b in arbitrary_color(),
        value in 0.0f64..1.0
    ) {
        let mapper = MultiColor::new(vec![a, b]).expect("palette");
        let mixed = mapper.get(value);

        prop_assert!(mixed.red >= a.red.min(b.red) && mixed.red <= a.red.max(b.red));
        prop_assert!(mixed.green >= a.green.min(b.green) && mixed.green <= a.green.max(b.green));
        prop_assert!(mixed.blue >= a.blue.min(b.blue) && mixed.blue <= a.blue.max(b.blue));
        prop_assert!(mixed.alpha >= a.alpha.min(b.alpha) && mixed.alpha <= a.alpha.max(b.alpha));
    }
}
