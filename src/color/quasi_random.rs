use std::cell::RefCell;
use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::color::{Color, ColorMapper};
use crate::error::{PlotError, PlotResult};

/// Infinite low-discrepancy sequence over (0, 1).
///
/// Yields the radical inverse of a running counter in the configured
/// base (a Halton sequence). Consecutive values spread evenly across the
/// unit interval instead of clustering, which makes the sequence a good
/// source of visually distinct samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaltonSequence {
    base: u64,
    index: u64,
}

impl HaltonSequence {
    /// Creates a sequence in the given base. Bases below 2 cannot encode
    /// digits and are a construction-time error.
    pub fn new(base: u64) -> PlotResult<Self> {
        if base < 2 {
            return Err(PlotError::InvalidConfiguration(format!(
                "a Halton sequence needs a base of at least 2, got {base}"
            )));
        }
        Ok(Self::with_base(base))
    }

    const fn with_base(base: u64) -> Self {
        Self { base, index: 0 }
    }
}

impl Default for HaltonSequence {
    fn default() -> Self {
        Self::with_base(2)
    }
}

impl Iterator for HaltonSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.index = self.index.wrapping_add(1);

        let mut i = self.index;
        let mut value = 0.0;
        let mut step = 1.0 / self.base as f64;
        while i > 0 {
            let digit = i % self.base;
            value += digit as f64 * step;
            i /= self.base;
            step /= self.base as f64;
        }
        Some(value)
    }
}

/// Default variance: full hue sweep, saturation in [0.75, 1.0],
/// brightness in [0.25, 1.0].
const DEFAULT_VARIANCE: [f64; 6] = [0.0, 1.0, 0.75, 0.25, 0.25, 0.75];

/// Deterministic quasi-random color source.
///
/// The first lookup of each distinct value draws the next sample from
/// three Halton sequences (hue base 3, saturation base 5, brightness
/// base 2) and converts it from HSB space; the result is cached, so a
/// value always maps to the same color within one mapper instance. Unlike
/// a palette mapper the lookup value is an identity key, not a position,
/// which keeps arbitrarily many inputs visually distinct.
#[derive(Debug, Clone)]
pub struct QuasiRandomColors {
    // min/spread pairs for hue, saturation, brightness.
    variance: [f64; 6],
    state: RefCell<State>,
}

#[derive(Debug, Clone)]
struct State {
    hue: HaltonSequence,
    saturation: HaltonSequence,
    brightness: HaltonSequence,
    cache: HashMap<OrderedFloat<f64>, Color>,
}

impl QuasiRandomColors {
    #[must_use]
    pub fn new() -> Self {
        Self::with_variance(DEFAULT_VARIANCE)
    }

    /// Creates a mapper with custom `[hue_min, hue_spread, sat_min,
    /// sat_spread, brightness_min, brightness_spread]` bounds.
    #[must_use]
    pub fn with_variance(variance: [f64; 6]) -> Self {
        Self {
            variance,
            state: RefCell::new(State {
                hue: HaltonSequence::with_base(3),
                saturation: HaltonSequence::with_base(5),
                brightness: HaltonSequence::with_base(2),
                cache: HashMap::new(),
            }),
        }
    }
}

impl Default for QuasiRandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMapper for QuasiRandomColors {
    fn get(&self, value: f64) -> Color {
        let mut state = self.state.borrow_mut();
        let key = OrderedFloat(value);
        if let Some(color) = state.cache.get(&key) {
            return *color;
        }

        let [hue_min, hue_spread, sat_min, sat_spread, bri_min, bri_spread] = self.variance;
        let hue = hue_min + hue_spread * state.hue.next().unwrap_or(0.0);
        let saturation = sat_min + sat_spread * state.saturation.next().unwrap_or(0.0);
        let brightness = bri_min + bri_spread * state.brightness.next().unwrap_or(0.0);

        let color = Color::from_hsb(hue, saturation, brightness);
        state.cache.insert(key, color);
        color
    }
}
