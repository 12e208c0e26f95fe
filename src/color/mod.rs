mod multi_color;
mod quasi_random;

pub use multi_color::MultiColor;
pub use quasi_random::{HaltonSequence, QuasiRandomColors};

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    /// Converts a hue/saturation/brightness triple to RGB.
    ///
    /// The hue wraps modulo 1.0; saturation and brightness are clamped to
    /// [0, 1]. Channels round to the nearest integer channel value.
    #[must_use]
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        let saturation = saturation.clamp(0.0, 1.0);
        let brightness = brightness.clamp(0.0, 1.0);
        let channel = |v: f64| (v * 255.0 + 0.5) as u8;

        if saturation == 0.0 {
            let v = channel(brightness);
            return Self::rgb(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Linear per-channel blend towards `other`, rounding each channel to
    /// the nearest integer channel value. `fract` is expected in [0, 1];
    /// callers clamp before interpolating, which keeps every output
    /// channel inside the valid 0–255 range.
    #[must_use]
    pub fn lerp(self, other: Self, fract: f64) -> Self {
        let inv = 1.0 - fract;
        let channel = |a: u8, b: u8| (inv * f64::from(a) + fract * f64::from(b)).round() as u8;
        Self {
            red: channel(self.red, other.red),
            green: channel(self.green, other.green),
            blue: channel(self.blue, other.blue),
            alpha: channel(self.alpha, other.alpha),
        }
    }
}

/// Linear domain-to-unit rescaling shared by scaled color mappers.
///
/// Maps `[min, max]` onto [0, 1]; the default is the identity transform
/// over [0, 1]. The output is intentionally not clamped here — mappers
/// clamp after applying their own palette index math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    min: f64,
    max: f64,
}

impl Default for UnitScale {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl UnitScale {
    pub fn new(min: f64, max: f64) -> PlotResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(PlotError::InvalidConfiguration(
                "unit scale domain must be finite and non-empty".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn to_unit(self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

/// Maps a scalar to a color.
///
/// Mappers are stateless function objects: no mutable state beyond the
/// configuration captured at construction.
pub trait ColorMapper {
    fn get(&self, value: f64) -> Color;
}

/// Constant mapper returning the same color for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleColor {
    color: Color,
}

impl SingleColor {
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ColorMapper for SingleColor {
    fn get(&self, _value: f64) -> Color {
        self.color
    }
}
