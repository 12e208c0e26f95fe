use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorMapper, UnitScale};
use crate::error::{PlotError, PlotResult};

/// Linearly blends an ordered palette for values between 0.0 and 1.0.
///
/// The lookup value is first rescaled through the configured [`UnitScale`],
/// then mapped onto a continuous palette index in `[0, len - 1]`. Values
/// outside the normalized range are clamped, not rejected, so output
/// channels always stay within 0–255. Exact palette hits are returned
/// unchanged to avoid floating rounding at palette boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiColor {
    colors: Vec<Color>,
    scale: UnitScale,
}

impl MultiColor {
    /// Creates a mapper over at least two colors with the identity
    /// rescaling. Fewer than two colors is a construction-time error.
    pub fn new(colors: Vec<Color>) -> PlotResult<Self> {
        Self::with_scale(colors, UnitScale::default())
    }

    pub fn with_scale(colors: Vec<Color>, scale: UnitScale) -> PlotResult<Self> {
        if colors.len() < 2 {
            return Err(PlotError::InvalidConfiguration(format!(
                "a multi-color mapper needs at least 2 colors, got {}",
                colors.len()
            )));
        }
        Ok(Self { colors, scale })
    }

    /// The palette in blending order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl ColorMapper for MultiColor {
    fn get(&self, value: f64) -> Color {
        let x = self.scale.to_unit(value);
        // Non-finite lookups clamp to the palette start.
        let x = if x.is_finite() { x } else { 0.0 };

        let color_max = self.colors.len() - 1;
        let pos = (x * color_max as f64).clamp(0.0, color_max as f64);

        let index = pos.floor() as usize;
        let fract = pos - pos.floor();
        if fract == 0.0 {
            return self.colors[index];
        }

        self.colors[index].lerp(self.colors[index + 1], fract)
    }
}
