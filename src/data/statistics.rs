use serde::{Deserialize, Serialize};

/// Aggregate metric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Sum,
    Mean,
    Variance,
    Min,
    Max,
    N,
}

/// On-demand aggregate statistics over a numeric sample.
///
/// A `Statistics` view is constructed fresh for every lookup so results
/// always reflect the live column contents; nothing is cached across
/// mutation. Non-finite samples are skipped by every metric except `N`,
/// which counts all rows. Empty (or all-non-finite) input yields 0.0 for
/// `Sum`, the row count for `N`, and NaN for `Mean`, `Variance`, `Min`
/// and `Max`.
#[derive(Debug, Clone, Copy)]
pub struct Statistics<'a> {
    values: &'a [f64],
}

impl<'a> Statistics<'a> {
    #[must_use]
    pub const fn of(values: &'a [f64]) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(self, key: StatKey) -> f64 {
        match key {
            StatKey::Sum => self.finite().sum(),
            StatKey::Mean => self.mean(),
            StatKey::Variance => self.variance(),
            StatKey::Min => self.finite().fold(f64::NAN, f64::min),
            StatKey::Max => self.finite().fold(f64::NAN, f64::max),
            StatKey::N => self.values.len() as f64,
        }
    }

    fn finite(self) -> impl Iterator<Item = f64> + 'a {
        self.values.iter().copied().filter(|v| v.is_finite())
    }

    fn mean(self) -> f64 {
        let count = self.finite().count();
        if count == 0 {
            return f64::NAN;
        }
        self.finite().sum::<f64>() / count as f64
    }

    /// Two-pass population variance: mean first, then mean squared
    /// deviation, for numerical stability.
    fn variance(self) -> f64 {
        let count = self.finite().count();
        if count == 0 {
            return f64::NAN;
        }
        let mean = self.mean();
        self.finite().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64
    }
}
