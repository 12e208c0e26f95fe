//! String-keyed configuration store with a fallback default layer.
//!
//! Every configurable component resolves its style and parameterization
//! through a `Settings` instance: explicit overrides first, then defaults
//! installed at construction, then absent. Keys are plain strings such as
//! `"pieplot.radius"` or `"line.discrete.ascending"`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Typed value stored under a settings key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Color(Color),
    ColorList(Vec<Color>),
}

impl SettingValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Color> for SettingValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

/// Two-layer settings store: overrides, then defaults, then unset.
///
/// Overrides are mutated through [`set`](Self::set) and
/// [`remove`](Self::remove); each mutation bumps a monotonic revision so
/// owning components can observe settings changes the same way they
/// observe data changes. Defaults never bump the revision — they are
/// installed once at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    overrides: IndexMap<String, SettingValue>,
    defaults: IndexMap<String, SettingValue>,
    #[serde(skip)]
    revision: u64,
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a key: override first, then default, then `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    #[must_use]
    pub fn get_default(&self, key: &str) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.overrides.insert(key.into(), value.into());
        self.revision += 1;
    }

    /// Removes an override, falling back to the default layer. Removing
    /// an absent key is a no-op and does not bump the revision.
    pub fn remove(&mut self, key: &str) {
        if self.overrides.shift_remove(key).is_some() {
            self.revision += 1;
        }
    }

    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.defaults.insert(key.into(), value.into());
    }

    /// Iterates the override layer in insertion order.
    pub fn override_entries(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.overrides.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Monotonic counter bumped on every override mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn number_or(&self, key: &str, fallback: f64) -> f64 {
        self.get(key)
            .and_then(SettingValue::as_number)
            .unwrap_or(fallback)
    }

    #[must_use]
    pub fn bool_or(&self, key: &str, fallback: bool) -> bool {
        self.get(key)
            .and_then(SettingValue::as_bool)
            .unwrap_or(fallback)
    }

    #[must_use]
    pub fn color_or(&self, key: &str, fallback: Color) -> Color {
        self.get(key)
            .and_then(SettingValue::as_color)
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingValue, Settings};

    #[test]
    fn override_wins_over_default() {
        let mut settings = Settings::new();
        settings.set_default("pieplot.radius", 1.0);
        assert_eq!(settings.number_or("pieplot.radius", 0.0), 1.0);

        settings.set("pieplot.radius", 0.5);
        assert_eq!(settings.number_or("pieplot.radius", 0.0), 0.5);
        assert_eq!(
            settings.get_default("pieplot.radius"),
            Some(&SettingValue::Number(1.0))
        );

        settings.remove("pieplot.radius");
        assert_eq!(settings.number_or("pieplot.radius", 0.0), 1.0);
    }

    #[test]
    fn revision_tracks_override_mutations_only() {
        let mut settings = Settings::new();
        settings.set_default("line.width", 1.5);
        assert_eq!(settings.revision(), 0);

        settings.set("line.width", 2.0);
        assert_eq!(settings.revision(), 1);

        settings.remove("line.width");
        assert_eq!(settings.revision(), 2);

        settings.remove("line.width");
        assert_eq!(settings.revision(), 2);
    }
}
