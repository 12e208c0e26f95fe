use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::statistics::{StatKey, Statistics};

/// One cell value in a typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl Value {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) | Self::Date(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            Self::Number(_) | Self::Date(_) => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(v) => Some(*v),
            Self::Number(_) | Self::Text(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

/// Declared type of a column, fixed when the owning table is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Number,
    Text,
    Date,
}

impl ColumnKind {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number)
    }

    pub(crate) const fn expected_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Date => "date",
        }
    }
}

/// One column of comparable values of a single declared type.
///
/// Columns are handed out by the owning [`DataTable`](crate::data::DataTable)
/// as snapshots and never mutated through this type. Out-of-range reads
/// return `None` rather than failing; that lenient-bounds contract applies
/// uniformly across the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Number(Vec<f64>),
    Text(Vec<String>),
    Date(Vec<DateTime<Utc>>),
}

impl Column {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Number(data) => data.len(),
            Self::Text(data) => data.len(),
            Self::Date(data) => data.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Number(_) => ColumnKind::Number,
            Self::Text(_) => ColumnKind::Text,
            Self::Date(_) => ColumnKind::Date,
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            Self::Number(data) => data.get(row).copied().map(Value::Number),
            Self::Text(data) => data.get(row).cloned().map(Value::Text),
            Self::Date(data) => data.get(row).copied().map(Value::Date),
        }
    }

    /// Computes the requested aggregate from the current column contents.
    ///
    /// Non-numeric columns report their row count for [`StatKey::N`] and
    /// NaN for every other key.
    #[must_use]
    pub fn statistics(&self, key: StatKey) -> f64 {
        match self {
            Self::Number(data) => Statistics::of(data).get(key),
            Self::Text(_) | Self::Date(_) => match key {
                StatKey::N => self.len() as f64,
                _ => f64::NAN,
            },
        }
    }
}
