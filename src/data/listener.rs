use serde::{Deserialize, Serialize};

use crate::data::table::DataTable;

/// Kind of mutation a data-change notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataChange {
    Added,
    Updated,
    Removed,
}

/// Receives synchronous change notifications from a [`DataTable`].
///
/// Listeners are dispatched in registration order before the mutating
/// call returns; `rows` holds the affected row indices. A listener must
/// not mutate the notifying table from inside its own callback — such a
/// call fails with [`PlotError::ReentrantMutation`].
///
/// [`PlotError::ReentrantMutation`]: crate::error::PlotError::ReentrantMutation
pub trait DataListener {
    fn data_added(&mut self, source: &DataTable, rows: &[usize]);
    fn data_updated(&mut self, source: &DataTable, rows: &[usize]);
    fn data_removed(&mut self, source: &DataTable, rows: &[usize]);
}
