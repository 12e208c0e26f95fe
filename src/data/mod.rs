pub mod column;
pub mod listener;
pub mod statistics;
pub mod table;

pub use column::{Column, ColumnKind, Value};
pub use listener::{DataChange, DataListener};
pub use statistics::{StatKey, Statistics};
pub use table::DataTable;
