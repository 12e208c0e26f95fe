use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::data::column::{Column, ColumnKind, Value};
use crate::data::listener::{DataChange, DataListener};
use crate::data::statistics::StatKey;
use crate::error::{PlotError, PlotResult};

/// A rectangular table of rows by named, typed columns.
///
/// The table is the single mutable resource of the engine: exactly one
/// logical owner mutates it while plots hold non-owning `Rc` references
/// and read it. Interior mutability keeps the mutation surface on `&self`
/// so shared handles stay usable; the model is strictly single-threaded.
///
/// Every mutation synchronously notifies registered listeners (in
/// registration order, with the affected row indices) before returning,
/// so a subsequent draw always observes fully up-to-date geometry. The
/// listener registry holds weak back-references: the table does not own
/// its listeners and dropped listeners are pruned after each dispatch.
pub struct DataTable {
    names: Vec<String>,
    kinds: Vec<ColumnKind>,
    columns: RefCell<Vec<Column>>,
    listeners: RefCell<Vec<Weak<RefCell<dyn DataListener>>>>,
    notifying: Cell<bool>,
}

impl std::fmt::Debug for DataTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("names", &self.names)
            .field("kinds", &self.kinds)
            .field("rows", &self.row_count())
            .finish_non_exhaustive()
    }
}

impl DataTable {
    pub fn new(columns: &[(&str, ColumnKind)]) -> PlotResult<Self> {
        if columns.is_empty() {
            return Err(PlotError::InvalidConfiguration(
                "a data table needs at least one column".to_owned(),
            ));
        }

        let names = columns.iter().map(|(name, _)| (*name).to_owned()).collect();
        let kinds: Vec<ColumnKind> = columns.iter().map(|(_, kind)| *kind).collect();
        let stores = kinds
            .iter()
            .map(|kind| match kind {
                ColumnKind::Number => Column::Number(Vec::new()),
                ColumnKind::Text => Column::Text(Vec::new()),
                ColumnKind::Date => Column::Date(Vec::new()),
            })
            .collect();

        Ok(Self {
            names,
            kinds,
            columns: RefCell::new(stores),
            listeners: RefCell::new(Vec::new()),
            notifying: Cell::new(false),
        })
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.borrow().first().map_or(0, Column::len)
    }

    #[must_use]
    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.names.get(col).map(String::as_str)
    }

    /// Returns whether the column holds numbers; out-of-range columns
    /// report `false` under the lenient-bounds contract.
    #[must_use]
    pub fn is_numeric(&self, col: usize) -> bool {
        self.kinds.get(col).is_some_and(|kind| kind.is_numeric())
    }

    /// Reads one cell. Out-of-range coordinates yield `None`, never an
    /// error; this is the crate-wide policy for reads.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<Value> {
        self.columns.borrow().get(col)?.get(row)
    }

    /// Returns a snapshot of one column, or `None` when out of range.
    #[must_use]
    pub fn column(&self, col: usize) -> Option<Column> {
        self.columns.borrow().get(col).cloned()
    }

    /// Computes a column aggregate from the live contents. Re-derived on
    /// every call, never cached, so it always reflects current data.
    /// Out-of-range columns yield NaN.
    #[must_use]
    pub fn statistics(&self, col: usize, key: StatKey) -> f64 {
        self.columns
            .borrow()
            .get(col)
            .map_or(f64::NAN, |column| column.statistics(key))
    }

    /// Appends one row and notifies listeners. The row must match the
    /// table's arity and column types.
    pub fn add_row(&self, values: Vec<Value>) -> PlotResult<usize> {
        self.guard_mutation()?;
        if values.len() != self.column_count() {
            return Err(PlotError::InvalidData(format!(
                "row has {} values, table has {} columns",
                values.len(),
                self.column_count()
            )));
        }
        self.check_types(&values)?;

        let row;
        {
            let mut columns = self.columns.borrow_mut();
            row = columns.first().map_or(0, Column::len);
            for (store, value) in columns.iter_mut().zip(values) {
                push_value(store, value);
            }
        }

        self.notify(DataChange::Added, &[row]);
        Ok(row)
    }

    /// Replaces one cell and notifies listeners. Unlike reads, mutating a
    /// bad index is an error: silently dropping the write would desync
    /// listeners from the data they mirror.
    pub fn update_cell(&self, col: usize, row: usize, value: Value) -> PlotResult<()> {
        self.guard_mutation()?;
        if row >= self.row_count() || col >= self.column_count() {
            return Err(PlotError::InvalidData(format!(
                "cell ({col}, {row}) is out of range"
            )));
        }
        let expected = self.kinds[col];
        if kind_of(&value) != expected {
            return Err(PlotError::ColumnTypeMismatch {
                column: col,
                expected: expected.expected_name(),
            });
        }

        {
            let mut columns = self.columns.borrow_mut();
            set_value(&mut columns[col], row, value);
        }

        self.notify(DataChange::Updated, &[row]);
        Ok(())
    }

    /// Removes one row and notifies listeners.
    pub fn remove_row(&self, row: usize) -> PlotResult<()> {
        self.guard_mutation()?;
        if row >= self.row_count() {
            return Err(PlotError::InvalidData(format!(
                "row {row} is out of range"
            )));
        }

        {
            let mut columns = self.columns.borrow_mut();
            for store in columns.iter_mut() {
                match store {
                    Column::Number(data) => {
                        data.remove(row);
                    }
                    Column::Text(data) => {
                        data.remove(row);
                    }
                    Column::Date(data) => {
                        data.remove(row);
                    }
                }
            }
        }

        self.notify(DataChange::Removed, &[row]);
        Ok(())
    }

    pub fn add_listener(&self, listener: &Rc<RefCell<dyn DataListener>>) {
        self.listeners.borrow_mut().push(Rc::downgrade(listener));
    }

    /// Removes a listener. Removing one that was never registered is a
    /// no-op; dead weak references are pruned as a side effect.
    pub fn remove_listener(&self, listener: &Rc<RefCell<dyn DataListener>>) {
        self.listeners.borrow_mut().retain(|weak| {
            weak.upgrade()
                .is_some_and(|rc| !Rc::ptr_eq(&rc, listener))
        });
    }

    fn guard_mutation(&self) -> PlotResult<()> {
        if self.notifying.get() {
            return Err(PlotError::ReentrantMutation);
        }
        Ok(())
    }

    fn check_types(&self, values: &[Value]) -> PlotResult<()> {
        for (col, (value, expected)) in values.iter().zip(&self.kinds).enumerate() {
            if kind_of(value) != *expected {
                return Err(PlotError::ColumnTypeMismatch {
                    column: col,
                    expected: expected.expected_name(),
                });
            }
        }
        Ok(())
    }

    fn notify(&self, change: DataChange, rows: &[usize]) {
        debug!(?change, ?rows, "dispatching data change");

        // Snapshot so listeners may register or remove others mid-dispatch.
        let snapshot: Vec<_> = self.listeners.borrow().clone();
        self.notifying.set(true);
        for weak in &snapshot {
            if let Some(listener) = weak.upgrade() {
                let mut listener = listener.borrow_mut();
                match change {
                    DataChange::Added => listener.data_added(self, rows),
                    DataChange::Updated => listener.data_updated(self, rows),
                    DataChange::Removed => listener.data_removed(self, rows),
                }
            }
        }
        self.notifying.set(false);

        self.listeners
            .borrow_mut()
            .retain(|weak| weak.strong_count() > 0);
    }
}

fn kind_of(value: &Value) -> ColumnKind {
    match value {
        Value::Number(_) => ColumnKind::Number,
        Value::Text(_) => ColumnKind::Text,
        Value::Date(_) => ColumnKind::Date,
    }
}

fn push_value(store: &mut Column, value: Value) {
    match (store, value) {
        (Column::Number(data), Value::Number(v)) => data.push(v),
        (Column::Text(data), Value::Text(v)) => data.push(v),
        (Column::Date(data), Value::Date(v)) => data.push(v),
        // `check_types` runs before any push.
        _ => unreachable!("column type checked before push"),
    }
}

fn set_value(store: &mut Column, row: usize, value: Value) {
    match (store, value) {
        (Column::Number(data), Value::Number(v)) => data[row] = v,
        (Column::Text(data), Value::Text(v)) => data[row] = v,
        (Column::Date(data), Value::Date(v)) => data[row] = v,
        _ => unreachable!("column type checked before write"),
    }
}
