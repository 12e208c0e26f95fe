//! Numeric axis with range-change notification.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::error::{PlotError, PlotResult};

/// Receives synchronous range-change notifications from an [`Axis`].
pub trait AxisListener {
    fn range_changed(&mut self, axis: &Axis, min: f64, max: f64);
}

/// A numeric `[min, max]` range mapping arbitrary values to unit positions.
///
/// Mutators replace both bounds atomically and then notify listeners in
/// registration order before returning. Notification is synchronous and
/// re-entrancy is forbidden: a listener that mutates the axis from inside
/// its own `range_changed` callback gets
/// [`PlotError::ReentrantMutation`] instead of recursing.
///
/// `max >= min` is expected but not enforced; [`pos`](Self::pos) stays
/// linear either way. The one guarded degenerate case is `max == min`,
/// which fails with [`PlotError::DegenerateRange`] rather than dividing
/// by zero.
pub struct Axis {
    min: Cell<f64>,
    max: Cell<f64>,
    listeners: RefCell<Vec<Weak<RefCell<dyn AxisListener>>>>,
    notifying: Cell<bool>,
}

impl std::fmt::Debug for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Axis")
            .field("min", &self.min.get())
            .field("max", &self.max.get())
            .finish_non_exhaustive()
    }
}

impl Axis {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Cell::new(min),
            max: Cell::new(max),
            listeners: RefCell::new(Vec::new()),
            notifying: Cell::new(false),
        }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min.get()
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max.get()
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.max.get() - self.min.get()
    }

    /// Relative position of `value` on the axis: 0.0 at `min`, 1.0 at
    /// `max`, linear in between and unclamped outside.
    pub fn pos(&self, value: f64) -> PlotResult<f64> {
        let min = self.min.get();
        let max = self.max.get();
        if min == max {
            return Err(PlotError::DegenerateRange { bound: min });
        }
        Ok((value - min) / (max - min))
    }

    /// Replaces both bounds atomically, then notifies all listeners.
    pub fn set_range(&self, min: f64, max: f64) -> PlotResult<()> {
        if self.notifying.get() {
            return Err(PlotError::ReentrantMutation);
        }
        self.min.set(min);
        self.max.set(max);
        debug!(min, max, "axis range changed");

        let snapshot: Vec<_> = self.listeners.borrow().clone();
        self.notifying.set(true);
        for weak in &snapshot {
            if let Some(listener) = weak.upgrade() {
                listener.borrow_mut().range_changed(self, min, max);
            }
        }
        self.notifying.set(false);

        self.listeners
            .borrow_mut()
            .retain(|weak| weak.strong_count() > 0);
        Ok(())
    }

    pub fn set_min(&self, min: f64) -> PlotResult<()> {
        self.set_range(min, self.max.get())
    }

    pub fn set_max(&self, max: f64) -> PlotResult<()> {
        self.set_range(self.min.get(), max)
    }

    pub fn add_listener(&self, listener: &Rc<RefCell<dyn AxisListener>>) {
        self.listeners.borrow_mut().push(Rc::downgrade(listener));
    }

    /// Removes a listener. Removing one that was never registered is a
    /// no-op, not an error.
    pub fn remove_listener(&self, listener: &Rc<RefCell<dyn AxisListener>>) {
        self.listeners.borrow_mut().retain(|weak| {
            weak.upgrade()
                .is_some_and(|rc| !Rc::ptr_eq(&rc, listener))
        });
    }
}
