use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, interior-mutable state for page views and event queues.
///
/// Every clone reaches the same value, so a view handed to the host surface
/// and the copy held in the window observe the same content. Access goes
/// through closures; no borrow escapes a call.
pub struct Owned<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Owned<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    /// Reads the shared value.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.cell.borrow())
    }

    /// Mutates the shared value, visible through every clone.
    pub fn update<R>(&self, write: impl FnOnce(&mut T) -> R) -> R {
        write(&mut self.cell.borrow_mut())
    }
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Default> Default for Owned<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(value) => fmt::Debug::fmt(&*value, f),
            Err(_) => f.write_str("<in use>"),
        }
    }
}
