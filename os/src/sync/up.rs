use core::cell::{RefCell, RefMut};

/// Interior mutability for data that is only ever touched by one hart.
/// Borrowing twice is a kernel bug and panics.
pub struct UPSafeCell<T> {
    inner: RefCell<T>,
}

// The caller guarantees single-hart access.
unsafe impl<T> Sync for UPSafeCell<T> {}

impl<T> UPSafeCell<T> {
    /// The caller must make sure the data is never accessed concurrently.
    pub unsafe fn new(inner: T) -> Self {
        Self {
            inner: RefCell::new(inner),
        }
    }

    /// Exclusive access to the inner data; panics if already borrowed.
    pub fn exclusive_access(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }
}
