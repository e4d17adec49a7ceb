use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Single-threaded owner for values shared between a component and the
/// callbacks it schedules on itself (frame callbacks, timers, DOM listeners).
///
/// Stores `T` inside an `Rc<RefCell<...>>` so cloning the handle is cheap
/// while ownership of `T` stays put. FAME never hands these across threads —
/// the whole engine runs on the browser's single UI thread.
pub struct Owned<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Owned<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    pub fn downgrade(&self) -> WeakOwned<T> {
        WeakOwned {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// A weak reference to an `Owned<T>`, used by frame/timer callbacks so a
/// cancelled or torn-down component doesn't keep itself alive via its own
/// scheduled callback.
pub struct WeakOwned<T> {
    inner: std::rc::Weak<RefCell<T>>,
}

impl<T> Clone for WeakOwned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> WeakOwned<T> {
    pub fn upgrade(&self) -> Option<Owned<T>> {
        self.inner.upgrade().map(|inner| Owned { inner })
    }
}
