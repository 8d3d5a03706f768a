//! Interrupt-safe home for state shared between the tick timer and
//! foreground code.
//!
//! The tick handler and every foreground writer (arming a fade, starting
//! the spindle, arming the debounce) go through [`Shared::with`], which runs
//! the closure inside a critical section.  A channel reconfiguration can
//! therefore never be observed half-applied by the tick.
//!
//! ```text
//!  foreground ──▶ Shared::with ──┐
//!                                ├──▶ critical section ──▶ &mut T
//!  tick timer ──▶ Shared::with ──┘
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

/// A `static`-friendly cell, empty until [`install`](Shared::install).
pub struct Shared<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> Shared<T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store the value, returning any previous one.
    pub fn install(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(value))
    }

    /// Remove and return the value.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` with exclusive access.  Returns `None` if nothing is
    /// installed yet (e.g. a timer tick racing boot).
    ///
    /// Re-entering `with` from inside `f` panics on the `RefCell`.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::new()
    }
}
