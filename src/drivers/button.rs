//! Tick-counted control button debounce.
//!
//! ## Hardware
//!
//! Control buttons are active-low momentary switches with pull-ups.  Any
//! edge on a control pin arms (or re-arms) the countdown; the tick
//! dispatcher counts it down once per tick and, on the tick it reaches
//! exactly zero, the pins are examined.  Contact bounce keeps re-arming
//! the counter, so the check only runs once the input has been quiet for
//! the whole window.
//!
//! ```text
//!  edge  edge edge                       check
//!   │     │   │                            │
//!   ▼     ▼   ▼                            ▼
//!   N ... N . N  N-1  N-2  ...  2    1    0
//! ```
//!
//! The counter has a single writer: the tick context.  The GPIO ISR only
//! sets [`CONTROL_EDGE`]; the tick takes it and arms the countdown under
//! the shared-state lock, so no lock is ever taken from interrupt context.

use core::sync::atomic::{AtomicBool, Ordering};

/// Pending control-pin edge, set by the GPIO ISR and taken by the tick.
pub static CONTROL_EDGE: EdgeLatch = EdgeLatch::new();

/// One-bit mailbox from an ISR to the tick.  Edges arriving between two
/// ticks collapse into one.
#[derive(Debug, Default)]
pub struct EdgeLatch(AtomicBool);

impl EdgeLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// ISR side: record that an edge happened.
    pub fn signal(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Tick side: consume the pending edge, if any.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Debounce countdown.  Zero means idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonDebounce {
    counter: u16,
}

impl ButtonDebounce {
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Start (or restart) the countdown.  `ticks == 0` cancels it.
    pub fn arm(&mut self, ticks: u16) {
        self.counter = ticks;
    }

    /// Count down one tick.  Returns `true` exactly once, on the tick the
    /// counter reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.counter == 0 {
            return false;
        }
        self.counter -= 1;
        self.counter == 0
    }

    pub fn remaining(&self) -> u16 {
        self.counter
    }

    pub fn is_pending(&self) -> bool {
        self.counter > 0
    }
}
