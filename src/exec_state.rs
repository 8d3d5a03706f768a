//! Executor request flags raised from the tick context.
//!
//! The tick handler and the control-pin check request machine-level
//! state changes (safety door, feed hold, ...) but do not act on them:
//! they set a bit here and the foreground loop drains the mask.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Tick dispatcher  │────▶│              │     │              │
//! │ (over-current)   │     │  ExecState   │────▶│  Foreground  │
//! │ Control-pin check│────▶│  (AtomicU8)  │     │  loop        │
//! └──────────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

use crate::app::ports::SafetyPort;

/// One executor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExecFlag {
    /// Halt motion and spindle; enclosure open or spindle over-current.
    SafetyDoor = 0b0000_0001,
    FeedHold = 0b0000_0010,
    CycleStart = 0b0000_0100,
    Reset = 0b0000_1000,
}

impl ExecFlag {
    pub const ALL: [ExecFlag; 4] = [
        ExecFlag::SafetyDoor,
        ExecFlag::FeedHold,
        ExecFlag::CycleStart,
        ExecFlag::Reset,
    ];

    pub const fn mask(self) -> u8 {
        self as u8
    }
}

/// Lock-free request mask.  One instance lives in a `static` on target.
pub struct ExecState {
    flags: AtomicU8,
}

impl ExecState {
    pub const fn new() -> Self {
        Self {
            flags: AtomicU8::new(0),
        }
    }

    /// Raise a flag.  Safe from interrupt context.
    pub fn set(&self, flag: ExecFlag) {
        self.flags.fetch_or(flag.mask(), Ordering::AcqRel);
    }

    pub fn is_set(&self, flag: ExecFlag) -> bool {
        self.flags.load(Ordering::Acquire) & flag.mask() != 0
    }

    /// Clear and return every pending flag.
    pub fn take_all(&self) -> ExecFlags {
        ExecFlags(self.flags.swap(0, Ordering::AcqRel))
    }
}

impl Default for ExecState {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyPort for ExecState {
    fn request_safety_door(&self) {
        self.set(ExecFlag::SafetyDoor);
    }
}

/// Snapshot of drained flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecFlags(pub u8);

impl ExecFlags {
    pub fn contains(self, flag: ExecFlag) -> bool {
        self.0 & flag.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ExecFlag> {
        ExecFlag::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}
