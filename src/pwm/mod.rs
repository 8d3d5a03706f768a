//! Analog output animation engine.
//!
//! Each LED and the spindle motor are driven by a [`PwmChannel`]: a small
//! state record holding the applied duty level and where it is heading.
//! Foreground code arms a channel with [`PwmChannel::set`] (one-shot ramp)
//! or [`PwmChannel::throb`] (endless triangle between a floor and full-on);
//! the periodic tick then calls [`PwmChannel::advance`] once per channel to
//! move the level one step at a time.
//!
//! ```text
//!            set()                      reached target
//!   Idle ─────────────▶ Ramping ───────────────────────▶ Idle
//!     │
//!     │ throb()         level == FULL_ON
//!     └──────▶ Throb(up) ───────────────▶ Throb(down)
//!                  ▲                           │
//!                  └──── level <= throb_min ───┘
//! ```
//!
//! ## Ownership split
//!
//! | Field                              | Written by            |
//! |------------------------------------|-----------------------|
//! | `target`, `duration`, `throb*`     | Control API (foreground) |
//! | `current_level`, `dur_counter`     | `advance()` (tick)    |
//!
//! `throb()` also rewinds `current_level` to 0, and the advancer rewrites
//! `target` at throb reversals.  Both sides must therefore hold the
//! shared-state lock (see [`crate::shared`]) while touching a channel.

pub mod bank;

pub use bank::{ChannelBank, ChannelId, ChannelSpec, CHANNEL_TABLE};

/// Highest duty level (8-bit LEDC resolution).
pub const LED_FULL_ON: u8 = u8::MAX;

/// One analog output's animation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PwmChannel {
    current_level: u8,
    target: u8,
    /// Ticks per one-unit step; 0 = jump straight to target.
    duration: u16,
    /// Ticks left before the next step.
    dur_counter: u16,
    throb: bool,
    throb_min: u8,
}

impl PwmChannel {
    /// A zeroed, idle channel at level 0.
    pub const fn new() -> Self {
        Self {
            current_level: 0,
            target: 0,
            duration: 0,
            dur_counter: 0,
            throb: false,
            throb_min: 0,
        }
    }

    /// Reset every field to zero.
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Arm a one-shot ramp toward `target_level`.
    ///
    /// The current level and step counter are left alone so a ramp armed
    /// mid-fade continues from wherever the output is right now.
    pub fn set(&mut self, target_level: u8, duration_ticks: u16) {
        self.duration = duration_ticks;
        self.throb = false;
        self.target = target_level;
    }

    /// Arm an endless fade between `min_level` and [`LED_FULL_ON`],
    /// starting from 0.
    pub fn throb(&mut self, min_level: u8, duration_ticks: u16) {
        self.current_level = 0;
        self.duration = duration_ticks;
        self.throb = true;
        self.target = LED_FULL_ON;
        self.throb_min = min_level;
    }

    /// Advance the channel by one tick.  Returns `true` when
    /// `current_level` changed and the output register needs rewriting.
    pub fn advance(&mut self) -> bool {
        if self.current_level == self.target {
            return false;
        }

        if self.duration == 0 {
            self.current_level = self.target;
            return true;
        }

        if self.dur_counter > 1 {
            self.dur_counter -= 1;
            return false;
        }

        if self.current_level < self.target {
            self.current_level += 1;
            if self.throb && self.current_level == LED_FULL_ON {
                self.target = self.throb_min;
            }
        } else {
            self.current_level -= 1;
            if self.throb && self.current_level <= self.throb_min {
                self.target = LED_FULL_ON;
            }
        }

        self.dur_counter = self.duration;
        true
    }

    pub fn level(&self) -> u8 {
        self.current_level
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn duration(&self) -> u16 {
        self.duration
    }

    pub fn is_throbbing(&self) -> bool {
        self.throb
    }

    pub fn throb_min(&self) -> u8 {
        self.throb_min
    }

    /// True once a one-shot ramp has landed.  A throbbing channel never
    /// settles.
    pub fn is_settled(&self) -> bool {
        !self.throb && self.current_level == self.target
    }
}
