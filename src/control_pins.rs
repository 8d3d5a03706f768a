//! Control button decoding and the manufacturing switch report.
//!
//! Control buttons, limit switches, and the probe are active-low inputs
//! with pull-ups.  Adapters pack the raw pin levels into a byte (bit set =
//! pin high) and this module decides what they mean.

use crate::exec_state::ExecFlag;

/// Bit positions in the packed control-port byte.
pub const CONTROL_RESET_BIT: u8 = 0;
pub const CONTROL_FEED_HOLD_BIT: u8 = 1;
pub const CONTROL_CYCLE_START_BIT: u8 = 2;
pub const CONTROL_SAFETY_DOOR_BIT: u8 = 3;
pub const CONTROL_MASK: u8 = 0b0000_1111;

pub const LIMIT_MASK: u8 = 0b0000_0111;
pub const PROBE_MASK: u8 = 0b0000_0001;

/// Which control buttons are currently pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPinState {
    pub reset: bool,
    pub feed_hold: bool,
    pub cycle_start: bool,
    pub safety_door: bool,
}

impl ControlPinState {
    /// Decode raw pin levels (bit set = high = released).
    pub fn from_raw(raw: u8) -> Self {
        let pressed = |bit: u8| raw & (1 << bit) == 0;
        Self {
            reset: pressed(CONTROL_RESET_BIT),
            feed_hold: pressed(CONTROL_FEED_HOLD_BIT),
            cycle_start: pressed(CONTROL_CYCLE_START_BIT),
            safety_door: pressed(CONTROL_SAFETY_DOOR_BIT),
        }
    }

    /// The executor request this combination asks for.  Reset beats
    /// everything; an open door beats hold, hold beats start.
    pub fn action(self) -> Option<ExecFlag> {
        if self.reset {
            Some(ExecFlag::Reset)
        } else if self.safety_door {
            Some(ExecFlag::SafetyDoor)
        } else if self.feed_hold {
            Some(ExecFlag::FeedHold)
        } else if self.cycle_start {
            Some(ExecFlag::CycleStart)
        } else {
            None
        }
    }
}

/// Masked raw port values, bit set = pin high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchStates {
    pub control: u8,
    pub limit: u8,
    pub probe: u8,
}

impl SwitchStates {
    pub fn new(control: u8, limit: u8, probe: u8) -> Self {
        Self {
            control: control & CONTROL_MASK,
            limit: limit & LIMIT_MASK,
            probe: probe & PROBE_MASK,
        }
    }
}

/// Pack pin levels into a byte, `levels[i]` → bit `i`.
pub fn pack_levels(levels: &[bool]) -> u8 {
    levels
        .iter()
        .take(8)
        .enumerate()
        .fold(0u8, |acc, (i, &high)| if high { acc | (1 << i) } else { acc })
}
