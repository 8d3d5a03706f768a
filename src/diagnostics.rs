//! Diagnostic text lines.
//!
//! The host software scrapes these from the serial console, so the format
//! is fixed:
//!
//! | Event         | Line                                           |
//! |---------------|------------------------------------------------|
//! | Over-current  | `[OverCurrent:12.34]`                          |
//! | Switch report | `{Sw:Ctl:00000100,Lim:01110000,Prb:00001000}`  |
//! | Boot          | `[Carvin rev:3]`                               |
//!
//! Every line ends in CRLF.  Formatting is done into fixed-capacity
//! `heapless` strings so it can run without the allocator.

use core::fmt::Write;

use crate::app::events::BoardEvent;
use crate::control_pins::SwitchStates;

/// Longest line any event produces, CRLF included.
pub const MAX_LINE_LEN: usize = 64;

pub type Line = heapless::String<MAX_LINE_LEN>;

/// Render an event as its diagnostic line.
pub fn format_event(event: &BoardEvent) -> Line {
    match event {
        BoardEvent::OverCurrent { amps } => format_over_current(*amps),
        BoardEvent::SwitchStates(states) => format_switch_states(states),
        BoardEvent::Started { hardware_rev } => {
            let mut line = Line::new();
            let _ = write!(line, "[Carvin rev:{}]\r\n", hardware_rev);
            line
        }
    }
}

/// `[OverCurrent:<amps, 2 decimals>]` CRLF.
pub fn format_over_current(amps: f32) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "[OverCurrent:{:.2}]\r\n", amps);
    line
}

/// `{Sw:Ctl:bbbbbbbb,Lim:bbbbbbbb,Prb:bbbbbbbb}` CRLF.
pub fn format_switch_states(states: &SwitchStates) -> Line {
    let mut line = Line::new();
    let _ = write!(
        line,
        "{{Sw:Ctl:{:08b},Lim:{:08b},Prb:{:08b}}}\r\n",
        states.control, states.limit, states.probe
    );
    line
}
