//! Outbound board events.
//!
//! The [`TickDispatcher`](crate::tick::TickDispatcher) and
//! [`BoardService`](super::service::BoardService) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  The console adapter turns
//! them into the line-oriented diagnostic text the host software parses.

use crate::control_pins::SwitchStates;

/// Structured events emitted by the board core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardEvent {
    /// Spindle current crossed the trip threshold; a safety-door request
    /// has been raised.  Carries the filtered current in amps.
    OverCurrent { amps: f32 },

    /// Manufacturing switch-state dump.
    SwitchStates(SwitchStates),

    /// Board bring-up completed on the given hardware revision.
    Started { hardware_rev: u8 },
}
