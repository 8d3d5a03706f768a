//! Port traits: the hexagonal boundary between the tick engine and the
//! board's peripherals.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TickDispatcher / BoardService
//! ```
//!
//! Driven adapters (LEDC outputs, current sense, control pins, console)
//! implement these traits.  [`TickDispatcher`](crate::tick::TickDispatcher)
//! and [`BoardService`](super::service::BoardService) consume them via
//! generics, so the animation core never touches hardware directly and
//! runs unchanged against recording mocks on the host.
//!
//! Every method here may be called from the tick context and must be
//! bounded and non-blocking.

use crate::control_pins::SwitchStates;
use crate::pwm::ChannelId;

// ───────────────────────────────────────────────────────────────
// Duty output port (driven adapter: tick → PWM hardware)
// ───────────────────────────────────────────────────────────────

/// Physical duty registers, one per animated channel.
pub trait DutyOutput {
    /// Write the 0–255 duty level to the channel's compare register.
    fn write_duty(&mut self, channel: ChannelId, level: u8);

    /// Connect or disconnect the compare unit from the pin.  Only called
    /// for channels flagged `gate_on_zero`; disconnected pins are held low.
    fn set_compare_output(&mut self, channel: ChannelId, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Current monitor port (driven adapter: ADC → tick)
// ───────────────────────────────────────────────────────────────

/// Spindle current supervision, polled once per tick.
pub trait CurrentMonitor {
    /// Sample the sense input and report whether the spindle current has
    /// crossed the trip threshold since the last poll.
    fn over_current(&mut self) -> bool;

    /// Last sensed (filtered) spindle current in amps.
    fn current_amps(&self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Control pin port (driven adapter: GPIO → tick)
// ───────────────────────────────────────────────────────────────

/// Physical control buttons, limit switches, and probe.
pub trait ControlPins {
    /// Debounce expired: examine the control buttons and act on them.
    fn check_control_pins(&mut self);

    /// Raw masked port values for the manufacturing switch report.
    fn switch_states(&mut self) -> SwitchStates;
}

// ───────────────────────────────────────────────────────────────
// Safety port (driven adapter: tick → executor)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget request to enter the safety-stop/door state.
pub trait SafetyPort {
    fn request_safety_door(&self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostic text)
// ───────────────────────────────────────────────────────────────

/// The tick engine emits structured [`BoardEvent`](super::events::BoardEvent)s
/// through this port.  Adapters decide how they reach the operator.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::BoardEvent);
}
