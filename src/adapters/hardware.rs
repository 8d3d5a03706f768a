//! Hardware adapter: bridges the board's peripherals to the port traits.
//!
//! Owns the [`SpindleCurrentSensor`] and a handle to the executor flags,
//! exposing LEDC outputs, current sense, and the control inputs through
//! [`DutyOutput`], [`CurrentMonitor`], and [`ControlPins`].  This is the
//! only module besides `drivers` that touches actual hardware.  On
//! non-espidf targets, the underlying `hw_init` calls are simulation stubs.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use crate::app::ports::{ControlPins, CurrentMonitor, DutyOutput};
use crate::control_pins::{ControlPinState, SwitchStates, pack_levels};
use crate::drivers::board_id::HW_ID_BITS;
use crate::drivers::hw_init;
use crate::exec_state::ExecState;
use crate::pins;
use crate::pwm::ChannelId;
use crate::sensors::SpindleCurrentSensor;

/// Concrete adapter that combines all tick-side hardware behind ports.
pub struct HardwareAdapter {
    current: SpindleCurrentSensor,
    exec: &'static ExecState,
}

impl HardwareAdapter {
    pub fn new(current: SpindleCurrentSensor, exec: &'static ExecState) -> Self {
        Self { current, exec }
    }

    pub fn current_sensor(&self) -> &SpindleCurrentSensor {
        &self.current
    }
}

fn read_port<const N: usize>(gpios: &[i32; N]) -> u8 {
    let mut levels = [false; N];
    for (level, &pin) in levels.iter_mut().zip(gpios) {
        *level = hw_init::gpio_read(pin);
    }
    pack_levels(&levels)
}

// ── DutyOutput implementation ─────────────────────────────────

impl DutyOutput for HardwareAdapter {
    fn write_duty(&mut self, channel: ChannelId, level: u8) {
        hw_init::ledc_set(channel.spec().ledc_channel, level);
    }

    fn set_compare_output(&mut self, channel: ChannelId, enabled: bool) {
        hw_init::ledc_gate(channel.spec().ledc_channel, enabled);
    }
}

// ── CurrentMonitor implementation ─────────────────────────────

impl CurrentMonitor for HardwareAdapter {
    fn over_current(&mut self) -> bool {
        self.current.over_current()
    }

    fn current_amps(&self) -> f32 {
        self.current.current_amps()
    }
}

// ── ControlPins implementation ────────────────────────────────

impl ControlPins for HardwareAdapter {
    fn check_control_pins(&mut self) {
        let state = ControlPinState::from_raw(read_port(&pins::CONTROL_GPIOS));
        if let Some(flag) = state.action() {
            self.exec.set(flag);
        }
    }

    fn switch_states(&mut self) -> SwitchStates {
        SwitchStates::new(
            read_port(&pins::CONTROL_GPIOS),
            read_port(&pins::LIMIT_GPIOS),
            read_port(&[pins::PROBE_GPIO]),
        )
    }
}

// ── Hardware ID strap pin ─────────────────────────────────────

/// One revision strap, read through the raw GPIO helpers.  Pull-ups are
/// configured by `hw_init::init_peripherals`.
pub struct StrapPin(pub i32);

impl StrapPin {
    pub fn all() -> [StrapPin; HW_ID_BITS] {
        pins::HW_ID_GPIOS.map(StrapPin)
    }
}

impl ErrorType for StrapPin {
    type Error = Infallible;
}

impl InputPin for StrapPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(hw_init::gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!hw_init::gpio_read(self.0))
    }
}
