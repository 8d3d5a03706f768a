//! Board service: the hexagonal core.
//!
//! [`BoardService`] owns the [`TickDispatcher`] and the board
//! configuration.  It exposes the hardware-agnostic API the rest of the
//! firmware uses: bring-up, machine-state indication on the button LED,
//! spindle control, the control-pin edge hook, and the periodic tick.
//! All I/O flows through port traits injected at call sites, so the whole
//! service runs against mock adapters on the host.
//!
//! ```text
//!  DutyOutput ◀──┐ ┌──────────────────────────┐
//!  CurrentMonitor ┼─│      BoardService        │──▶ EventSink
//!  ControlPins ◀──┘ │  TickDispatcher · LEDs   │──▶ SafetyPort
//!                   └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::BoardConfig;
use crate::control_pins::SwitchStates;
use crate::drivers::board_id;
use crate::drivers::button::EdgeLatch;
use crate::exec_state::{ExecFlag, ExecFlags};
use crate::pwm::ChannelId;
use crate::tick::{TickDispatcher, TickReport};

use super::events::BoardEvent;
use super::ports::{ControlPins, CurrentMonitor, DutyOutput, EventSink, SafetyPort};

/// What the machine is doing, as far as the indicators care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MachineState {
    #[default]
    Idle,
    Run,
    Hold,
    SafetyDoor,
}

impl MachineState {
    /// States in which the operator must act before motion resumes.
    pub fn needs_attention(self) -> bool {
        matches!(self, MachineState::Hold | MachineState::SafetyDoor)
    }
}

/// The board service orchestrates the indicators and the spindle.
pub struct BoardService {
    config: BoardConfig,
    dispatcher: TickDispatcher,
    hardware_rev: Option<u8>,
    machine_state: MachineState,
    spindle_level: u8,
}

impl BoardService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the channels; call [`start`](Self::start) next.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            dispatcher: TickDispatcher::new(),
            hardware_rev: None,
            machine_state: MachineState::Idle,
            spindle_level: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Zero every channel, fade the button LED on and the door LED to its
    /// idle level, and announce the board revision.
    pub fn start(&mut self, hardware_rev: u8, sink: &mut impl EventSink) {
        self.hardware_rev = Some(hardware_rev);
        self.machine_state = MachineState::Idle;
        self.spindle_level = 0;

        let channels = self.dispatcher.channels_mut();
        channels.init_all();
        channels.set(
            ChannelId::ButtonLed,
            self.config.button_led_level_on,
            self.config.button_led_rise_ticks,
        );
        channels.set(
            ChannelId::DoorLed,
            self.config.door_led_level_idle,
            self.config.door_led_rise_ticks,
        );

        sink.emit(&BoardEvent::Started { hardware_rev });
        info!(
            "BoardService started: hardware rev {} (current sense {})",
            hardware_rev,
            if board_id::has_current_sense(hardware_rev) { "fitted" } else { "absent" },
        );
    }

    pub fn is_started(&self) -> bool {
        self.hardware_rev.is_some()
    }

    // ── Indicators ────────────────────────────────────────────

    /// Show the machine state on the button LED: throb while the operator
    /// has to act, steady on otherwise.
    pub fn set_button_led(&mut self, state: MachineState) {
        self.machine_state = state;
        let channels = self.dispatcher.channels_mut();
        if state.needs_attention() {
            // Already throbbing: leave the phase alone.
            if !channels.get(ChannelId::ButtonLed).is_throbbing() {
                channels.throb(
                    ChannelId::ButtonLed,
                    self.config.button_led_throb_min,
                    self.config.button_led_throb_rate,
                );
            }
        } else {
            channels.set(
                ChannelId::ButtonLed,
                self.config.button_led_level_on,
                self.config.button_led_rise_ticks,
            );
        }
    }

    // ── Spindle ───────────────────────────────────────────────

    /// Soft-start (or slow) the spindle to `level`.  The spindle work
    /// light follows: on while the spindle turns, off when commanded to 0.
    pub fn set_spindle(&mut self, level: u8) {
        self.spindle_level = level;
        let ramp = self.config.spindle_ramp_ticks;
        let light = if level == 0 { 0 } else { self.config.spindle_led_level_on };
        let channels = self.dispatcher.channels_mut();
        channels.set(ChannelId::SpindleMotor, level, ramp);
        channels.set(ChannelId::SpindleLed, light, ramp);
    }

    /// Cut the spindle and its light on the next tick, no ramp.
    pub fn stop_spindle(&mut self) {
        self.spindle_level = 0;
        let channels = self.dispatcher.channels_mut();
        channels.set(ChannelId::SpindleMotor, 0, 0);
        channels.set(ChannelId::SpindleLed, 0, 0);
    }

    // ── Executor requests ─────────────────────────────────────

    /// React to drained executor flags and return the resulting state.
    /// Reset and safety-door both stop the spindle immediately.
    pub fn handle_exec_flags(&mut self, flags: ExecFlags) -> MachineState {
        for flag in flags.iter() {
            let next = match flag {
                ExecFlag::SafetyDoor => {
                    warn!("safety door: spindle stopped");
                    self.stop_spindle();
                    MachineState::SafetyDoor
                }
                ExecFlag::Reset => {
                    info!("reset: spindle stopped");
                    self.stop_spindle();
                    MachineState::Idle
                }
                ExecFlag::FeedHold if self.machine_state != MachineState::SafetyDoor => {
                    MachineState::Hold
                }
                ExecFlag::CycleStart if self.machine_state.needs_attention() => {
                    MachineState::Run
                }
                _ => continue,
            };
            self.set_button_led(next);
        }
        self.machine_state
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// A control input changed level: (re)start the debounce window.
    pub fn on_control_pin_edge(&mut self) {
        self.dispatcher.arm_debounce(self.config.debounce_ticks);
    }

    /// Tick side of the edge ISR: arm the debounce if `latch` was set
    /// since the last call.
    pub fn poll_control_edge(&mut self, latch: &EdgeLatch) -> bool {
        let edge = latch.take();
        if edge {
            self.on_control_pin_edge();
        }
        edge
    }

    /// Run one timer period.  See [`TickDispatcher::tick`].
    pub fn tick<H, E, S>(&mut self, hw: &mut H, sink: &mut E, safety: &S) -> TickReport
    where
        H: DutyOutput + CurrentMonitor + ControlPins,
        E: EventSink,
        S: SafetyPort + ?Sized,
    {
        self.dispatcher.tick(hw, sink, safety)
    }

    /// Manufacturing aid: emit the raw control, limit, and probe port
    /// values as a diagnostic line.
    pub fn report_switch_states(
        &self,
        hw: &mut impl ControlPins,
        sink: &mut impl EventSink,
    ) -> SwitchStates {
        let states = hw.switch_states();
        sink.emit(&BoardEvent::SwitchStates(states));
        states
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &TickDispatcher {
        &self.dispatcher
    }

    pub fn hardware_rev(&self) -> Option<u8> {
        self.hardware_rev
    }

    pub fn machine_state(&self) -> MachineState {
        self.machine_state
    }

    /// Commanded spindle level (the ramp may still be under way).
    pub fn spindle_level(&self) -> u8 {
        self.spindle_level
    }

    /// Current output level of one channel.
    pub fn channel_level(&self, id: ChannelId) -> u8 {
        self.dispatcher.channels().get(id).level()
    }
}
