//! Periodic tick dispatcher.
//!
//! Runs once per animation timer period.  It must finish well inside one
//! tick so it never disturbs step generation sharing the CPU: everything
//! here is bounded (four channels, one counter, one ADC sample) and
//! nothing blocks or logs.
//!
//! Per tick, in order:
//!
//! 1. Advance each channel; on a change write the new duty.  Channels
//!    flagged `gate_on_zero` additionally reconnect the compare output
//!    before a nonzero write, and disconnect it after the write of 0.  A
//!    duty update restarts the output, so the disconnect must come last.
//! 2. Count the button debounce down; on reaching zero run the
//!    control-pin check once.
//! 3. Poll the spindle current monitor; on an excursion emit the
//!    diagnostic event and raise the safety-door request.

use crate::app::events::BoardEvent;
use crate::app::ports::{ControlPins, CurrentMonitor, DutyOutput, EventSink, SafetyPort};
use crate::drivers::button::ButtonDebounce;
use crate::pwm::{ChannelBank, ChannelId};

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Bit `ChannelId::index()` set = that channel's duty was rewritten.
    pub changed: u8,
    pub debounce_fired: bool,
    /// Filtered spindle current, if an excursion started this tick.
    pub over_current: Option<f32>,
}

impl TickReport {
    pub fn channel_changed(&self, id: ChannelId) -> bool {
        self.changed & (1 << id.index()) != 0
    }
}

/// Owns the animated channels and the debounce countdown.
#[derive(Debug, Clone, Default)]
pub struct TickDispatcher {
    channels: ChannelBank,
    debounce: ButtonDebounce,
    ticks: u64,
}

impl TickDispatcher {
    pub const fn new() -> Self {
        Self {
            channels: ChannelBank::new(),
            debounce: ButtonDebounce::new(),
            ticks: 0,
        }
    }

    pub fn channels(&self) -> &ChannelBank {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut ChannelBank {
        &mut self.channels
    }

    pub fn debounce(&self) -> &ButtonDebounce {
        &self.debounce
    }

    /// Start (or restart) the control-pin debounce window.
    pub fn arm_debounce(&mut self, ticks: u16) {
        self.debounce.arm(ticks);
    }

    /// Ticks run since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Run one timer period.
    pub fn tick<H, E, S>(&mut self, hw: &mut H, events: &mut E, safety: &S) -> TickReport
    where
        H: DutyOutput + CurrentMonitor + ControlPins,
        E: EventSink,
        S: SafetyPort + ?Sized,
    {
        self.ticks = self.ticks.wrapping_add(1);
        let mut report = TickReport::default();

        // ── 1. Channel animation ─────────────────────────────────
        for (id, channel) in self.channels.iter_mut() {
            if !channel.advance() {
                continue;
            }
            let level = channel.level();
            let gated = id.spec().gate_on_zero;
            if gated && level != 0 {
                hw.set_compare_output(id, true);
            }
            hw.write_duty(id, level);
            if gated && level == 0 {
                hw.set_compare_output(id, false);
            }
            report.changed |= 1 << id.index();
        }

        // ── 2. Control button debounce ───────────────────────────
        if self.debounce.tick() {
            hw.check_control_pins();
            report.debounce_fired = true;
        }

        // ── 3. Spindle over-current ──────────────────────────────
        if hw.over_current() {
            let amps = hw.current_amps();
            events.emit(&BoardEvent::OverCurrent { amps });
            safety.request_safety_door();
            report.over_current = Some(amps);
        }

        report
    }
}
