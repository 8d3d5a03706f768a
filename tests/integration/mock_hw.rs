//! Mock hardware adapter for integration tests.
//!
//! Records every duty and compare-output call so tests can assert on the
//! full output history without touching real LEDC registers.

use std::cell::Cell;

use carvin::app::events::BoardEvent;
use carvin::app::ports::{ControlPins, CurrentMonitor, DutyOutput, EventSink, SafetyPort};
use carvin::control_pins::SwitchStates;
use carvin::diagnostics;
use carvin::pwm::ChannelId;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Duty { channel: ChannelId, level: u8 },
    Compare { channel: ChannelId, enabled: bool },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<OutputCall>,
    /// Amps reported by `current_amps`.
    pub amps: f32,
    /// Ticks (1-based poll count) on which `over_current` reports true.
    pub trip_on_polls: Vec<u32>,
    pub polls: u32,
    pub control_checks: u32,
    pub switches: SwitchStates,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            amps: 0.0,
            trip_on_polls: Vec::new(),
            polls: 0,
            control_checks: 0,
            switches: SwitchStates::default(),
        }
    }

    /// Duty levels written to `channel`, oldest first.
    pub fn duties(&self, channel: ChannelId) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                OutputCall::Duty { channel: ch, level } if ch == channel => Some(level),
                _ => None,
            })
            .collect()
    }

    pub fn last_duty(&self, channel: ChannelId) -> Option<u8> {
        self.duties(channel).last().copied()
    }

    /// Compare-output toggles for `channel`, oldest first.
    pub fn compare_calls(&self, channel: ChannelId) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                OutputCall::Compare { channel: ch, enabled } if ch == channel => Some(enabled),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl DutyOutput for MockHardware {
    fn write_duty(&mut self, channel: ChannelId, level: u8) {
        self.calls.push(OutputCall::Duty { channel, level });
    }

    fn set_compare_output(&mut self, channel: ChannelId, enabled: bool) {
        self.calls.push(OutputCall::Compare { channel, enabled });
    }
}

impl CurrentMonitor for MockHardware {
    fn over_current(&mut self) -> bool {
        self.polls += 1;
        self.trip_on_polls.contains(&self.polls)
    }

    fn current_amps(&self) -> f32 {
        self.amps
    }
}

impl ControlPins for MockHardware {
    fn check_control_pins(&mut self) {
        self.control_checks += 1;
    }

    fn switch_states(&mut self) -> SwitchStates {
        self.switches
    }
}

// ── MockSafety ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSafety {
    pub requests: Cell<u32>,
}

impl SafetyPort for MockSafety {
    fn request_safety_door(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

// ── CollectingSink ────────────────────────────────────────────

/// Event sink that keeps every event for later inspection.
#[derive(Default)]
pub struct CollectingSink {
    pub events: Vec<BoardEvent>,
}

#[allow(dead_code)]
impl CollectingSink {
    /// Diagnostic text for every collected event.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| diagnostics::format_event(e).as_str().to_owned())
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: &BoardEvent) {
        self.events.push(*event);
    }
}
