//! Integration tests for the TickDispatcher → port pipeline.
//!
//! Drives the dispatcher against the recording mock and checks what
//! reaches the duty registers, the control-pin check, the event sink, and
//! the safety port.

use carvin::app::events::BoardEvent;
use carvin::exec_state::{ExecFlag, ExecState};
use carvin::pwm::ChannelId;
use carvin::tick::TickDispatcher;

use super::mock_hw::{CollectingSink, MockHardware, MockSafety, OutputCall};

struct Rig {
    dispatcher: TickDispatcher,
    hw: MockHardware,
    sink: CollectingSink,
    safety: MockSafety,
}

impl Rig {
    fn new() -> Self {
        Self {
            dispatcher: TickDispatcher::new(),
            hw: MockHardware::new(),
            sink: CollectingSink::default(),
            safety: MockSafety::default(),
        }
    }

    fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.dispatcher.tick(&mut self.hw, &mut self.sink, &self.safety);
        }
    }
}

// ── Channel output ────────────────────────────────────────────

#[test]
fn idle_channels_write_nothing() {
    let mut rig = Rig::new();
    rig.run(100);
    assert!(rig.hw.calls.is_empty());
}

#[test]
fn spindle_output_connects_before_first_nonzero_duty() {
    let mut rig = Rig::new();
    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 3, 0);
    rig.run(1);

    assert_eq!(
        rig.hw.calls,
        vec![
            OutputCall::Compare { channel: ChannelId::SpindleMotor, enabled: true },
            OutputCall::Duty { channel: ChannelId::SpindleMotor, level: 3 },
        ]
    );
}

#[test]
fn spindle_output_disconnects_at_zero() {
    let mut rig = Rig::new();
    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 3, 0);
    rig.run(1);
    rig.hw.clear();

    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 0, 0);
    rig.run(1);

    assert_eq!(
        rig.hw.calls,
        vec![
            OutputCall::Duty { channel: ChannelId::SpindleMotor, level: 0 },
            OutputCall::Compare { channel: ChannelId::SpindleMotor, enabled: false },
        ]
    );
}

#[test]
fn led_channels_never_touch_compare_output() {
    let mut rig = Rig::new();
    rig.dispatcher.channels_mut().set(ChannelId::ButtonLed, 5, 0);
    rig.run(1);
    rig.dispatcher.channels_mut().set(ChannelId::ButtonLed, 0, 0);
    rig.run(1);

    assert!(rig.hw.compare_calls(ChannelId::ButtonLed).is_empty());
    assert_eq!(rig.hw.duties(ChannelId::ButtonLed), vec![5, 0]);
}

#[test]
fn ramp_writes_every_step_once() {
    let mut rig = Rig::new();
    rig.dispatcher.channels_mut().set(ChannelId::ButtonLed, 200, 2);

    rig.run(2);
    assert_eq!(rig.hw.last_duty(ChannelId::ButtonLed), Some(1));
    rig.run(38);
    assert_eq!(rig.hw.last_duty(ChannelId::ButtonLed), Some(20));
    rig.run(360);
    assert_eq!(rig.hw.last_duty(ChannelId::ButtonLed), Some(200));

    let expected: Vec<u8> = (1..=200).collect();
    assert_eq!(rig.hw.duties(ChannelId::ButtonLed), expected);

    rig.run(50);
    assert_eq!(rig.hw.duties(ChannelId::ButtonLed).len(), 200);
}

#[test]
fn spindle_ramp_down_reaches_zero_and_disconnects() {
    let mut rig = Rig::new();
    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 4, 0);
    rig.run(1);
    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 0, 1);
    rig.run(10);

    assert_eq!(rig.hw.duties(ChannelId::SpindleMotor), vec![4, 3, 2, 1, 0]);
    // Reconnected before every nonzero duty, disconnected after the final 0.
    assert_eq!(
        rig.hw.compare_calls(ChannelId::SpindleMotor),
        vec![true, true, true, true, false]
    );
    assert_eq!(
        rig.hw.calls.last(),
        Some(&OutputCall::Compare { channel: ChannelId::SpindleMotor, enabled: false })
    );
}

#[test]
fn spindle_stays_disconnected_after_stop() {
    let mut rig = Rig::new();
    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 200, 0);
    rig.run(1);
    rig.dispatcher.channels_mut().set(ChannelId::SpindleMotor, 0, 0);
    rig.run(1);
    rig.hw.clear();

    // Nothing may rewrite the duty (and so restart the output) afterwards.
    rig.run(50);
    assert!(rig.hw.duties(ChannelId::SpindleMotor).is_empty());
    assert!(rig.hw.compare_calls(ChannelId::SpindleMotor).is_empty());
}

#[test]
fn channels_advance_independently() {
    let mut rig = Rig::new();
    let bank = rig.dispatcher.channels_mut();
    bank.set(ChannelId::ButtonLed, 10, 1);
    bank.set(ChannelId::DoorLed, 60, 0);
    rig.run(10);

    assert_eq!(rig.hw.last_duty(ChannelId::ButtonLed), Some(10));
    assert_eq!(rig.hw.duties(ChannelId::DoorLed), vec![60]);
    assert!(rig.hw.duties(ChannelId::SpindleLed).is_empty());
}

// ── Debounce ──────────────────────────────────────────────────

#[test]
fn debounce_checks_pins_on_the_nth_tick() {
    let mut rig = Rig::new();
    rig.dispatcher.arm_debounce(3);

    rig.run(2);
    assert_eq!(rig.hw.control_checks, 0);
    rig.run(1);
    assert_eq!(rig.hw.control_checks, 1);
    rig.run(20);
    assert_eq!(rig.hw.control_checks, 1);
}

#[test]
fn bounce_restarts_the_window() {
    let mut rig = Rig::new();
    rig.dispatcher.arm_debounce(3);
    rig.run(2);
    rig.dispatcher.arm_debounce(3);
    rig.run(2);
    assert_eq!(rig.hw.control_checks, 0);
    rig.run(1);
    assert_eq!(rig.hw.control_checks, 1);
}

#[test]
fn tick_report_flags_debounce_and_channels() {
    let mut rig = Rig::new();
    rig.dispatcher.arm_debounce(1);
    rig.dispatcher.channels_mut().set(ChannelId::DoorLed, 9, 0);

    let report = rig.dispatcher.tick(&mut rig.hw, &mut rig.sink, &rig.safety);
    assert!(report.debounce_fired);
    assert!(report.channel_changed(ChannelId::DoorLed));
    assert!(!report.channel_changed(ChannelId::ButtonLed));
    assert_eq!(report.over_current, None);
    assert_eq!(rig.dispatcher.tick_count(), 1);
}

// ── Over-current ──────────────────────────────────────────────

#[test]
fn over_current_emits_line_and_requests_safety_door() {
    let mut rig = Rig::new();
    rig.hw.amps = 13.25;
    rig.hw.trip_on_polls = vec![5];

    rig.run(4);
    assert!(rig.sink.events.is_empty());
    assert_eq!(rig.safety.requests.get(), 0);

    let report = rig.dispatcher.tick(&mut rig.hw, &mut rig.sink, &rig.safety);
    assert_eq!(report.over_current, Some(13.25));
    assert_eq!(rig.sink.events, vec![BoardEvent::OverCurrent { amps: 13.25 }]);
    assert_eq!(rig.sink.lines(), vec!["[OverCurrent:13.25]\r\n".to_string()]);
    assert_eq!(rig.safety.requests.get(), 1);

    rig.run(10);
    assert_eq!(rig.safety.requests.get(), 1);
}

#[test]
fn over_current_raises_exec_flag() {
    let exec = ExecState::new();
    let mut dispatcher = TickDispatcher::new();
    let mut hw = MockHardware::new();
    let mut sink = CollectingSink::default();
    hw.trip_on_polls = vec![1];

    dispatcher.tick(&mut hw, &mut sink, &exec);
    let flags = exec.take_all();
    assert!(flags.contains(ExecFlag::SafetyDoor));
    assert!(!flags.contains(ExecFlag::FeedHold));
}

#[test]
fn over_current_polled_every_tick() {
    let mut rig = Rig::new();
    rig.run(25);
    assert_eq!(rig.hw.polls, 25);
}
