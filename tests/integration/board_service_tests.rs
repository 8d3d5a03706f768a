//! Integration tests for the BoardService → TickDispatcher → ports chain.
//!
//! These run on the host and walk the service through boot, machine-state
//! indication, spindle control, and the safety-door path.

use carvin::app::events::BoardEvent;
use carvin::app::service::{BoardService, MachineState};
use carvin::config::BoardConfig;
use carvin::control_pins::SwitchStates;
use carvin::drivers::button::EdgeLatch;
use carvin::exec_state::{ExecFlag, ExecState};
use carvin::pwm::{ChannelId, LED_FULL_ON};

use super::mock_hw::{CollectingSink, MockHardware};

fn make_service(config: BoardConfig) -> (BoardService, MockHardware, CollectingSink) {
    let mut svc = BoardService::new(config);
    let hw = MockHardware::new();
    let mut sink = CollectingSink::default();
    svc.start(2, &mut sink);
    (svc, hw, sink)
}

fn run(
    svc: &mut BoardService,
    hw: &mut MockHardware,
    sink: &mut CollectingSink,
    exec: &ExecState,
    ticks: u32,
) {
    for _ in 0..ticks {
        svc.tick(hw, sink, exec);
    }
}

#[test]
fn boot_announces_revision() {
    let (svc, _hw, sink) = make_service(BoardConfig::default());
    assert!(svc.is_started());
    assert_eq!(sink.events, vec![BoardEvent::Started { hardware_rev: 2 }]);
    assert_eq!(sink.lines(), vec!["[Carvin rev:2]\r\n".to_string()]);
}

#[test]
fn boot_fades_button_and_door_leds() {
    let exec = ExecState::new();
    let (mut svc, mut hw, mut sink) = make_service(BoardConfig::default());

    // Door: 60 steps, one every 4 ticks.  Button: 200 steps every 3.
    run(&mut svc, &mut hw, &mut sink, &exec, 1 + 59 * 4);
    assert_eq!(hw.last_duty(ChannelId::DoorLed), Some(60));
    assert!(hw.last_duty(ChannelId::ButtonLed) < Some(200));

    run(&mut svc, &mut hw, &mut sink, &exec, 1 + 199 * 3);
    assert_eq!(hw.last_duty(ChannelId::ButtonLed), Some(200));
    assert!(hw.duties(ChannelId::SpindleMotor).is_empty());
}

#[test]
fn spindle_soft_start_with_light() {
    let exec = ExecState::new();
    let (mut svc, mut hw, mut sink) = make_service(BoardConfig::default());
    svc.set_spindle(100);

    run(&mut svc, &mut hw, &mut sink, &exec, 1);
    assert_eq!(hw.compare_calls(ChannelId::SpindleMotor), vec![true]);
    assert_eq!(hw.last_duty(ChannelId::SpindleMotor), Some(1));

    run(&mut svc, &mut hw, &mut sink, &exec, 99 * 4);
    assert_eq!(hw.last_duty(ChannelId::SpindleMotor), Some(100));
    assert_eq!(svc.channel_level(ChannelId::SpindleMotor), 100);

    run(&mut svc, &mut hw, &mut sink, &exec, 155 * 4);
    assert_eq!(hw.last_duty(ChannelId::SpindleLed), Some(LED_FULL_ON));
}

#[test]
fn stop_spindle_cuts_on_next_tick() {
    let exec = ExecState::new();
    let (mut svc, mut hw, mut sink) = make_service(BoardConfig::default());
    svc.set_spindle(50);
    run(&mut svc, &mut hw, &mut sink, &exec, 100);
    hw.clear();

    svc.stop_spindle();
    run(&mut svc, &mut hw, &mut sink, &exec, 1);
    assert_eq!(hw.last_duty(ChannelId::SpindleMotor), Some(0));
    assert_eq!(hw.compare_calls(ChannelId::SpindleMotor), vec![false]);
    assert_eq!(hw.last_duty(ChannelId::SpindleLed), Some(0));
}

#[test]
fn hold_throbs_between_floor_and_full_on() {
    let exec = ExecState::new();
    let config = BoardConfig {
        button_led_throb_min: 20,
        button_led_throb_rate: 1,
        ..BoardConfig::default()
    };
    let (mut svc, mut hw, mut sink) = make_service(config);
    run(&mut svc, &mut hw, &mut sink, &exec, 700);
    hw.clear();

    svc.set_button_led(MachineState::Hold);
    run(&mut svc, &mut hw, &mut sink, &exec, 1000);

    let duties = hw.duties(ChannelId::ButtonLed);
    let first_peak = duties
        .iter()
        .position(|&d| d == LED_FULL_ON)
        .expect("throb must reach full on");
    let after_peak = &duties[first_peak..];
    assert!(after_peak.iter().all(|&d| d >= 20));
    assert!(after_peak.contains(&20));
    assert_eq!(svc.machine_state(), MachineState::Hold);
}

#[test]
fn repeated_hold_keeps_throb_phase() {
    let (mut svc, _hw, _sink) = make_service(BoardConfig::default());
    svc.set_button_led(MachineState::Hold);
    let before = *svc.dispatcher().channels().get(ChannelId::ButtonLed);
    svc.set_button_led(MachineState::SafetyDoor);
    assert_eq!(*svc.dispatcher().channels().get(ChannelId::ButtonLed), before);
}

#[test]
fn control_edge_debounces_with_configured_window() {
    let exec = ExecState::new();
    let config = BoardConfig {
        debounce_ticks: 4,
        ..BoardConfig::default()
    };
    let (mut svc, mut hw, mut sink) = make_service(config);

    svc.on_control_pin_edge();
    run(&mut svc, &mut hw, &mut sink, &exec, 3);
    svc.on_control_pin_edge();
    run(&mut svc, &mut hw, &mut sink, &exec, 3);
    assert_eq!(hw.control_checks, 0);
    run(&mut svc, &mut hw, &mut sink, &exec, 1);
    assert_eq!(hw.control_checks, 1);
}

#[test]
fn latched_edge_arms_debounce_on_next_tick() {
    let exec = ExecState::new();
    let latch = EdgeLatch::new();
    let config = BoardConfig {
        debounce_ticks: 3,
        ..BoardConfig::default()
    };
    let (mut svc, mut hw, mut sink) = make_service(config);

    let mut tick = |svc: &mut BoardService, hw: &mut MockHardware| {
        svc.poll_control_edge(&latch);
        svc.tick(hw, &mut sink, &exec);
    };

    // Two edges inside one period collapse into one arm.
    latch.signal();
    latch.signal();
    tick(&mut svc, &mut hw);
    tick(&mut svc, &mut hw);
    assert_eq!(hw.control_checks, 0);
    tick(&mut svc, &mut hw);
    assert_eq!(hw.control_checks, 1);

    for _ in 0..10 {
        tick(&mut svc, &mut hw);
    }
    assert_eq!(hw.control_checks, 1);
    assert!(!latch.take());
}

#[test]
fn switch_report_line() {
    let (svc, mut hw, mut sink) = make_service(BoardConfig::default());
    hw.switches = SwitchStates::new(0b0100, 0b0011, 0b0001);

    let states = svc.report_switch_states(&mut hw, &mut sink);
    assert_eq!(states, hw.switches);
    assert_eq!(
        sink.lines().last().map(String::as_str),
        Some("{Sw:Ctl:00000100,Lim:00000011,Prb:00000001}\r\n")
    );
}

#[test]
fn over_current_stops_spindle_via_exec_flags() {
    let exec = ExecState::new();
    let (mut svc, mut hw, mut sink) = make_service(BoardConfig::default());
    svc.set_spindle(200);
    svc.set_button_led(MachineState::Run);
    run(&mut svc, &mut hw, &mut sink, &exec, 50);

    hw.amps = 14.0;
    hw.trip_on_polls = vec![hw.polls + 1];
    run(&mut svc, &mut hw, &mut sink, &exec, 1);
    assert!(sink.lines().contains(&"[OverCurrent:14.00]\r\n".to_string()));

    let flags = exec.take_all();
    assert!(flags.contains(ExecFlag::SafetyDoor));
    assert_eq!(svc.handle_exec_flags(flags), MachineState::SafetyDoor);

    hw.clear();
    run(&mut svc, &mut hw, &mut sink, &exec, 1);
    assert_eq!(hw.last_duty(ChannelId::SpindleMotor), Some(0));
    assert_eq!(hw.compare_calls(ChannelId::SpindleMotor), vec![false]);
    assert!(svc.dispatcher().channels().get(ChannelId::ButtonLed).is_throbbing());
}

#[test]
fn json_overlay_reaches_the_service() {
    let config = BoardConfig::from_json(r#"{ "door_led_level_idle": 90 }"#).expect("valid overlay");
    let (svc, _hw, _sink) = make_service(config);
    assert_eq!(svc.dispatcher().channels().get(ChannelId::DoorLed).target(), 90);
    assert_eq!(svc.config().button_led_level_on, 200);
}
