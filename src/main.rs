//! Carvin firmware entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                          ConsoleSink          │
//! │  (DutyOutput + CurrentMonitor + ControlPins)  (EventSink)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            BoardService (pure logic)                   │    │
//! │  │  TickDispatcher · PWM channels · debounce              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer tick ─▶ RUNTIME ◀─ foreground loop ◀─ EXEC_STATE    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use carvin::adapters::console::ConsoleSink;
use carvin::adapters::hardware::{HardwareAdapter, StrapPin};
use carvin::app::service::BoardService;
use carvin::config::BoardConfig;
use carvin::drivers::button::CONTROL_EDGE;
use carvin::drivers::{board_id, hw_init, hw_timer};
use carvin::exec_state::ExecState;
use carvin::sensors::SpindleCurrentSensor;
use carvin::shared::Shared;

/// Foreground poll period.  Channel animation runs on the timer, so this
/// only bounds console latency and executor reaction time.
const FOREGROUND_POLL: Duration = Duration::from_millis(10);

/// Everything the tick timer and the foreground loop share.
struct Runtime {
    service: BoardService,
    hw: HardwareAdapter,
    console: ConsoleSink,
}

static RUNTIME: Shared<Runtime> = Shared::new();
static EXEC_STATE: ExecState = ExecState::new();

/// esp_timer task context, once per `tick_period_us`.
fn on_tick() {
    RUNTIME.with(|rt| {
        let Runtime { service, hw, console } = rt;
        service.poll_control_edge(&CONTROL_EDGE);
        service.tick(hw, console, &EXEC_STATE);
    });
}

/// GPIO ISR: any control input changed level.  Lock-free; the tick arms
/// the debounce.
fn on_control_edge() {
    CONTROL_EDGE.signal();
}

fn load_config() -> BoardConfig {
    match option_env!("CARVIN_BOARD_CONFIG") {
        Some(json) => match BoardConfig::from_json(json) {
            Ok(cfg) => {
                info!("Config: build-time overlay applied");
                cfg
            }
            Err(e) => {
                warn!("Config: overlay rejected ({}), using defaults", e);
                BoardConfig::default()
            }
        },
        None => BoardConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Carvin board support v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(carvin::Error::from)?;
    let config = load_config();

    let hardware_rev = match board_id::read_hardware_rev(&mut StrapPin::all()) {
        Ok(rev) => rev,
        Err(never) => match never {},
    };

    // ── 3. Adapters + service ─────────────────────────────────
    let sensor = SpindleCurrentSensor::new(&config, board_id::has_current_sense(hardware_rev));
    let mut hw = HardwareAdapter::new(sensor, &EXEC_STATE);
    let mut console = ConsoleSink::new();
    let mut service = BoardService::new(config.clone());

    service.start(hardware_rev, &mut console);
    service.report_switch_states(&mut hw, &mut console);

    RUNTIME.install(Runtime { service, hw, console });

    // ── 4. Interrupt sources ──────────────────────────────────
    hw_timer::start_tick_timer(config.tick_period_us, on_tick);
    if let Err(e) = hw_init::init_isr_service(on_control_edge) {
        log::error!("ISR service init failed: {}, control buttons inactive", e);
    }

    info!("System ready. Entering foreground loop.");

    // ── 5. Foreground loop ────────────────────────────────────
    loop {
        // Format under the lock, print outside it.
        if let Some((lines, dropped)) = RUNTIME.with(|rt| rt.console.take_lines()) {
            for line in lines.iter() {
                print!("{}", line);
            }
            if dropped > 0 {
                warn!("console: {} diagnostic line(s) dropped", dropped);
            }
        }

        let flags = EXEC_STATE.take_all();
        if !flags.is_empty() {
            if let Some(state) = RUNTIME.with(|rt| rt.service.handle_exec_flags(flags)) {
                info!("Machine state: {:?}", state);
            }
        }

        std::thread::sleep(FOREGROUND_POLL);
    }
}
