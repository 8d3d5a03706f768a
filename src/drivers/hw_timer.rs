//! Animation tick timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer fires at `tick_period_us` and calls the registered
//! tick handler, which advances the LED/spindle channels, the debounce
//! countdown, and the current check.  On simulation targets a background
//! thread approximates the period with `thread::sleep`.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), at
//! the highest application priority.  The handler still has to be short:
//! it shares the CPU with step generation.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `fn()` passed to start_tick_timer().
    let on_tick: fn() = unsafe { core::mem::transmute::<*mut core::ffi::c_void, fn()>(arg) };
    on_tick();
}

/// Start the periodic animation tick.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_us: u32, on_tick: fn()) {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before the timer can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: on_tick as *mut _,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"carvin_tick".as_ptr(),
            // A late tick must not be replayed in a burst; fades just slow.
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tick timer create failed (rc={}), LEDs will not animate", ret);
            return;
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(period_us));
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return;
        }

        info!("hw_timer: tick started ({} us)", period_us);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(period_us: u32, on_tick: fn()) {
    use std::sync::atomic::Ordering;

    SIM_RUNNING.store(true, Ordering::Release);
    let period = std::time::Duration::from_micros(u64::from(period_us.max(1)));
    let spawned = std::thread::Builder::new()
        .name("carvin-tick".into())
        .spawn(move || {
            while SIM_RUNNING.load(Ordering::Acquire) {
                std::thread::sleep(period);
                on_tick();
            }
        });
    match spawned {
        Ok(_) => log::info!("hw_timer(sim): tick thread started ({} us)", period_us),
        Err(e) => log::error!("hw_timer(sim): tick thread spawn failed: {}", e),
    }
}

#[cfg(not(target_os = "espidf"))]
static SIM_RUNNING: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Stop the simulated tick thread.  On target the tick runs for the life
/// of the firmware.
#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {
    SIM_RUNNING.store(false, std::sync::atomic::Ordering::Release);
}
