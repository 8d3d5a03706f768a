//! GPIO / peripheral pin assignments for the Carvin controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Animated outputs (LEDC PWM)
// ---------------------------------------------------------------------------

/// Illuminated ring around the start/hold button.
pub const BUTTON_LED_GPIO: i32 = 1;
/// Enclosure door light.
pub const DOOR_LED_GPIO: i32 = 2;
/// Spindle work light.
pub const SPINDLE_LED_GPIO: i32 = 3;
/// Spindle motor power stage gate.
pub const SPINDLE_PWM_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Hardware revision ID straps
// ---------------------------------------------------------------------------

/// Five inputs hardwired to GND or 3V3 per board revision, LSB first.
/// Read with internal pull-ups; a grounded strap is a 1 bit.
pub const HW_ID_GPIOS: [i32; 5] = [38, 39, 40, 41, 42];

// ---------------------------------------------------------------------------
// Control buttons (active-low with pull-ups)
// ---------------------------------------------------------------------------

pub const CONTROL_RESET_GPIO: i32 = 10;
pub const CONTROL_FEED_HOLD_GPIO: i32 = 11;
pub const CONTROL_CYCLE_START_GPIO: i32 = 12;
pub const CONTROL_SAFETY_DOOR_GPIO: i32 = 13;

/// Control button pins, in `control_pins::CONTROL_*_BIT` order.
pub const CONTROL_GPIOS: [i32; 4] = [
    CONTROL_RESET_GPIO,
    CONTROL_FEED_HOLD_GPIO,
    CONTROL_CYCLE_START_GPIO,
    CONTROL_SAFETY_DOOR_GPIO,
];

// ---------------------------------------------------------------------------
// Limit switches and probe (reported by the switch-state dump)
// ---------------------------------------------------------------------------

pub const LIMIT_X_GPIO: i32 = 14;
pub const LIMIT_Y_GPIO: i32 = 15;
pub const LIMIT_Z_GPIO: i32 = 16;
pub const PROBE_GPIO: i32 = 17;

pub const LIMIT_GPIOS: [i32; 3] = [LIMIT_X_GPIO, LIMIT_Y_GPIO, LIMIT_Z_GPIO];

// ---------------------------------------------------------------------------
// Spindle current sense (ADC1)
// ---------------------------------------------------------------------------

/// Shunt amplifier output.  ADC1 channel 7 (GPIO 8 on ESP32-S3).
pub const SPINDLE_CURRENT_ADC_CHANNEL: u32 = 7;
/// Full-scale ADC count (12-bit).
pub const ADC_FULL_SCALE: u16 = 4095;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for the LEDs (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// LEDC frequency for the spindle power stage (25 kHz, inaudible).
pub const SPINDLE_PWM_FREQ_HZ: u32 = 25_000;
