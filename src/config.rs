//! Board configuration parameters
//!
//! All tunable parameters for the Carvin board support layer.  Durations
//! are in ticks of the periodic animation timer (`tick_period_us`).
//! A JSON overlay can be baked in at build time through the
//! `CARVIN_BOARD_CONFIG` environment variable; missing fields keep their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    // --- Timing ---
    /// Animation tick period (microseconds)
    pub tick_period_us: u32,

    // --- Button LED ---
    /// Steady brightness while the machine is ready
    pub button_led_level_on: u8,
    /// Ticks per brightness step when fading on
    pub button_led_rise_ticks: u16,
    /// Throb floor while in hold / door-open
    pub button_led_throb_min: u8,
    /// Ticks per brightness step while throbbing
    pub button_led_throb_rate: u16,

    // --- Door LED ---
    /// Brightness with the door closed
    pub door_led_level_idle: u8,
    pub door_led_rise_ticks: u16,

    // --- Spindle ---
    /// Ticks per duty step during spindle soft start
    pub spindle_ramp_ticks: u16,
    /// Spindle work-light brightness while the spindle runs
    pub spindle_led_level_on: u8,

    // --- Buttons ---
    /// Ticks a control input must stay stable before it is acted on
    pub debounce_ticks: u16,

    // --- Spindle current sense ---
    /// Trip threshold (amps)
    pub over_current_amps: f32,
    /// The monitor re-arms once current drops this far below the threshold
    pub over_current_hysteresis_amps: f32,
    /// Exponential moving-average weight of each new sample (0 < a <= 1)
    pub current_filter_alpha: f32,
    /// Shunt amplifier transfer (amps per volt at the ADC pin)
    pub current_sense_amps_per_volt: f32,
    /// ADC full-scale voltage
    pub adc_ref_volts: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_us: 2_000, // 500 Hz

            // Button LED
            button_led_level_on: 200,
            button_led_rise_ticks: 3,
            button_led_throb_min: 20,
            button_led_throb_rate: 2,

            // Door LED
            door_led_level_idle: 60,
            door_led_rise_ticks: 4,

            // Spindle
            spindle_ramp_ticks: 4, // ~2 s from stop to full
            spindle_led_level_on: 255,

            // Buttons
            debounce_ticks: 16, // 32 ms

            // Current sense
            over_current_amps: 12.0,
            over_current_hysteresis_amps: 1.5,
            current_filter_alpha: 0.25,
            current_sense_amps_per_volt: 5.0,
            adc_ref_volts: 3.1,
        }
    }
}

impl BoardConfig {
    /// Parse a JSON overlay on top of the defaults and validate the result.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations the tick engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.tick_period_us == 0 {
            return Err(Error::Config("tick period must be non-zero"));
        }
        if self.debounce_ticks == 0 {
            return Err(Error::Config("debounce must be at least one tick"));
        }
        if self.button_led_throb_min >= crate::pwm::LED_FULL_ON {
            return Err(Error::Config("button throb floor must be below full-on"));
        }
        if self.button_led_throb_rate == 0 {
            return Err(Error::Config("throb rate must be non-zero"));
        }
        if self.over_current_amps.is_nan() || self.over_current_amps <= 0.0 {
            return Err(Error::Config("over-current threshold must be positive"));
        }
        if self.over_current_hysteresis_amps.is_nan()
            || self.over_current_hysteresis_amps < 0.0
            || self.over_current_hysteresis_amps >= self.over_current_amps
        {
            return Err(Error::Config("hysteresis must be within the threshold"));
        }
        if !(0.0..=1.0).contains(&self.current_filter_alpha) || self.current_filter_alpha == 0.0 {
            return Err(Error::Config("filter alpha must be in (0, 1]"));
        }
        if self.current_sense_amps_per_volt.is_nan()
            || self.current_sense_amps_per_volt <= 0.0
            || self.adc_ref_volts.is_nan()
            || self.adc_ref_volts <= 0.0
        {
            return Err(Error::Config("current sense scaling must be positive"));
        }
        Ok(())
    }

    /// Tick rate in Hz, rounded down.
    pub fn tick_hz(&self) -> u32 {
        1_000_000 / self.tick_period_us.max(1)
    }

    /// Convert milliseconds to whole ticks, at least one.
    pub fn ms_to_ticks(&self, ms: u32) -> u16 {
        let ticks = (u64::from(ms) * 1_000 / u64::from(self.tick_period_us.max(1))).max(1);
        ticks.min(u64::from(u16::MAX)) as u16
    }
}
