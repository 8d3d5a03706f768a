//! Spindle motor current sense.
//!
//! A shunt amplifier on the spindle power stage feeds an ADC input.  Each
//! poll converts one raw sample to amps, smooths it with an exponential
//! moving average, and hands it to the [`OverCurrentMonitor`].
//!
//! Revision 0 boards have no sense circuit.  The sensor is built disabled
//! on those and never reports an over-current.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: samples ADC1 via hw_init.
//! On host/test: samples come from [`SpindleCurrentSensor::poll_raw`].

use crate::app::ports::CurrentMonitor;
use crate::config::BoardConfig;
use crate::drivers::hw_init;
use crate::pins;
use crate::safety::OverCurrentMonitor;

pub struct SpindleCurrentSensor {
    enabled: bool,
    volts_per_count: f32,
    amps_per_volt: f32,
    alpha: f32,
    filtered_amps: f32,
    monitor: OverCurrentMonitor,
}

impl SpindleCurrentSensor {
    pub fn new(config: &BoardConfig, enabled: bool) -> Self {
        Self {
            enabled,
            volts_per_count: config.adc_ref_volts / f32::from(pins::ADC_FULL_SCALE),
            amps_per_volt: config.current_sense_amps_per_volt,
            alpha: config.current_filter_alpha,
            filtered_amps: 0.0,
            monitor: OverCurrentMonitor::new(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Convert a raw ADC count to amps (unfiltered).
    pub fn raw_to_amps(&self, raw: u16) -> f32 {
        f32::from(raw.min(pins::ADC_FULL_SCALE)) * self.volts_per_count * self.amps_per_volt
    }

    /// Feed one raw sample.  Returns `true` on the rising edge of an
    /// over-current excursion.
    pub fn poll_raw(&mut self, raw: u16) -> bool {
        if !self.enabled {
            return false;
        }
        let amps = self.raw_to_amps(raw);
        self.filtered_amps += self.alpha * (amps - self.filtered_amps);
        self.monitor.evaluate(self.filtered_amps)
    }

    pub fn monitor(&self) -> &OverCurrentMonitor {
        &self.monitor
    }
}

impl CurrentMonitor for SpindleCurrentSensor {
    fn over_current(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let raw = hw_init::adc1_read(pins::SPINDLE_CURRENT_ADC_CHANNEL);
        self.poll_raw(raw)
    }

    fn current_amps(&self) -> f32 {
        self.filtered_amps
    }
}
