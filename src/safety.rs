//! Spindle over-current supervisor.
//!
//! Fed one filtered current sample per tick.  It reports an excursion
//! exactly once, on the first sample above the trip threshold, then stays
//! latched until the current falls below `threshold - hysteresis`.  A
//! spindle hovering around the limit therefore raises one safety-door
//! request, not one per tick.
//!
//! ## Fault lifecycle
//!
//! 1. Current rises above `trip_amps` → `evaluate()` returns `true` once.
//! 2. The tick dispatcher prints the diagnostic line and raises the
//!    safety-door request.
//! 3. While latched, further high samples return `false`.
//! 4. Current drops below `rearm_amps` → the monitor re-arms.

use crate::config::BoardConfig;

/// Threshold/hysteresis over-current detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverCurrentMonitor {
    trip_amps: f32,
    rearm_amps: f32,
    /// Set while an excursion is in progress.
    tripped: bool,
    /// Number of excursions since boot.
    trips: u32,
}

impl OverCurrentMonitor {
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_limits(
            config.over_current_amps,
            config.over_current_hysteresis_amps,
        )
    }

    pub fn with_limits(trip_amps: f32, hysteresis_amps: f32) -> Self {
        Self {
            trip_amps,
            rearm_amps: trip_amps - hysteresis_amps,
            tripped: false,
            trips: 0,
        }
    }

    /// Evaluate one sample.  Returns `true` on the rising edge of an
    /// excursion only.
    pub fn evaluate(&mut self, amps: f32) -> bool {
        if self.tripped {
            if amps < self.rearm_amps {
                self.tripped = false;
            }
            return false;
        }

        if amps > self.trip_amps {
            self.tripped = true;
            self.trips = self.trips.saturating_add(1);
            return true;
        }

        false
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    pub fn trip_count(&self) -> u32 {
        self.trips
    }

    pub fn trip_amps(&self) -> f32 {
        self.trip_amps
    }
}
