//! Sensor subsystem.
//!
//! The only analog input the board layer owns is the spindle current
//! sense; limit switches and the probe are plain GPIO handled by the
//! hardware adapter.

pub mod spindle_current;

pub use spindle_current::SpindleCurrentSensor;
