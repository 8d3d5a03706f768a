//! Carvin board support library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control_pins;
pub mod diagnostics;
pub mod error;
pub mod exec_state;
pub mod pins;
pub mod pwm;
pub mod safety;
pub mod shared;
pub mod tick;

// Hardware-facing modules compile on every target; the register access
// inside them is cfg-gated with host simulation stubs.
pub mod adapters;
pub mod drivers;
pub mod sensors;

pub use error::{Error, Result};
