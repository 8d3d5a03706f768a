//! Application core: pure domain logic, zero I/O.
//!
//! Boot sequencing and the foreground control API live in [`service`];
//! everything that touches a peripheral goes through the port traits in
//! [`ports`], keeping this layer testable without real hardware.

pub mod events;
pub mod ports;
pub mod service;
