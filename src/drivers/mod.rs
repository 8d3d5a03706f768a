//! Peripheral bring-up, the tick timer, and small input drivers.

pub mod board_id;
pub mod button;
pub mod hw_init;
pub mod hw_timer;
