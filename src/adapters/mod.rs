//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                 |
//! |------------|----------------|-----------------------------|
//! | `hardware` | DutyOutput     | ESP32 LEDC channels         |
//! |            | CurrentMonitor | ADC1 spindle current sense  |
//! |            | ControlPins    | Control/limit/probe GPIOs   |
//! | `console`  | EventSink      | Serial diagnostic lines     |

pub mod console;
pub mod hardware;
