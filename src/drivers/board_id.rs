//! Hardware revision straps.
//!
//! Five inputs are hardwired to GND or 3V3; every board revision gets a
//! new pattern.  The pins are read with pull-ups enabled, so an
//! unconnected or 3V3 strap reads high.  Revision bits are the inverted
//! levels: a grounded strap is a 1.
//!
//! | Rev | Straps (bit4..bit0) grounded |
//! |-----|------------------------------|
//! | 0   | none (all pulled high)       |
//! | 1   | bit0                         |
//! | 2   | bit1                         |
//!
//! Revision 1 and later carry the spindle current-sense circuit.

use embedded_hal::digital::InputPin;

/// Number of ID straps.
pub const HW_ID_BITS: usize = 5;
const HW_ID_MASK: u8 = (1 << HW_ID_BITS) - 1;

/// First revision fitted with spindle current sensing.
pub const CURRENT_SENSE_MIN_REV: u8 = 1;

/// Convert raw strap levels (bit set = pin high) into a revision number.
pub fn decode_hardware_rev(raw_levels: u8) -> u8 {
    (raw_levels & HW_ID_MASK) ^ HW_ID_MASK
}

/// Read the straps, LSB first, and decode them.
pub fn read_hardware_rev<P: InputPin>(straps: &mut [P; HW_ID_BITS]) -> Result<u8, P::Error> {
    let mut raw = 0u8;
    for (bit, pin) in straps.iter_mut().enumerate() {
        if pin.is_high()? {
            raw |= 1 << bit;
        }
    }
    Ok(decode_hardware_rev(raw))
}

pub fn has_current_sense(hardware_rev: u8) -> bool {
    hardware_rev >= CURRENT_SENSE_MIN_REV
}
