//! Fuzz target: `BoardConfig::from_json`
//!
//! Feeds arbitrary bytes to the build-time config overlay parser and
//! verifies:
//! - No panics on malformed JSON or out-of-range values
//! - Anything accepted also passes `validate()` and converts ticks sanely
//!
//! cargo fuzz run fuzz_board_config

#![no_main]

use carvin::config::BoardConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = BoardConfig::from_json(text) else {
        return;
    };

    assert!(config.validate().is_ok(), "accepted config fails validation");
    assert!(config.ms_to_ticks(0) >= 1);
    assert!(config.ms_to_ticks(u32::MAX) >= 1);
});
