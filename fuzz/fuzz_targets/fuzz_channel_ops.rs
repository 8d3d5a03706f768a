//! Fuzz target: channel operations under the tick dispatcher
//!
//! Interprets the input as a stream of `set` / `throb` / tick operations
//! against the four channels and verifies:
//! - No panics or arithmetic overflow
//! - Output levels move by at most one unit per tick unless duration is 0
//! - A throbbing channel never drops below its floor once it has peaked
//!
//! cargo fuzz run fuzz_channel_ops

#![no_main]

use carvin::pwm::{ChannelBank, ChannelId, LED_FULL_ON};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut bank = ChannelBank::new();
    let mut peaked = [false; 4];

    for op in data.chunks_exact(4) {
        let id = ChannelId::ALL[usize::from(op[0] & 0x03)];
        let level = op[1];
        let duration = u16::from(op[2] & 0x0F);

        match op[0] >> 6 {
            0 => {
                bank.set(id, level, duration);
                peaked[id.index()] = false;
            }
            1 => {
                bank.throb(id, level, duration);
                peaked[id.index()] = false;
            }
            _ => {
                for _ in 0..op[3] {
                    for (id, ch) in bank.iter_mut() {
                        let before = ch.level();
                        let step = ch.duration() != 0;
                        ch.advance();
                        if step {
                            assert!(ch.level().abs_diff(before) <= 1);
                        }
                        if ch.is_throbbing() {
                            if ch.level() == LED_FULL_ON {
                                peaked[id.index()] = true;
                            }
                            if peaked[id.index()] {
                                assert!(ch.level() >= ch.throb_min());
                            }
                        }
                    }
                }
            }
        }
    }
});
