//! Fixed registry of the board's four animated outputs.

use super::PwmChannel;
use crate::pins;

/// Number of animated outputs on the board.
pub const CHANNEL_COUNT: usize = 4;

/// Identity of each animated output.  The discriminant is the index into
/// [`ChannelBank`] and [`CHANNEL_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelId {
    ButtonLed = 0,
    DoorLed = 1,
    SpindleLed = 2,
    SpindleMotor = 3,
}

impl ChannelId {
    pub const ALL: [ChannelId; CHANNEL_COUNT] = [
        ChannelId::ButtonLed,
        ChannelId::DoorLed,
        ChannelId::SpindleLed,
        ChannelId::SpindleMotor,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static ChannelSpec {
        &CHANNEL_TABLE[self as usize]
    }
}

impl core::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ButtonLed => write!(f, "button LED"),
            Self::DoorLed => write!(f, "door LED"),
            Self::SpindleLed => write!(f, "spindle LED"),
            Self::SpindleMotor => write!(f, "spindle motor"),
        }
    }
}

/// Static wiring and capabilities of one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: ChannelId,
    /// LEDC channel driving the pin.
    pub ledc_channel: u32,
    pub gpio: i32,
    /// Cut the compare output entirely at duty 0.  A zero-duty PWM channel
    /// still leaks a glitch pulse per period, which is enough to twitch
    /// the spindle power stage.
    pub gate_on_zero: bool,
}

pub static CHANNEL_TABLE: [ChannelSpec; CHANNEL_COUNT] = [
    ChannelSpec {
        id: ChannelId::ButtonLed,
        ledc_channel: 0,
        gpio: pins::BUTTON_LED_GPIO,
        gate_on_zero: false,
    },
    ChannelSpec {
        id: ChannelId::DoorLed,
        ledc_channel: 1,
        gpio: pins::DOOR_LED_GPIO,
        gate_on_zero: false,
    },
    ChannelSpec {
        id: ChannelId::SpindleLed,
        ledc_channel: 2,
        gpio: pins::SPINDLE_LED_GPIO,
        gate_on_zero: false,
    },
    ChannelSpec {
        id: ChannelId::SpindleMotor,
        ledc_channel: 3,
        gpio: pins::SPINDLE_PWM_GPIO,
        gate_on_zero: true,
    },
];

/// Owned set of channel records, one per [`ChannelId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelBank {
    channels: [PwmChannel; CHANNEL_COUNT],
}

impl ChannelBank {
    pub const fn new() -> Self {
        Self {
            channels: [PwmChannel::new(); CHANNEL_COUNT],
        }
    }

    pub fn get(&self, id: ChannelId) -> &PwmChannel {
        &self.channels[id.index()]
    }

    pub fn get_mut(&mut self, id: ChannelId) -> &mut PwmChannel {
        &mut self.channels[id.index()]
    }

    /// Reset every channel to zero.
    pub fn init_all(&mut self) {
        self.channels.iter_mut().for_each(PwmChannel::init);
    }

    pub fn set(&mut self, id: ChannelId, target_level: u8, duration_ticks: u16) {
        self.get_mut(id).set(target_level, duration_ticks);
    }

    pub fn throb(&mut self, id: ChannelId, min_level: u8, duration_ticks: u16) {
        self.get_mut(id).throb(min_level, duration_ticks);
    }

    /// Iterate channels in [`ChannelId::ALL`] order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChannelId, &mut PwmChannel)> {
        ChannelId::ALL.into_iter().zip(self.channels.iter_mut())
    }
}
