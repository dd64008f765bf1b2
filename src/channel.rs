#![doc = r#"
The sixteen MIDI channels.
"#]

use crate::error::EventError;
use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// One of the sixteen MIDI channels.
///
/// Channels are numbered 0-15 on the wire and One-Sixteen to humans.
/// Note events are addressed to a channel, and each
/// [`PianoKeys`](crate::piano::PianoKeys) tracks exactly one of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
    Nine = 8,
    Ten = 9,
    Eleven = 10,
    Twelve = 11,
    Thirteen = 12,
    Fourteen = 13,
    Fifteen = 14,
    Sixteen = 15,
}

impl Channel {
    /// Create a channel from its wire number (0-15).
    pub fn new(number: u8) -> Result<Self, EventError> {
        Self::try_from(number).map_err(|_| EventError::ChannelOutOfRange(number))
    }

    /// The wire number of the channel (0-15).
    pub const fn number(&self) -> u8 {
        *self as u8
    }

    /// All sixteen channels in wire order.
    ///
    /// Handy for building one key tracker per possible channel.
    pub const fn all() -> [Channel; 16] {
        use Channel::*;
        [
            One, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Eleven, Twelve, Thirteen,
            Fourteen, Fifteen, Sixteen,
        ]
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {}", self.number())
    }
}

#[test]
fn wire_number_round_trip() {
    use pretty_assertions::assert_eq;
    for number in 0..16u8 {
        assert_eq!(Channel::new(number).unwrap().number(), number);
    }
}

#[test]
fn rejects_out_of_range_number() {
    assert_eq!(
        Channel::new(16).unwrap_err(),
        EventError::ChannelOutOfRange(16)
    );
}

#[test]
fn all_channels_in_wire_order() {
    let all = Channel::all();
    assert_eq!(all[0], Channel::One);
    assert_eq!(all[15], Channel::Sixteen);
}
