#![doc = r#"
Validated 7-bit note payloads: [`Key`] and [`Velocity`].

Both are interpreted as 7-bit numbers. [`Key`] `0` is the lowest note a
file can address and [`Key`] `127` the highest, spanning the full piano
range tracked by [`PianoKeys`](crate::piano::PianoKeys). A
[`Velocity`] of `0` means the key is up.
"#]

use crate::error::EventError;

/// Identifies one of the 128 keys a note event addresses.
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key(u8);

impl Key {
    /// Create a new key.
    ///
    /// Checks that the number fits in 7 bits.
    pub const fn new(number: u8) -> Result<Self, EventError> {
        if number > 127 {
            return Err(EventError::KeyOutOfRange(number));
        }
        Ok(Self(number))
    }

    /// Creates a key without checking the range.
    pub const fn new_unchecked(number: u8) -> Self {
        Self(number)
    }

    /// The note number of the key (0-127).
    pub const fn number(&self) -> u8 {
        self.0
    }

    /// The key's slot in a 128-element state array.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// How hard a key was struck. `0` means released.
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity(u8);

impl Velocity {
    /// The velocity of a key at rest.
    pub const SILENT: Self = Self(0);

    /// Create a new velocity.
    ///
    /// Checks that the value fits in 7 bits.
    pub const fn new(value: u8) -> Result<Self, EventError> {
        if value > 127 {
            return Err(EventError::VelocityOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// The raw velocity value (0-127).
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// True for velocity `0`, the released state.
    pub const fn is_silent(&self) -> bool {
        self.0 == 0
    }
}

#[test]
fn key_accepts_full_note_range() {
    assert_eq!(Key::new(0).unwrap().number(), 0);
    assert_eq!(Key::new(127).unwrap().index(), 127);
}

#[test]
fn key_rejects_eighth_bit() {
    assert_eq!(Key::new(128).unwrap_err(), EventError::KeyOutOfRange(128));
}

#[test]
fn velocity_zero_is_silent() {
    assert!(Velocity::new(0).unwrap().is_silent());
    assert!(!Velocity::new(1).unwrap().is_silent());
    assert_eq!(
        Velocity::new(200).unwrap_err(),
        EventError::VelocityOutOfRange(200)
    );
}
