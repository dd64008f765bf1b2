#![doc = r#"
Errors produced at construction boundaries.

All validation in this crate happens eagerly: once a [`Timing`],
[`MidiFile`], [`Key`], [`Velocity`] or [`Channel`] exists, no method on
it can fail for input-validity reasons.

[`Timing`]: crate::file::Timing
[`MidiFile`]: crate::file::MidiFile
[`Key`]: crate::key::Key
[`Velocity`]: crate::key::Velocity
[`Channel`]: crate::channel::Channel
"#]

use crate::file::Format;
use thiserror::Error;

/// Rejected time-encoding parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TimingError {
    /// A tempo-relative encoding with no ticks in a quarter note.
    #[error("tick resolution must be positive")]
    ZeroResolution,
    /// A frame-based encoding with no ticks in a frame.
    #[error("subframes per frame must be positive")]
    ZeroSubframes,
    /// A frame rate outside the four SMPTE standards.
    #[error("unrecognized SMPTE frame rate: {0}")]
    UnrecognizedFrameRate(f32),
}

/// A track list that breaks its format's track-count contract.
///
/// Fatal to that build attempt: no [`MidiFile`](crate::file::MidiFile)
/// is produced, and retrying without correcting the input will fail the
/// same way.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FileError {
    /// [`Format::SingleTrack`] was supplied with a track count other
    /// than one.
    #[error("SingleTrack requires exactly one track, found {0}")]
    SingleTrackCount(usize),
    /// A multi-track format was supplied with no tracks at all.
    #[error("{0} requires at least one track")]
    NoTracks(Format),
}

/// An event payload value outside its 7-bit (or 4-bit) range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// Note numbers span 0..=127.
    #[error("key {0} is out of range (0-127)")]
    KeyOutOfRange(u8),
    /// Velocities span 0..=127.
    #[error("velocity {0} is out of range (0-127)")]
    VelocityOutOfRange(u8),
    /// Channel numbers span 0..=15.
    #[error("channel {0} is out of range (0-15)")]
    ChannelOutOfRange(u8),
}
