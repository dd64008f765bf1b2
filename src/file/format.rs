use crate::error::FileError;
use core::fmt;

/// How a file's tracks relate to each other.
///
/// Each format carries a track-count contract, checked when a
/// [`MidiFile`](crate::file::MidiFile) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// One track carrying every channel. Requires exactly one track.
    SingleTrack,
    /// Simultaneous tracks of a single song. Requires at least one
    /// track.
    MultiTrack,
    /// Independent single-track patterns. Requires at least one track.
    RepeatedSingleTrack,
}

impl Format {
    pub(crate) const fn check_track_count(&self, count: usize) -> Result<(), FileError> {
        match self {
            Self::SingleTrack => {
                if count != 1 {
                    return Err(FileError::SingleTrackCount(count));
                }
                Ok(())
            }
            Self::MultiTrack | Self::RepeatedSingleTrack => {
                if count == 0 {
                    return Err(FileError::NoTracks(*self));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SingleTrack => "SingleTrack",
            Self::MultiTrack => "MultiTrack",
            Self::RepeatedSingleTrack => "RepeatedSingleTrack",
        })
    }
}
