#![doc = r#"
SMPTE frame rates for frame-based timing.

MIDI supports two timing methods: musical time (ticks per quarter note,
duration moves with tempo) and absolute time (SMPTE frames per second,
duration fixed). Frame-based files are timestamped against real time,
which keeps them aligned with external video regardless of tempo.

The MIDI specification admits exactly four frame rates:
- 24 fps: film
- 25 fps: PAL/SECAM video
- 29.97 fps: NTSC color video ("drop-frame")
- 30 fps: NTSC black & white
"#]

use crate::error::TimingError;

/// The division value sequencer APIs use for the 29.97 fps drop-frame
/// rate.
pub const SMPTE_30_DROP: f32 = 29.97;

/// The exact NTSC drop-frame rate: 30000/1001 ≈ 29.97 fps.
const DROP_FRAME: f64 = 30_000. / 1001.;

/// One of the four frame rates frame-based timing can use.
///
/// `TwentyNine` is the 29.97 fps drop-frame rate. No frames are
/// actually dropped at that rate; the timecode numbering skips values
/// to stay aligned with real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second, the film standard.
    TwentyFour,
    /// 25 frames per second, the PAL/SECAM standard.
    TwentyFive,
    /// 29.97 frames per second (30000/1001), NTSC color drop-frame.
    TwentyNine,
    /// 30 frames per second, NTSC black & white.
    Thirty,
}

impl SmpteFps {
    /// Recognize a raw division value as reported by decoders and
    /// sequencer APIs.
    ///
    /// The drop-frame rate is matched against [`SMPTE_30_DROP`], the
    /// value those APIs hand out; anything outside the four standards
    /// fails with [`TimingError::UnrecognizedFrameRate`].
    pub fn from_division(frames_per_second: f32) -> Result<Self, TimingError> {
        if frames_per_second == 24.0 {
            Ok(Self::TwentyFour)
        } else if frames_per_second == 25.0 {
            Ok(Self::TwentyFive)
        } else if frames_per_second == SMPTE_30_DROP {
            Ok(Self::TwentyNine)
        } else if frames_per_second == 30.0 {
            Ok(Self::Thirty)
        } else {
            Err(TimingError::UnrecognizedFrameRate(frames_per_second))
        }
    }

    /// The nominal rate as an integer.
    ///
    /// Drop-frame returns 30 here; use [`SmpteFps::as_f64`] when the
    /// fractional rate matters.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The exact rate, including the fractional drop-frame rate.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

#[test]
fn recognizes_the_four_standard_rates() {
    use pretty_assertions::assert_eq;
    assert_eq!(SmpteFps::from_division(24.0).unwrap(), SmpteFps::TwentyFour);
    assert_eq!(SmpteFps::from_division(25.0).unwrap(), SmpteFps::TwentyFive);
    assert_eq!(
        SmpteFps::from_division(SMPTE_30_DROP).unwrap(),
        SmpteFps::TwentyNine
    );
    assert_eq!(SmpteFps::from_division(30.0).unwrap(), SmpteFps::Thirty);
}

#[test]
fn drop_frame_division_is_nominal_thirty() {
    assert_eq!(SmpteFps::TwentyNine.as_division(), 30);
    assert!(SmpteFps::TwentyNine.as_f64() < 30.0);
}
