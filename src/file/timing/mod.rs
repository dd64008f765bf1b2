mod smpte;
pub use smpte::*;

use crate::error::TimingError;

/// How a file's ticks map onto real time.
///
/// Delta ticks are either tempo-relative (a fixed fraction of a quarter
/// note, so their duration moves with the current tempo) or frame-based
/// (a fixed fraction of an SMPTE video frame, independent of tempo).
/// Which branch applies is decided once, by the constructor that
/// produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta ticks are a fraction of a quarter note.
    TicksPerQuarterNote(TicksPerQuarterNote),
    /// Delta ticks are a fraction of an SMPTE frame.
    Smpte(SmpteTiming),
}

impl Timing {
    /// Tempo-relative timing with `resolution` ticks in a quarter note.
    ///
    /// Fails with [`TimingError::ZeroResolution`] for a resolution of
    /// zero.
    pub const fn new_ticks_per_quarter_note(resolution: u16) -> Result<Self, TimingError> {
        if resolution == 0 {
            return Err(TimingError::ZeroResolution);
        }
        Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote {
            resolution,
        }))
    }

    /// Frame-based timing: `fps` frames per second, each divided into
    /// `subframes_per_frame` ticks.
    ///
    /// Fails with [`TimingError::ZeroSubframes`] for a subframe count
    /// of zero.
    pub const fn new_smpte(fps: SmpteFps, subframes_per_frame: u8) -> Result<Self, TimingError> {
        if subframes_per_frame == 0 {
            return Err(TimingError::ZeroSubframes);
        }
        Ok(Self::Smpte(SmpteTiming {
            fps,
            subframes_per_frame,
        }))
    }

    /// Frame-based timing from a raw division value, as decoders and
    /// sequencer APIs report it.
    ///
    /// Recognizes exactly the four standard rates (`24.0`, `25.0`,
    /// [`SMPTE_30_DROP`], `30.0`); anything else fails with
    /// [`TimingError::UnrecognizedFrameRate`].
    pub fn from_frame_division(
        frames_per_second: f32,
        subframes_per_frame: u8,
    ) -> Result<Self, TimingError> {
        let fps = SmpteFps::from_division(frames_per_second)?;
        Self::new_smpte(fps, subframes_per_frame)
    }

    /// The stored resolution under tempo-relative timing, or the
    /// constant `1` under frame-based timing.
    ///
    /// The `1` is a normalizing placeholder so callers can divide by
    /// this value unconditionally; it carries no musical meaning.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => t.resolution(),
            Self::Smpte(_) => 1,
        }
    }

    /// Microseconds one tick lasts right now.
    ///
    /// `tempo` is the currently active tempo in microseconds per
    /// quarter note. A file may change tempo mid-stream, so the caller
    /// tracks the active value (see [`EventKind::Tempo`]) and supplies
    /// it here; under frame-based timing the argument has no effect.
    ///
    /// [`EventKind::Tempo`]: crate::event::EventKind::Tempo
    pub const fn micros_per_tick(&self, tempo: u32) -> u32 {
        match self {
            // tempo is µs/beat, resolution is ticks/beat.
            Self::TicksPerQuarterNote(t) => tempo / t.resolution() as u32,
            Self::Smpte(s) => s.micros_per_tick(),
        }
    }
}

/// Tempo-relative timing: ticks as a fraction of a quarter note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    resolution: u16,
}

impl TicksPerQuarterNote {
    /// The number of ticks in a quarter note. Never zero.
    pub const fn resolution(&self) -> u16 {
        self.resolution
    }
}

/// Frame-based timing: ticks as a fraction of an SMPTE frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteTiming {
    fps: SmpteFps,
    subframes_per_frame: u8,
}

impl SmpteTiming {
    /// The frame rate.
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// The number of ticks in one frame. Never zero.
    pub const fn subframes_per_frame(&self) -> u8 {
        self.subframes_per_frame
    }

    /// Microseconds per tick: `1_000_000 / (fps × subframes)`,
    /// truncated. Drop-frame uses the exact 30000/1001 rate.
    pub const fn micros_per_tick(&self) -> u32 {
        let ticks_per_second = self.fps.as_f64() * self.subframes_per_frame as f64;
        (1_000_000.0 / ticks_per_second) as u32
    }
}

#[test]
fn tempo_relative_division() {
    use pretty_assertions::assert_eq;
    let timing = Timing::new_ticks_per_quarter_note(96).unwrap();
    // 500000 µs/beat over 96 ticks/beat.
    assert_eq!(timing.micros_per_tick(500_000), 5208);
    assert_eq!(timing.ticks_per_quarter_note(), 96);
}

#[test]
fn frame_based_division_ignores_tempo() {
    use pretty_assertions::assert_eq;
    let timing = Timing::from_frame_division(30.0, 80).unwrap();
    assert_eq!(timing.micros_per_tick(500_000), 416);
    assert_eq!(timing.micros_per_tick(1), 416);
    assert_eq!(timing.micros_per_tick(u32::MAX), 416);
    assert_eq!(timing.ticks_per_quarter_note(), 1);
}

#[test]
fn drop_frame_uses_exact_rate() {
    let timing = Timing::from_frame_division(SMPTE_30_DROP, 80).unwrap();
    // 1_000_000 / ((30000/1001) * 80) = 417.08...
    assert_eq!(timing.micros_per_tick(0), 417);
}

#[test]
fn rejects_zero_resolution() {
    assert_eq!(
        Timing::new_ticks_per_quarter_note(0).unwrap_err(),
        TimingError::ZeroResolution
    );
}

#[test]
fn rejects_zero_subframes() {
    assert_eq!(
        Timing::new_smpte(SmpteFps::TwentyFour, 0).unwrap_err(),
        TimingError::ZeroSubframes
    );
}

#[test]
fn rejects_unrecognized_frame_rate() {
    // 29 is neither a standard rate nor the drop-frame division.
    assert_eq!(
        Timing::from_frame_division(29.0, 80).unwrap_err(),
        TimingError::UnrecognizedFrameRate(29.0)
    );
}
