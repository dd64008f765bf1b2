#![doc = r#"
The file aggregate: a validated, tick-indexed view of a decoded file.

A [`MidiFile`] is built once per opened file from whatever an external
decoder produced (tracks, format, channel metadata, timing), and is
immutable afterwards. Opening another file means building another
aggregate and dropping this one; a failed build produces nothing, so
the previous aggregate stays in effect.
"#]

mod format;
pub use format::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

use crate::prelude::*;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

/// An opened file's event stream, indexed for playback and rendering.
///
/// Construction merges every track's events into one tick-ordered
/// sequence and partitions it by channel, so a playback driver can walk
/// [`MidiFile::events`] (or one channel's slice) without ever
/// re-sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile {
    path: PathBuf,
    format: Format,
    channels: BTreeSet<Channel>,
    tracks: Vec<Track>,
    ordered: Vec<MidiEvent>,
    by_channel: BTreeMap<Channel, Vec<MidiEvent>>,
    timing: Timing,
}

impl MidiFile {
    /// Build the aggregate for one opened file.
    ///
    /// `path` is an opaque label for the file (display, dedup); nothing
    /// here reads it. `channels` is the decoder's channel metadata,
    /// deduplicated and sorted on the way in, independent of what the
    /// events themselves address. The track list is taken over whole,
    /// so later caller-side copies cannot reach into the aggregate.
    ///
    /// Fails with [`FileError`] when the track count breaks `format`'s
    /// contract, in which case nothing is built.
    pub fn build(
        path: impl Into<PathBuf>,
        format: Format,
        channels: impl IntoIterator<Item = Channel>,
        tracks: Vec<Track>,
        timing: Timing,
    ) -> Result<Self, FileError> {
        format.check_track_count(tracks.len())?;

        let channels: BTreeSet<Channel> = channels.into_iter().collect();

        // Flatten in track order, then stable-sort: equal ticks keep
        // track order, then in-track position.
        let mut ordered: Vec<MidiEvent> = tracks
            .iter()
            .flat_map(|track| track.events().iter().copied())
            .collect();
        ordered.sort_by(tick_order);

        let mut by_channel: BTreeMap<Channel, Vec<MidiEvent>> = BTreeMap::new();
        for event in &ordered {
            by_channel.entry(event.channel()).or_default().push(*event);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tracks = tracks.len(),
            events = ordered.len(),
            channels = by_channel.len(),
            "indexed file"
        );

        Ok(Self {
            path: path.into(),
            format,
            channels,
            tracks,
            ordered,
            by_channel,
            timing,
        })
    }

    /// The label the file was opened under.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file's track format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The decoder-supplied channel set, deduplicated and sorted.
    pub const fn channels(&self) -> &BTreeSet<Channel> {
        &self.channels
    }

    /// The tracks as decoded, in file order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Every event in the file, merged across tracks in tick order.
    pub fn events(&self) -> &[MidiEvent] {
        &self.ordered
    }

    /// One channel's events, in global tick order.
    ///
    /// Returns an empty slice for a channel no event addresses.
    pub fn channel_events(&self, channel: Channel) -> &[MidiEvent] {
        self.by_channel
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// How the file's ticks map onto real time.
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The tick of the last event, or 0 for an event-less file.
    pub fn last_tick(&self) -> u64 {
        self.ordered.last().map(MidiEvent::tick).unwrap_or(0)
    }
}

#[cfg(test)]
fn note_on(tick: u64, channel: Channel, key: u8, velocity: u8) -> MidiEvent {
    MidiEvent::new(
        tick,
        channel,
        EventKind::NoteOn {
            key: Key::new(key).unwrap(),
            velocity: Velocity::new(velocity).unwrap(),
        },
    )
}

#[cfg(test)]
fn note_off(tick: u64, channel: Channel, key: u8) -> MidiEvent {
    MidiEvent::new(
        tick,
        channel,
        EventKind::NoteOff {
            key: Key::new(key).unwrap(),
        },
    )
}

#[cfg(test)]
fn test_timing() -> Timing {
    Timing::new_ticks_per_quarter_note(96).unwrap()
}

#[test]
fn single_track_requires_exactly_one_track() {
    let two = vec![
        Track::new(vec![note_on(0, Channel::One, 60, 100)]),
        Track::new(vec![note_on(0, Channel::Two, 61, 100)]),
    ];
    let err = MidiFile::build("two.mid", Format::SingleTrack, [], two, test_timing()).unwrap_err();
    assert_eq!(err, FileError::SingleTrackCount(2));

    let err =
        MidiFile::build("none.mid", Format::SingleTrack, [], vec![], test_timing()).unwrap_err();
    assert_eq!(err, FileError::SingleTrackCount(0));
}

#[test]
fn multi_track_formats_require_a_track() {
    for format in [Format::MultiTrack, Format::RepeatedSingleTrack] {
        let err = MidiFile::build("empty.mid", format, [], vec![], test_timing()).unwrap_err();
        assert_eq!(err, FileError::NoTracks(format));
    }
}

#[test]
fn events_interleave_across_tracks_by_tick() {
    use pretty_assertions::assert_eq;
    let first = Track::new(vec![
        note_on(0, Channel::One, 60, 100),
        note_off(10, Channel::One, 60),
        note_on(20, Channel::One, 62, 90),
    ]);
    let second = Track::new(vec![
        note_on(5, Channel::Two, 36, 80),
        note_off(15, Channel::Two, 36),
    ]);
    let file = MidiFile::build(
        "interleaved.mid",
        Format::MultiTrack,
        [Channel::One, Channel::Two],
        vec![first, second],
        test_timing(),
    )
    .unwrap();

    let ticks: Vec<u64> = file.events().iter().map(MidiEvent::tick).collect();
    assert_eq!(ticks, vec![0, 5, 10, 15, 20]);
    assert_eq!(file.last_tick(), 20);
}

#[test]
fn equal_ticks_keep_track_order() {
    use pretty_assertions::assert_eq;
    let first = Track::new(vec![note_on(0, Channel::One, 60, 100)]);
    let second = Track::new(vec![note_on(0, Channel::One, 72, 100)]);
    let file = MidiFile::build(
        "tie.mid",
        Format::MultiTrack,
        [Channel::One],
        vec![first, second],
        test_timing(),
    )
    .unwrap();

    let keys: Vec<u8> = file
        .events()
        .iter()
        .map(|event| match event.kind() {
            EventKind::NoteOn { key, .. } => key.number(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(keys, vec![60, 72]);
}

#[test]
fn partition_preserves_global_order_per_channel() {
    use pretty_assertions::assert_eq;
    let first = Track::new(vec![
        note_on(0, Channel::One, 60, 100),
        note_on(4, Channel::Two, 36, 80),
        note_off(8, Channel::One, 60),
    ]);
    let second = Track::new(vec![note_off(6, Channel::Two, 36)]);
    let file = MidiFile::build(
        "partition.mid",
        Format::MultiTrack,
        [Channel::One, Channel::Two],
        vec![first, second],
        test_timing(),
    )
    .unwrap();

    let one: Vec<u64> = file
        .channel_events(Channel::One)
        .iter()
        .map(MidiEvent::tick)
        .collect();
    assert_eq!(one, vec![0, 8]);

    let two: Vec<u64> = file
        .channel_events(Channel::Two)
        .iter()
        .map(MidiEvent::tick)
        .collect();
    assert_eq!(two, vec![4, 6]);

    assert!(file.channel_events(Channel::Sixteen).is_empty());
}

#[test]
fn channel_metadata_is_deduplicated_and_sorted() {
    use pretty_assertions::assert_eq;
    let track = Track::new(vec![note_on(0, Channel::One, 60, 100)]);
    let file = MidiFile::build(
        "channels.mid",
        Format::SingleTrack,
        [Channel::Sixteen, Channel::One, Channel::One, Channel::Four],
        vec![track],
        test_timing(),
    )
    .unwrap();

    let channels: Vec<Channel> = file.channels().iter().copied().collect();
    assert_eq!(channels, vec![Channel::One, Channel::Four, Channel::Sixteen]);
}
