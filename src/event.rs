#![doc = r#"
The event model: what happened, on which channel, at which tick.

Each [`MidiEvent`] is an immutable record of a decoded event at an
absolute tick. The payload lives in [`EventKind`], a tagged union;
[`EventType`] is its payload-free shadow and is what a
[`DispatchTable`](crate::dispatch::DispatchTable) keys its handlers on.
"#]

use crate::prelude::*;
use core::cmp::Ordering;

/// The payload of a single event.
///
/// Only the first four kinds affect key state; the rest are carried so
/// a playback driver can track tempo and program changes itself, and
/// are silently ignored by any table with no handler for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A key was pressed. Velocity `0` is equivalent to a release.
    NoteOn {
        /// The key pressed.
        key: Key,
        /// How hard it was pressed.
        velocity: Velocity,
    },
    /// A key was released.
    NoteOff {
        /// The key released.
        key: Key,
    },
    /// Channel-mode request to release every sounding note.
    AllNotesOff,
    /// Playback stopped.
    Stop,
    /// Instrument selection for the channel.
    ProgramChange {
        /// The program (patch) number.
        program: u8,
    },
    /// A controller moved.
    ControlChange {
        /// The controller number.
        controller: u8,
        /// The controller position.
        value: u8,
    },
    /// The pitch wheel moved. `8192` is centered.
    PitchBend {
        /// 14-bit wheel position.
        bend: u16,
    },
    /// A tempo change, in microseconds per quarter note.
    ///
    /// Consumed by playback drivers that feed
    /// [`Timing::micros_per_tick`](crate::file::Timing::micros_per_tick);
    /// key state never reacts to it.
    Tempo {
        /// The new tempo.
        micros_per_quarter_note: u32,
    },
    /// The enclosing track ended.
    EndOfTrack,
}

impl EventKind {
    /// The payload-free discriminant of this kind.
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::NoteOn { .. } => EventType::NoteOn,
            Self::NoteOff { .. } => EventType::NoteOff,
            Self::AllNotesOff => EventType::AllNotesOff,
            Self::Stop => EventType::Stop,
            Self::ProgramChange { .. } => EventType::ProgramChange,
            Self::ControlChange { .. } => EventType::ControlChange,
            Self::PitchBend { .. } => EventType::PitchBend,
            Self::Tempo { .. } => EventType::Tempo,
            Self::EndOfTrack => EventType::EndOfTrack,
        }
    }
}

/// A payload-free view of [`EventKind`], usable as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum EventType {
    NoteOn,
    NoteOff,
    AllNotesOff,
    Stop,
    ProgramChange,
    ControlChange,
    PitchBend,
    Tempo,
    EndOfTrack,
}

/// A single decoded event at an absolute tick on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiEvent {
    tick: u64,
    channel: Channel,
    kind: EventKind,
}

impl MidiEvent {
    /// Create an event at `tick` on `channel`.
    ///
    /// Channel-less events a decoder synthesizes ([`EventKind::Stop`],
    /// [`EventKind::Tempo`], [`EventKind::EndOfTrack`]) carry the
    /// channel of their track context, conventionally [`Channel::One`].
    pub const fn new(tick: u64, channel: Channel, kind: EventKind) -> Self {
        Self {
            tick,
            channel,
            kind,
        }
    }

    /// The absolute tick the event occurs at.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The channel the event is addressed to.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The event's payload.
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// The payload-free discriminant, used for handler lookup.
    pub const fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}

/// The total order used to merge per-track events into one sequence:
/// ticks ascending.
///
/// Equal ticks compare equal here, so a *stable* sort over tracks
/// flattened in their original order resolves ties deterministically to
/// original track order, then in-track position.
/// [`MidiFile::build`](crate::file::MidiFile::build) relies on exactly
/// that arrangement.
pub fn tick_order(a: &MidiEvent, b: &MidiEvent) -> Ordering {
    a.tick.cmp(&b.tick)
}

#[test]
fn event_type_shadows_kind() {
    use pretty_assertions::assert_eq;
    let on = EventKind::NoteOn {
        key: Key::new_unchecked(60),
        velocity: Velocity::SILENT,
    };
    assert_eq!(on.event_type(), EventType::NoteOn);
    assert_eq!(EventKind::Stop.event_type(), EventType::Stop);
    assert_eq!(
        EventKind::Tempo {
            micros_per_quarter_note: 500_000
        }
        .event_type(),
        EventType::Tempo
    );
}

#[test]
fn tick_order_compares_ticks_only() {
    let a = MidiEvent::new(5, Channel::One, EventKind::Stop);
    let b = MidiEvent::new(9, Channel::Sixteen, EventKind::AllNotesOff);
    assert_eq!(tick_order(&a, &b), Ordering::Less);
    assert_eq!(tick_order(&b, &a), Ordering::Greater);
    let c = MidiEvent::new(5, Channel::Two, EventKind::EndOfTrack);
    assert_eq!(tick_order(&a, &c), Ordering::Equal);
}
