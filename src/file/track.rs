use crate::event::MidiEvent;

/// An ordered sequence of events from one track of a file.
///
/// Owned exclusively by the [`MidiFile`](crate::file::MidiFile) once
/// attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    events: Vec<MidiEvent>,
}

impl Track {
    /// Create a track from its decoded events, in file order.
    pub fn new(events: Vec<MidiEvent>) -> Self {
        Self { events }
    }

    /// The track's events, in file order.
    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    /// The number of events in the track.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track carries no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
