#![doc = r#"
Live key state for one channel's piano.

A [`PianoKeys`] holds 128 velocity slots behind per-slot atomics: the
dispatch thread writes through the handlers in
[`PianoKeys::handler_table`], while render threads poll
[`PianoKeys::is_down`] / [`PianoKeys::velocity`] every frame without
locking. Slots are independent; a reader may observe a torn snapshot
*across* keys mid-update, which is fine for a live view.
"#]

use crate::prelude::*;
use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

/// The number of keys tracked per channel, the full note range.
pub const KEY_COUNT: usize = 128;

/// Key velocities for one channel: `0` is up, `1`-`127` is down at
/// that velocity.
///
/// One instance exists per rendered channel and lives as long as its
/// owner; a reset is a revisitable state, not an end state. State
/// changes only through event delivery (and [`PianoKeys::reset`]).
#[derive(Debug)]
pub struct PianoKeys {
    channel: Channel,
    keys: [AtomicU8; KEY_COUNT],
}

impl PianoKeys {
    /// A tracker for `channel` with every key up.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            keys: core::array::from_fn(|_| AtomicU8::new(0)),
        }
    }

    /// The channel this tracker listens to.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// True while `key` is held.
    pub fn is_down(&self, key: Key) -> bool {
        self.velocity(key) != 0
    }

    /// The velocity `key` is held at, or `0` if it is up.
    pub fn velocity(&self, key: Key) -> u8 {
        self.keys[key.index()].load(Ordering::Relaxed)
    }

    /// Release every key.
    pub fn reset(&self) {
        for slot in &self.keys {
            slot.store(0, Ordering::Relaxed);
        }
    }

    /// The dispatch table for this tracker, with its four handlers
    /// bound to `self`.
    ///
    /// Note on/off are filtered to this tracker's channel;
    /// [`EventType::AllNotesOff`] and [`EventType::Stop`] reset
    /// unconditionally, whichever channel carried them. Each tracker
    /// owns its own table, so several can subscribe to one event
    /// stream independently.
    pub fn handler_table(self: &Arc<Self>) -> DispatchTable {
        let mut table = DispatchTable::new();
        let keys = Arc::clone(self);
        table.register(EventType::NoteOn, move |event| keys.note_on(event));
        let keys = Arc::clone(self);
        table.register(EventType::NoteOff, move |event| keys.note_off(event));
        let keys = Arc::clone(self);
        table.register(EventType::AllNotesOff, move |_| keys.reset());
        let keys = Arc::clone(self);
        table.register(EventType::Stop, move |_| keys.reset());
        table
    }

    fn note_on(&self, event: &MidiEvent) {
        if event.channel() != self.channel {
            return;
        }
        if let EventKind::NoteOn { key, velocity } = event.kind() {
            self.keys[key.index()].store(velocity.value(), Ordering::Relaxed);
        }
    }

    fn note_off(&self, event: &MidiEvent) {
        if event.channel() != self.channel {
            return;
        }
        if let EventKind::NoteOff { key } = event.kind() {
            self.keys[key.index()].store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
fn key(number: u8) -> Key {
    Key::new(number).unwrap()
}

#[cfg(test)]
fn note_on(channel: Channel, number: u8, velocity: u8) -> MidiEvent {
    MidiEvent::new(
        0,
        channel,
        EventKind::NoteOn {
            key: key(number),
            velocity: Velocity::new(velocity).unwrap(),
        },
    )
}

#[test]
fn note_on_sets_velocity_on_matching_channel() {
    let keys = Arc::new(PianoKeys::new(Channel::One));
    let table = keys.handler_table();

    assert!(table.dispatch(&note_on(Channel::One, 60, 100)));
    assert!(keys.is_down(key(60)));
    assert_eq!(keys.velocity(key(60)), 100);
    assert!(!keys.is_down(key(61)));
}

#[test]
fn other_channels_are_ignored() {
    let keys = Arc::new(PianoKeys::new(Channel::Two));
    let table = keys.handler_table();

    // Handled (the kind is registered) but filtered out by channel.
    assert!(table.dispatch(&note_on(Channel::One, 60, 100)));
    for number in 0..KEY_COUNT as u8 {
        assert_eq!(keys.velocity(key(number)), 0);
    }
}

#[test]
fn note_off_releases_the_key() {
    let keys = Arc::new(PianoKeys::new(Channel::One));
    let table = keys.handler_table();

    table.dispatch(&note_on(Channel::One, 72, 64));
    assert!(keys.is_down(key(72)));

    let off = MidiEvent::new(1, Channel::One, EventKind::NoteOff { key: key(72) });
    assert!(table.dispatch(&off));
    assert!(!keys.is_down(key(72)));
}

#[test]
fn note_on_at_zero_velocity_reads_as_up() {
    let keys = Arc::new(PianoKeys::new(Channel::One));
    let table = keys.handler_table();

    table.dispatch(&note_on(Channel::One, 60, 0));
    assert!(!keys.is_down(key(60)));
}

#[test]
fn all_notes_off_resets_regardless_of_channel() {
    let keys = Arc::new(PianoKeys::new(Channel::Five));
    let table = keys.handler_table();

    table.dispatch(&note_on(Channel::Five, 10, 50));
    table.dispatch(&note_on(Channel::Five, 20, 60));

    let all_off = MidiEvent::new(2, Channel::One, EventKind::AllNotesOff);
    assert!(table.dispatch(&all_off));
    assert!(!keys.is_down(key(10)));
    assert!(!keys.is_down(key(20)));
}

#[test]
fn stop_resets_like_all_notes_off() {
    let keys = Arc::new(PianoKeys::new(Channel::One));
    let table = keys.handler_table();

    table.dispatch(&note_on(Channel::One, 88, 127));
    let stop = MidiEvent::new(3, Channel::Nine, EventKind::Stop);
    assert!(table.dispatch(&stop));
    assert_eq!(keys.velocity(key(88)), 0);
}

#[test]
fn unhandled_kinds_leave_state_alone() {
    let keys = Arc::new(PianoKeys::new(Channel::One));
    let table = keys.handler_table();

    table.dispatch(&note_on(Channel::One, 60, 100));
    let bend = MidiEvent::new(4, Channel::One, EventKind::PitchBend { bend: 8192 });
    assert!(!table.dispatch(&bend));
    assert_eq!(keys.velocity(key(60)), 100);
}
