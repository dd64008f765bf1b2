use midiviz::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

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

fn note_off(tick: u64, channel: Channel, key: u8) -> MidiEvent {
    MidiEvent::new(
        tick,
        channel,
        EventKind::NoteOff {
            key: Key::new(key).unwrap(),
        },
    )
}

fn key(number: u8) -> Key {
    Key::new(number).unwrap()
}

fn two_channel_file() -> MidiFile {
    let melody = Track::new(vec![
        MidiEvent::new(
            0,
            Channel::One,
            EventKind::Tempo {
                micros_per_quarter_note: 600_000,
            },
        ),
        note_on(0, Channel::One, 60, 100),
        note_off(96, Channel::One, 60),
        note_on(96, Channel::One, 64, 90),
        MidiEvent::new(
            120,
            Channel::One,
            EventKind::ControlChange {
                controller: 64,
                value: 127,
            },
        ),
        MidiEvent::new(192, Channel::One, EventKind::EndOfTrack),
    ]);
    let bass = Track::new(vec![
        MidiEvent::new(0, Channel::Two, EventKind::ProgramChange { program: 33 }),
        note_on(48, Channel::Two, 36, 80),
        MidiEvent::new(192, Channel::Two, EventKind::EndOfTrack),
    ]);

    MidiFile::build(
        "duet.mid",
        Format::MultiTrack,
        [Channel::One, Channel::Two],
        vec![melody, bass],
        Timing::new_ticks_per_quarter_note(96).unwrap(),
    )
    .unwrap()
}

#[test]
fn full_stream_drives_independent_trackers() {
    let file = two_channel_file();

    let melody_keys = Arc::new(PianoKeys::new(Channel::One));
    let bass_keys = Arc::new(PianoKeys::new(Channel::Two));
    let tables = [melody_keys.handler_table(), bass_keys.handler_table()];

    let mut unhandled = 0usize;
    for event in file.events() {
        for table in &tables {
            if !table.dispatch(event) {
                unhandled += 1;
            }
        }
    }

    // Tempo, control change, program change and the two end-of-track
    // markers have no handler in either table.
    assert_eq!(unhandled, 2 * 5);

    assert!(!melody_keys.is_down(key(60)));
    assert!(melody_keys.is_down(key(64)));
    assert_eq!(melody_keys.velocity(key(64)), 90);

    assert!(bass_keys.is_down(key(36)));
    assert_eq!(bass_keys.velocity(key(36)), 80);

    // Each tracker only ever saw its own channel's notes.
    assert!(!melody_keys.is_down(key(36)));
    assert!(!bass_keys.is_down(key(60)));
}

#[test]
fn all_notes_off_clears_every_tracker() {
    let file = two_channel_file();

    let melody_keys = Arc::new(PianoKeys::new(Channel::One));
    let bass_keys = Arc::new(PianoKeys::new(Channel::Two));
    let tables = [melody_keys.handler_table(), bass_keys.handler_table()];

    for event in file.events() {
        for table in &tables {
            table.dispatch(event);
        }
    }
    assert!(melody_keys.is_down(key(64)));
    assert!(bass_keys.is_down(key(36)));

    // Addressed to channel One, yet it resets the channel Two tracker
    // too: the signal is global.
    let all_off = MidiEvent::new(200, Channel::One, EventKind::AllNotesOff);
    for table in &tables {
        assert!(table.dispatch(&all_off));
    }

    for number in 0..KEY_COUNT as u8 {
        assert!(!melody_keys.is_down(key(number)));
        assert!(!bass_keys.is_down(key(number)));
    }
}

#[test]
fn per_channel_slices_replay_like_the_full_stream() {
    let file = two_channel_file();

    let from_full = Arc::new(PianoKeys::new(Channel::One));
    let table = from_full.handler_table();
    for event in file.events() {
        table.dispatch(event);
    }

    let from_slice = Arc::new(PianoKeys::new(Channel::One));
    let table = from_slice.handler_table();
    for event in file.channel_events(Channel::One) {
        table.dispatch(event);
    }

    for number in 0..KEY_COUNT as u8 {
        assert_eq!(
            from_full.velocity(key(number)),
            from_slice.velocity(key(number))
        );
    }
}

#[test]
fn render_thread_reads_while_dispatch_thread_writes() {
    let file = two_channel_file();
    let keys = Arc::new(PianoKeys::new(Channel::One));

    let dispatcher = {
        let keys = Arc::clone(&keys);
        let events: Vec<MidiEvent> = file.events().to_vec();
        thread::spawn(move || {
            let table = keys.handler_table();
            for event in &events {
                table.dispatch(event);
            }
        })
    };

    // Poll like a render loop; torn cross-key snapshots are fine, so
    // the only invariant to hold mid-stream is per-slot validity.
    let reader = {
        let keys = Arc::clone(&keys);
        thread::spawn(move || {
            for _ in 0..1000 {
                for number in 0..KEY_COUNT as u8 {
                    let velocity = keys.velocity(key(number));
                    assert!(velocity <= 127);
                }
            }
        })
    };

    dispatcher.join().unwrap();
    reader.join().unwrap();

    assert!(keys.is_down(key(64)));
    assert_eq!(keys.velocity(key(64)), 90);
}
