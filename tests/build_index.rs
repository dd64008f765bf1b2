use midiviz::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

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

fn three_track_file() -> MidiFile {
    let melody = Track::new(vec![
        MidiEvent::new(
            0,
            Channel::One,
            EventKind::Tempo {
                micros_per_quarter_note: 500_000,
            },
        ),
        note_on(0, Channel::One, 60, 100),
        note_off(96, Channel::One, 60),
        note_on(96, Channel::One, 64, 90),
        note_off(192, Channel::One, 64),
        MidiEvent::new(192, Channel::One, EventKind::EndOfTrack),
    ]);
    let bass = Track::new(vec![
        note_on(0, Channel::Two, 36, 80),
        note_off(48, Channel::Two, 36),
        note_on(144, Channel::Two, 38, 85),
        note_off(190, Channel::Two, 38),
        MidiEvent::new(190, Channel::Two, EventKind::EndOfTrack),
    ]);
    let drums = Track::new(vec![
        note_on(24, Channel::Ten, 42, 127),
        note_off(25, Channel::Ten, 42),
        note_on(72, Channel::Ten, 42, 127),
        note_off(73, Channel::Ten, 42),
        MidiEvent::new(73, Channel::Ten, EventKind::EndOfTrack),
    ]);

    MidiFile::build(
        "three_tracks.mid",
        Format::MultiTrack,
        [Channel::One, Channel::Two, Channel::Ten],
        vec![melody, bass, drums],
        Timing::new_ticks_per_quarter_note(96).unwrap(),
    )
    .unwrap()
}

fn counts(events: impl IntoIterator<Item = MidiEvent>) -> HashMap<MidiEvent, usize> {
    let mut map = HashMap::new();
    for event in events {
        *map.entry(event).or_insert(0) += 1;
    }
    map
}

#[test]
fn partitions_cover_every_event_exactly_once() {
    let file = three_track_file();

    let input: Vec<MidiEvent> = file
        .tracks()
        .iter()
        .flat_map(|track| track.events().iter().copied())
        .collect();

    let partitioned: Vec<MidiEvent> = file
        .channels()
        .iter()
        .flat_map(|&channel| file.channel_events(channel).iter().copied())
        .collect();

    assert_eq!(counts(partitioned), counts(input.clone()));
    assert_eq!(counts(file.events().iter().copied()), counts(input));
}

#[test]
fn partition_ticks_are_non_decreasing() {
    let file = three_track_file();
    for &channel in file.channels() {
        let events = file.channel_events(channel);
        for pair in events.windows(2) {
            assert!(
                pair[0].tick() <= pair[1].tick(),
                "{channel}: {} after {}",
                pair[1].tick(),
                pair[0].tick()
            );
        }
        assert!(events.iter().all(|event| event.channel() == channel));
    }
}

#[test]
fn global_sequence_is_non_decreasing() {
    let file = three_track_file();
    for pair in file.events().windows(2) {
        assert!(pair[0].tick() <= pair[1].tick());
    }
    assert_eq!(file.last_tick(), 192);
}

#[test]
fn rebuilding_the_same_input_is_deterministic() {
    let first = three_track_file();
    let second = three_track_file();

    assert_eq!(first, second);
    assert_eq!(first.events(), second.events());
    for &channel in first.channels() {
        assert_eq!(first.channel_events(channel), second.channel_events(channel));
    }
}

#[test]
fn aggregate_metadata_survives_the_build() {
    let file = three_track_file();
    assert_eq!(file.path().to_str(), Some("three_tracks.mid"));
    assert_eq!(file.format(), Format::MultiTrack);
    assert_eq!(file.tracks().len(), 3);
    assert_eq!(file.timing().ticks_per_quarter_note(), 96);
}
