#![doc = r#"
Deterministic MIDI event streams for visualizers.

`midiviz` sits between a byte-level MIDI decoder and a renderer. It
takes a decoded file's tracks and produces a validated, tick-ordered,
channel-partitioned event stream ([`file::MidiFile`]), converts ticks
to real time under either timing model ([`file::Timing`]), and routes
dispatched events ([`dispatch::DispatchTable`]) into per-channel key
trackers ([`piano::PianoKeys`]) that render threads poll lock-free.

What it deliberately does not do: parse bytes, talk to MIDI hardware,
synthesize audio, or track tempo changes (drivers watch
[`event::EventKind::Tempo`] and feed the active tempo into
[`file::Timing::micros_per_tick`] themselves).

# Example

```rust
# fn main() -> Result<(), Box<dyn std::error::Error>> {
use midiviz::prelude::*;
use std::sync::Arc;

let track = Track::new(vec![
    MidiEvent::new(0, Channel::One, EventKind::NoteOn {
        key: Key::new(60)?,
        velocity: Velocity::new(100)?,
    }),
    MidiEvent::new(96, Channel::One, EventKind::NoteOff { key: Key::new(60)? }),
]);

let file = MidiFile::build(
    "song.mid",
    Format::SingleTrack,
    [Channel::One],
    vec![track],
    Timing::new_ticks_per_quarter_note(96)?,
)?;

// One tracker per rendered channel, each with its own table.
let piano = Arc::new(PianoKeys::new(Channel::One));
let table = piano.handler_table();

for event in file.events() {
    table.dispatch(event);
}
assert!(!piano.is_down(Key::new(60)?));
# Ok(())
# }
```
"#]
#![warn(missing_docs)]

pub mod channel;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod file;
pub mod key;
pub mod piano;

pub mod prelude {
    //! Single import for the crate's public surface.
    pub use crate::{
        channel::Channel,
        dispatch::DispatchTable,
        error::{EventError, FileError, TimingError},
        event::{EventKind, EventType, MidiEvent, tick_order},
        file::{
            Format, MidiFile, SMPTE_30_DROP, SmpteFps, SmpteTiming, TicksPerQuarterNote, Timing,
            Track,
        },
        key::{Key, Velocity},
        piano::{KEY_COUNT, PianoKeys},
    };
}
