#![doc = r#"
Kind-keyed event routing.

A [`DispatchTable`] maps an event's [`EventType`] to at most one
handler. A playback driver walks an ordered event sequence and calls
[`DispatchTable::dispatch`] per event; kinds nothing registered for are
dropped silently, because a file routinely carries kinds no subscriber
cares about.

Every subscriber owns its own table (see
[`PianoKeys::handler_table`](crate::piano::PianoKeys::handler_table)),
so independent state machines never know about each other.
"#]

use crate::prelude::*;
use core::fmt;
use std::collections::HashMap;

type Handler = Box<dyn Fn(&MidiEvent) + Send + Sync>;

/// Routes events to handlers by their exact kind.
#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<EventType, Handler>,
}

impl DispatchTable {
    /// An empty table; every dispatch returns `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`.
    ///
    /// The last registration for a kind wins; replacing an earlier
    /// handler is an intended override, not an error.
    pub fn register<F>(&mut self, kind: EventType, handler: F)
    where
        F: Fn(&MidiEvent) + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Deliver `event` to the handler registered for its kind.
    ///
    /// Returns `true` if a handler ran, `false` if the kind is
    /// unregistered (the event is dropped; callers auditing coverage
    /// can count these).
    pub fn dispatch(&self, event: &MidiEvent) -> bool {
        match self.handlers.get(&event.event_type()) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// True if a handler is registered for `kind`.
    pub fn handles(&self, kind: EventType) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// The number of kinds with a registered handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no handler is registered at all.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

#[test]
fn dispatch_invokes_the_matching_handler() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut table = DispatchTable::new();
    let counter = Arc::clone(&hits);
    table.register(EventType::Stop, move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let stop = MidiEvent::new(0, Channel::One, EventKind::Stop);
    assert!(table.dispatch(&stop));
    assert_eq!(hits.load(Ordering::Relaxed), 1);
}

#[test]
fn unregistered_kinds_are_dropped() {
    let table = DispatchTable::new();
    let event = MidiEvent::new(
        0,
        Channel::One,
        EventKind::Tempo {
            micros_per_quarter_note: 500_000,
        },
    );
    assert!(!table.dispatch(&event));
    assert!(table.is_empty());
}

#[test]
fn last_registration_wins() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let mut table = DispatchTable::new();
    let counter = Arc::clone(&first);
    table.register(EventType::AllNotesOff, move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    let counter = Arc::clone(&second);
    table.register(EventType::AllNotesOff, move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(table.len(), 1);

    let event = MidiEvent::new(7, Channel::Three, EventKind::AllNotesOff);
    assert!(table.dispatch(&event));
    assert_eq!(first.load(Ordering::Relaxed), 0);
    assert_eq!(second.load(Ordering::Relaxed), 1);
}
