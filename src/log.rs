//! The shared, append-only event log.
//!
//! One log is shared by every thread a [`Runner`](crate::runner::Runner)
//! spawns. Appends from concurrent threads interleave in real wall-clock
//! arrival order under the log's lock; once appended, an event's position
//! never changes. The log carries no notion of global time beyond append
//! order.
//!
//! The lock is non-reentrant and every public method acquires it exactly
//! once. Readers that need to do work outside the critical section (such as
//! assertion dispatch, which invokes arbitrary user callbacks) take a
//! [`snapshot`](EventLog::snapshot) first.

use crate::error::{Error, Result};
use crate::event::{Event, EventSequence};
use parking_lot::Mutex;

/// Chronologically ordered log of operation events, guarded for concurrent
/// appends.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<EventSequence>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    ///
    /// Safe to call from any number of concurrent threads; the critical
    /// section is a single vector push.
    pub fn push(&self, event: Event) {
        self.events.lock().push(event);
    }

    /// Returns the earliest event in the log.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyLog`] if nothing has been logged.
    pub fn first(&self) -> Result<Event> {
        self.events.lock().first().cloned().ok_or(Error::EmptyLog)
    }

    /// Returns the most recent event in the log.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyLog`] if nothing has been logged.
    pub fn latest(&self) -> Result<Event> {
        self.events.lock().last().cloned().ok_or(Error::EmptyLog)
    }

    /// Returns true if the log contains an event equal to `event`.
    ///
    /// Linear scan under the lock.
    #[must_use]
    pub fn contains(&self, event: &Event) -> bool {
        self.events.lock().contains(event)
    }

    /// Number of events logged so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Returns an immutable copy of the full ordered sequence.
    ///
    /// The copy is taken under the lock and then released, so callers may
    /// hold it (and run arbitrary code against it) without blocking writers.
    #[must_use]
    pub fn snapshot(&self) -> EventSequence {
        self.events.lock().clone()
    }

    /// Structural equality against an external ordered sequence, under one
    /// lock acquisition.
    #[must_use]
    pub fn matches(&self, expected: &[Event]) -> bool {
        *self.events.lock() == expected
    }
}

impl PartialEq<[Event]> for EventLog {
    fn eq(&self, other: &[Event]) -> bool {
        self.matches(other)
    }
}

impl PartialEq<EventSequence> for EventLog {
    fn eq(&self, other: &EventSequence) -> bool {
        self.matches(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn empty_log_reads_are_errors() {
        let log = EventLog::new();
        assert!(matches!(log.first(), Err(Error::EmptyLog)));
        assert!(matches!(log.latest(), Err(Error::EmptyLog)));
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn push_preserves_order() {
        let log = EventLog::new();
        let e1 = Event::begin("t", "a");
        let e2 = Event::end("t", "a");
        let e3 = Event::begin("t", "b");
        log.push(e1.clone());
        log.push(e2.clone());
        log.push(e3.clone());

        assert_eq!(log.snapshot(), vec![e1.clone(), e2.clone(), e3.clone()]);
        assert_eq!(log.first().unwrap(), e1);
        assert_eq!(log.latest().unwrap(), e3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn contains_uses_value_equality() {
        let log = EventLog::new();
        log.push(Event::begin("t", "a"));
        assert!(log.contains(&Event::begin("t", "a")));
        assert!(!log.contains(&Event::end("t", "a")));
    }

    #[test]
    fn matches_external_sequence() {
        let log = EventLog::new();
        log.push(Event::begin("t", "a"));
        log.push(Event::end("t", "a"));

        let same = vec![Event::begin("t", "a"), Event::end("t", "a")];
        let reordered = vec![Event::end("t", "a"), Event::begin("t", "a")];
        let shorter = vec![Event::begin("t", "a")];

        assert!(log.matches(&same));
        assert!(log == same);
        assert!(!log.matches(&reordered));
        assert!(!log.matches(&shorter));
    }

    #[test]
    fn concurrent_pushes_all_land() {
        let log = Arc::new(EventLog::new());
        let mut handles = Vec::new();
        for t in 0..8 {
            let log = Arc::clone(&log);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    log.push(Event::begin(format!("t{t}"), format!("op{i}")));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 800);

        // Each thread's own events keep program order in the log.
        let snapshot = log.snapshot();
        for t in 0..8 {
            let name = format!("t{t}");
            let ops: Vec<&str> = snapshot
                .iter()
                .filter(|e| e.thread() == name)
                .map(Event::operation)
                .collect();
            let expected: Vec<String> = (0..100).map(|i| format!("op{i}")).collect();
            assert_eq!(ops, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
