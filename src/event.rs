//! Operation events and event sequences.
//!
//! Each event marks the entry or exit of a named operation on a named thread.
//! Events are plain values: equality and hashing are structural, which makes
//! an [`EventSequence`] usable as a dispatch key for assertion lookup.

use core::fmt;

/// The kind of operation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The operation region was entered.
    Begin,
    /// The operation region was exited.
    End,
}

impl EventKind {
    /// Returns a human-readable name for the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::End => "END",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One BEGIN or END marker for an operation, tagged with the thread that
/// produced it.
///
/// Immutable once constructed; comparison and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    thread: String,
    operation: String,
    kind: EventKind,
}

impl Event {
    /// Creates a new event.
    #[must_use]
    pub fn new(thread: impl Into<String>, operation: impl Into<String>, kind: EventKind) -> Self {
        Self {
            thread: thread.into(),
            operation: operation.into(),
            kind,
        }
    }

    /// Creates a BEGIN event.
    #[must_use]
    pub fn begin(thread: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(thread, operation, EventKind::Begin)
    }

    /// Creates an END event.
    #[must_use]
    pub fn end(thread: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(thread, operation, EventKind::End)
    }

    /// Name of the thread that produced the event.
    #[must_use]
    pub fn thread(&self) -> &str {
        &self.thread
    }

    /// Name of the instrumented operation.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The marker kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"{}\", \"{}\", {}}}", self.thread, self.operation, self.kind)
    }
}

/// An ordered sequence of events.
///
/// Order is semantically significant: two sequences are equal iff they have
/// the same length and pairwise-equal elements in the same positions.
pub type EventSequence = Vec<Event>;

/// Formats a sequence one event per line, for diagnostics.
#[must_use]
pub fn format_sequence(events: &[Event]) -> String {
    use core::fmt::Write as _;
    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "  {event},");
    }
    out
}
