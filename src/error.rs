//! Error types for the harness.
//!
//! All errors surface synchronously to the immediate caller; the harness
//! performs no retries and no partial-failure recovery. A missing assertion
//! match is the primary expected test-failure signal and carries the full
//! observed sequence so an unexpected interleaving is debuggable.

use crate::event::{format_sequence, EventSequence};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// A thread body that terminated abnormally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadFailure {
    /// Name the body was registered under.
    pub thread: String,
    /// Extracted panic message, or a placeholder for non-string payloads.
    pub message: String,
}

/// Errors produced by the harness.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `first`/`latest` was called on an empty event log.
    #[error("event log is empty")]
    EmptyLog,

    /// No assertion callback is registered for the observed event sequence.
    #[error("no assertion registered for event sequence:\n{}", format_sequence(.observed))]
    NoAssertionRegistered {
        /// The sequence that was looked up and not found.
        observed: EventSequence,
    },

    /// One or more thread bodies panicked; surfaced at the join point.
    #[error("{} thread body(ies) failed: {}", .failures.len(), describe_failures(.failures))]
    ThreadBodyFailure {
        /// Every failed thread, in registration order.
        failures: Vec<ThreadFailure>,
    },

    /// The OS refused to spawn a thread.
    #[error("failed to spawn thread {thread:?}")]
    Spawn {
        /// Name the body was registered under.
        thread: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The observed sequence carried by [`Error::NoAssertionRegistered`], if any.
    #[must_use]
    pub fn observed_sequence(&self) -> Option<&EventSequence> {
        match self {
            Self::NoAssertionRegistered { observed } => Some(observed),
            _ => None,
        }
    }
}

fn describe_failures(failures: &[ThreadFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{:?} ({})", f.thread, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn no_assertion_error_reports_observed_sequence() {
        let observed = vec![Event::begin("t", "op"), Event::end("t", "op")];
        let err = Error::NoAssertionRegistered {
            observed: observed.clone(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("no assertion registered"));
        assert!(rendered.contains("{\"t\", \"op\", BEGIN}"));
        assert!(rendered.contains("{\"t\", \"op\", END}"));
        assert_eq!(err.observed_sequence(), Some(&observed));
    }

    #[test]
    fn thread_failure_error_names_every_thread() {
        let err = Error::ThreadBodyFailure {
            failures: vec![
                ThreadFailure {
                    thread: "writer".into(),
                    message: "index out of bounds".into(),
                },
                ThreadFailure {
                    thread: "reader".into(),
                    message: "explicit panic".into(),
                },
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("\"writer\""));
        assert!(rendered.contains("\"reader\""));
        assert!(rendered.contains("index out of bounds"));
    }

    #[test]
    fn empty_log_error_has_no_observed_sequence() {
        assert!(Error::EmptyLog.observed_sequence().is_none());
    }
}
