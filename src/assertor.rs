//! Assertion dispatch keyed by exact event sequence.
//!
//! An [`Assertor`] maps observed event sequences to assertion callbacks. The
//! test author registers one callback per legal interleaving — usually in
//! bulk, from [`enumerate_schedules`](crate::schedule::enumerate_schedules) —
//! and after the run dispatches on the log's final contents. A sequence with
//! no registered callback is the primary test-failure signal and reports the
//! full observed interleaving.
//!
//! Not safe for concurrent mutation: build the table before
//! [`Runner::run`](crate::runner::Runner::run), query it after all threads
//! have joined.

use crate::error::{Error, Result};
use crate::event::{Event, EventSequence};
use crate::log::EventLog;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A registered assertion callback.
///
/// Stored shared so one callback can back many dispatch keys and be invoked
/// on repeated asserts.
pub type AssertionFn = Arc<dyn Fn()>;

/// Dispatch table from exact event sequences to assertion callbacks.
#[derive(Default)]
pub struct Assertor {
    table: HashMap<EventSequence, AssertionFn>,
}

impl Assertor {
    /// Creates an empty dispatch table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `assertion` for one exact sequence, overwriting any
    /// previous entry for that key.
    pub fn insert(&mut self, sequence: EventSequence, assertion: impl Fn() + 'static) {
        self.table.insert(sequence, Arc::new(assertion));
    }

    /// Registers one `assertion` for several exact sequences, overwriting on
    /// key collision.
    pub fn insert_many(&mut self, sequences: Vec<EventSequence>, assertion: impl Fn() + 'static) {
        let assertion: AssertionFn = Arc::new(assertion);
        for sequence in sequences {
            self.table.insert(sequence, Arc::clone(&assertion));
        }
    }

    /// Removes the entry for `sequence`.
    ///
    /// Returns true if an entry existed and was removed.
    pub fn remove(&mut self, sequence: &[Event]) -> bool {
        self.table.remove(sequence).is_some()
    }

    /// Returns the callback registered for an exact sequence.
    ///
    /// # Errors
    ///
    /// [`Error::NoAssertionRegistered`] if no entry exists, carrying the
    /// queried sequence.
    pub fn get(&self, sequence: &[Event]) -> Result<&AssertionFn> {
        self.table
            .get(sequence)
            .ok_or_else(|| Error::NoAssertionRegistered {
                observed: sequence.to_vec(),
            })
    }

    /// Number of registered sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no sequences are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Dispatches on the log's current contents.
    ///
    /// Takes a snapshot of `log`, looks it up, and invokes the matching
    /// callback. The snapshot is taken first so no user callback ever runs
    /// while the log's lock is held.
    ///
    /// # Errors
    ///
    /// [`Error::NoAssertionRegistered`] carrying the observed sequence if no
    /// entry matches.
    pub fn assert(&self, log: &EventLog) -> Result<()> {
        let observed = log.snapshot();
        match self.table.get(observed.as_slice()) {
            Some(assertion) => {
                debug!(events = observed.len(), "dispatching matched assertion");
                let assertion: &dyn Fn() = assertion.as_ref();
                assertion();
                Ok(())
            }
            None => Err(Error::NoAssertionRegistered { observed }),
        }
    }

    /// Dispatches on the log's current contents, falling back to `default`
    /// instead of erroring when no entry matches.
    pub fn assert_or(&self, log: &EventLog, default: impl Fn()) {
        let observed = log.snapshot();
        match self.table.get(observed.as_slice()) {
            Some(assertion) => {
                debug!(events = observed.len(), "dispatching matched assertion");
                let assertion: &dyn Fn() = assertion.as_ref();
                assertion();
            }
            None => {
                debug!(events = observed.len(), "no match, dispatching default");
                default();
            }
        }
    }
}

impl std::fmt::Debug for Assertor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertor")
            .field("sequences", &self.table.len())
            .finish()
    }
}
