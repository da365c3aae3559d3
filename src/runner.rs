//! Thread registry and concurrent execution.
//!
//! A [`Runner`] owns a name→body registry and one shared [`EventLog`].
//! [`Runner::run`] spawns one real OS thread per registered body, hands each
//! an [`ExecutionContext`] bound to the shared log, and joins them all before
//! returning. There is no timeout and no cancellation: a non-terminating body
//! hangs `run()` forever. That is a documented limitation of the harness, not
//! something it papers over.
//!
//! A body that panics surfaces at the join point as
//! [`Error::ThreadBodyFailure`]; concurrency bugs are never silently
//! swallowed.

use crate::context::ExecutionContext;
use crate::error::{Error, Result, ThreadFailure};
use crate::log::EventLog;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use tracing::{debug, trace};

/// A registered thread body.
///
/// Stored shared so the registry survives [`Runner::run`] and the same body
/// can be executed across repeated runs.
pub type ThreadBody = Arc<dyn Fn(ExecutionContext) + Send + Sync + 'static>;

/// Runs registered thread bodies concurrently against one shared event log.
#[derive(Default)]
pub struct Runner {
    log: Arc<EventLog>,
    bodies: BTreeMap<String, ThreadBody>,
}

impl Runner {
    /// Creates a runner with an empty registry and an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `name`, overwriting any previous entry.
    pub fn set_thread(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(ExecutionContext) + Send + Sync + 'static,
    ) {
        self.bodies.insert(name.into(), Arc::new(body));
    }

    /// Removes the body registered under `name`.
    ///
    /// Returns true if an entry existed and was removed.
    pub fn remove_thread(&mut self, name: &str) -> bool {
        self.bodies.remove(name).is_some()
    }

    /// Number of registered thread bodies.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.bodies.len()
    }

    /// The accumulated event log.
    ///
    /// Valid at any time, including mid-run (reflecting partial progress),
    /// but intended to be read after [`run`](Self::run) returns so the
    /// snapshot is deterministic.
    #[must_use]
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// A shared handle to the event log.
    #[must_use]
    pub fn log_handle(&self) -> Arc<EventLog> {
        Arc::clone(&self.log)
    }

    /// Spawns every registered body on its own OS thread and joins them all.
    ///
    /// Blocks the calling thread until every spawned thread has terminated.
    ///
    /// # Errors
    ///
    /// [`Error::Spawn`] if the OS refuses to create a thread (threads spawned
    /// before the failure are joined first), and [`Error::ThreadBodyFailure`]
    /// naming every body that panicked.
    pub fn run(&self) -> Result<()> {
        let mut handles: Vec<(String, thread::JoinHandle<()>)> =
            Vec::with_capacity(self.bodies.len());
        let mut spawn_error = None;

        for (name, body) in &self.bodies {
            let context = ExecutionContext::new(Arc::clone(&self.log), name.as_str());
            let body = Arc::clone(body);
            trace!(thread = %name, "spawning thread body");
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn(move || body(context));
            match spawned {
                Ok(handle) => handles.push((name.clone(), handle)),
                Err(source) => {
                    spawn_error = Some(Error::Spawn {
                        thread: name.clone(),
                        source,
                    });
                    break;
                }
            }
        }

        let mut failures = Vec::new();
        for (name, handle) in handles {
            match handle.join() {
                Ok(()) => trace!(thread = %name, "thread body finished"),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    debug!(thread = %name, %message, "thread body panicked");
                    failures.push(ThreadFailure {
                        thread: name,
                        message,
                    });
                }
            }
        }

        if let Some(error) = spawn_error {
            return Err(error);
        }
        if failures.is_empty() {
            debug!(events = self.log.len(), "all thread bodies joined");
            Ok(())
        } else {
            Err(Error::ThreadBodyFailure { failures })
        }
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("threads", &self.bodies.keys().collect::<Vec<_>>())
            .field("events", &self.log.len())
            .finish()
    }
}

/// Extracts a human-readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
