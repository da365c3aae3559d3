//! Per-thread execution context and scoped operation instrumentation.
//!
//! An [`ExecutionContext`] is the only way a running thread body may emit
//! events: it binds the runner's shared [`EventLog`] to one fixed thread name
//! and exposes begin/end emission. The [`OperationGuard`] returned by
//! [`ExecutionContext::operation`] turns the begin/end pairing into a
//! structural guarantee: END is logged on every exit path, including panic
//! unwinding, so a partially-executed region can never leave an unbalanced
//! marker behind.

use crate::event::Event;
use crate::log::EventLog;
use std::sync::Arc;

/// Handle through which a thread body logs operation events.
///
/// Stateless beyond its bindings; cloning is cheap and clones share the log.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    log: Arc<EventLog>,
    thread: Arc<str>,
}

impl ExecutionContext {
    /// Creates a context bound to `log` under the given thread name.
    #[must_use]
    pub fn new(log: Arc<EventLog>, thread: impl Into<Arc<str>>) -> Self {
        Self {
            log,
            thread: thread.into(),
        }
    }

    /// Name of the thread this context is bound to.
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread
    }

    /// Logs a BEGIN marker for `operation`.
    pub fn log_operation_begin(&self, operation: impl Into<String>) {
        self.log.push(Event::begin(self.thread.as_ref(), operation));
    }

    /// Logs an END marker for `operation`.
    pub fn log_operation_end(&self, operation: impl Into<String>) {
        self.log.push(Event::end(self.thread.as_ref(), operation));
    }

    /// Enters a named operation region, logging BEGIN now and END when the
    /// returned guard drops.
    ///
    /// The guard logs END on any exit path: normal scope exit, early return,
    /// or panic unwind.
    #[must_use = "dropping the guard immediately logs END right after BEGIN"]
    pub fn operation(&self, operation: impl Into<String>) -> OperationGuard<'_> {
        let operation = operation.into();
        self.log_operation_begin(operation.clone());
        OperationGuard {
            context: self,
            operation,
        }
    }
}

/// Scoped marker for one instrumented operation region.
///
/// Created by [`ExecutionContext::operation`]; logs the END marker on drop.
#[derive(Debug)]
pub struct OperationGuard<'a> {
    context: &'a ExecutionContext,
    operation: String,
}

impl OperationGuard<'_> {
    /// Name of the operation this guard brackets.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.context.log_operation_end(self.operation.clone());
    }
}
