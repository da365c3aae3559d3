//! Threadweave: an observable thread-interleaving harness for concurrency tests.
//!
//! # Overview
//!
//! Threadweave runs test-authored thread bodies as real OS threads, records
//! the BEGIN/END markers they emit around named operations into one shared
//! chronological log, and afterwards dispatches an assertion callback keyed
//! by the exact sequence that was observed. Because the realized interleaving
//! is nondeterministic, the harness also enumerates every legal interleaving
//! of an idealized ordering up front, so an assertion can be registered for
//! each one before the run.
//!
//! # What it does not do
//!
//! The harness detects no races and verifies no linearizability; it gives the
//! test author a way to *observe* one realized interleaving and to *prepare*
//! assertions for all legal ones. It exercises no control over the OS
//! scheduler: no deterministic replay, no forced interleavings, no timeouts —
//! a non-terminating thread body hangs the run.
//!
//! # Example
//!
//! ```
//! use threadweave::{enumerate_schedules, Assertor, Event, Runner};
//!
//! let mut runner = Runner::new();
//! runner.set_thread("writer", |cx| {
//!     let _op = cx.operation("insert");
//! });
//! runner.set_thread("reader", |cx| {
//!     let _op = cx.operation("find");
//! });
//!
//! // One assertion per legal interleaving of the idealized ordering.
//! let idealized = vec![
//!     Event::begin("writer", "insert"),
//!     Event::end("writer", "insert"),
//!     Event::begin("reader", "find"),
//!     Event::end("reader", "find"),
//! ];
//! let mut assertor = Assertor::new();
//! assertor.insert_many(enumerate_schedules(&idealized), || {
//!     // assert on shared state for this schedule
//! });
//!
//! runner.run().unwrap();
//! assertor.assert(runner.event_log()).unwrap();
//! ```
//!
//! # Module structure
//!
//! - [`event`]: event values and sequences
//! - [`log`]: the shared append-only event log
//! - [`context`]: per-thread emission handle and scoped operation guard
//! - [`runner`]: thread registry, spawn and join-all
//! - [`schedule`]: enumeration of order-preserving interleavings
//! - [`assertor`]: sequence-keyed assertion dispatch
//! - [`error`]: error types

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

pub mod assertor;
pub mod context;
pub mod error;
pub mod event;
pub mod log;
pub mod runner;
pub mod schedule;

pub use assertor::{AssertionFn, Assertor};
pub use context::{ExecutionContext, OperationGuard};
pub use error::{Error, Result, ThreadFailure};
pub use event::{Event, EventKind, EventSequence};
pub use log::EventLog;
pub use runner::{Runner, ThreadBody};
pub use schedule::{enumerate_schedules, is_order_preserving, schedule_count};
