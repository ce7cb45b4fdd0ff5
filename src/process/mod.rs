// src/process/mod.rs

//! Process handle layer.
//!
//! This module owns exactly one child process per [`ProcessHandle`], using
//! `tokio::process`, and reports its lifecycle through an
//! [`EventSink`](crate::events::EventSink).
//!
//! - [`record`] holds the `ProcessRecord` and its monotonic state machine.
//! - [`handle`] spawns the child and implements `wait_for` / `terminate`.
//! - [`terminate`] normalizes raw kill results into semantic outcomes.

pub mod handle;
pub mod record;
pub mod terminate;

pub use handle::{ProcessHandle, SpawnRequest, WaitOutcome};
pub use record::{ProcessRecord, ProcessState};
pub use terminate::{TerminateOutcome, indicates_already_exited, normalize_kill_result};
