// src/signal/mod.rs

//! Signal-driven shutdown.
//!
//! - [`latch`] holds the set-once flag shared between the signal handler and
//!   normal code.
//! - [`handler`] registers the OS-level handler that raises the process-wide
//!   [`TERMINATION`] latch.

pub mod handler;
pub mod latch;

pub use handler::{TERMINATION, install_termination_handler, register};
pub use latch::SignalLatch;
