// src/worker/mod.rs

//! The supervised side: a cooperative loop that stops once the termination
//! latch is raised.
//!
//! - [`worker_loop`] owns the poll/sleep cadence.
//! - [`echo`] is the payload used by the `echo-loop` binary.

pub mod echo;
pub mod worker_loop;

pub use echo::EchoUnit;
pub use worker_loop::{WorkUnit, WorkerExit, WorkerLoop};
