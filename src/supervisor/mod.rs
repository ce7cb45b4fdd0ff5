// src/supervisor/mod.rs

//! Supervisor loop for one child process.
//!
//! The decision logic (what to do with a wait result, how to read a
//! terminate result) lives in the pure [`decision`]; the async shell that
//! sleeps, spawns and talks to the dispatcher is in [`runtime`].

use std::fmt;

use crate::process::{ProcessState, WaitOutcome};
use crate::types::ExitPolicy;

pub mod decision;
pub mod runtime;

pub use decision::{Decision, decide, reconcile};
pub use runtime::Supervisor;

/// How a supervision run ended, from the supervisor's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisionOutcome {
    /// The child never started.
    SpawnFailed { reason: String },
    /// The child exited on its own inside the observation window.
    ExitedOnItsOwn { code: i32 },
    /// The child was already gone, ended by a signal we did not send.
    KilledExternally { signal: Option<i32> },
    /// The supervisor killed the child.
    Terminated,
    /// The child exited between the wait timing out and the kill.
    ExitedBeforeTerminate,
    /// The kill request failed for a reason other than "already gone".
    TerminateFailed { reason: String },
}

/// Everything the supervisor learned about one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisionReport {
    pub display_name: String,
    /// `None` when the spawn failed.
    pub pid: Option<u32>,
    /// Result of the bounded wait, if one happened and succeeded.
    pub wait: Option<WaitOutcome>,
    /// Set when the wait primitive itself failed.
    pub wait_error: Option<String>,
    pub terminate_called: bool,
    pub outcome: SupervisionOutcome,
    /// Process state after the drain grace.
    pub final_state: ProcessState,
}

impl SupervisionReport {
    /// Status lines for stdout, in order.
    pub fn narrate(&self) -> Vec<String> {
        let name = &self.display_name;
        let mut lines = Vec::new();

        if let Some(err) = &self.wait_error {
            lines.push(format!("waiting for {name} failed: {err}"));
        }

        lines.push(match &self.outcome {
            SupervisionOutcome::SpawnFailed { reason } => {
                format!("failed to launch {name}: {reason}")
            }
            SupervisionOutcome::ExitedOnItsOwn { code } => {
                format!("{name} already exited (code {code})")
            }
            SupervisionOutcome::KilledExternally { signal: Some(sig) } => {
                format!("{name} already exited (killed by signal {sig})")
            }
            SupervisionOutcome::KilledExternally { signal: None } => {
                format!("{name} already exited (killed)")
            }
            SupervisionOutcome::Terminated => format!("{name} terminated"),
            SupervisionOutcome::ExitedBeforeTerminate => {
                format!("{name} exited before it could be terminated")
            }
            SupervisionOutcome::TerminateFailed { reason } => {
                format!("{name} terminate failure: {reason}")
            }
        });

        lines
    }

    /// Exit status for the supervisor process under `policy`.
    ///
    /// With `Propagate`: the child's code for a normal exit, `128 + signal`
    /// for a child killed by someone else, 127 for a spawn failure, 1 for a
    /// failed kill, 0 when the supervisor terminated the child on schedule.
    pub fn exit_code(&self, policy: ExitPolicy) -> i32 {
        if policy == ExitPolicy::AlwaysZero {
            return 0;
        }

        match &self.outcome {
            SupervisionOutcome::SpawnFailed { .. } => 127,
            SupervisionOutcome::ExitedOnItsOwn { code } => *code,
            SupervisionOutcome::KilledExternally { signal: Some(sig) } => 128 + sig,
            SupervisionOutcome::KilledExternally { signal: None } => 1,
            SupervisionOutcome::Terminated => 0,
            SupervisionOutcome::ExitedBeforeTerminate => {
                self.final_state.exit_code().unwrap_or(0)
            }
            SupervisionOutcome::TerminateFailed { .. } => 1,
        }
    }
}

impl fmt::Display for SupervisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.narrate().join("\n"))
    }
}
