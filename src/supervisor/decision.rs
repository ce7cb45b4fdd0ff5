// src/supervisor/decision.rs

//! Pure decision logic for the supervisor.
//!
//! No Tokio, no processes: these functions map observed results onto the
//! next action and the final outcome, and are tested directly.

use crate::errors::{TerminationError, WaitError};
use crate::process::{TerminateOutcome, WaitOutcome};

use super::SupervisionOutcome;

/// What to do after the bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The child is gone; report it and leave it alone.
    Report(SupervisionOutcome),
    /// The child is (or may be) alive; kill it.
    Terminate,
}

/// Map a wait result onto the next step.
///
/// A failed wait is handled like `StillRunning`: the child's state is
/// unknown, so the supervisor attempts the kill.
pub fn decide(wait: &Result<WaitOutcome, WaitError>) -> Decision {
    match wait {
        Ok(WaitOutcome::ExitedWithCode(code)) => {
            Decision::Report(SupervisionOutcome::ExitedOnItsOwn { code: *code })
        }
        Ok(WaitOutcome::Killed { signal }) => {
            Decision::Report(SupervisionOutcome::KilledExternally { signal: *signal })
        }
        Ok(WaitOutcome::StillRunning) | Err(_) => Decision::Terminate,
    }
}

/// Map an already-normalized terminate result onto the final outcome.
pub fn reconcile(result: &Result<TerminateOutcome, TerminationError>) -> SupervisionOutcome {
    match result {
        Ok(TerminateOutcome::Requested) => SupervisionOutcome::Terminated,
        Ok(TerminateOutcome::AlreadyExited) => SupervisionOutcome::ExitedBeforeTerminate,
        Err(e) => SupervisionOutcome::TerminateFailed {
            reason: e.to_string(),
        },
    }
}
