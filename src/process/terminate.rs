// src/process/terminate.rs

//! Normalization of kill results.
//!
//! The raw result of a kill request does not map one-to-one onto "did the
//! termination succeed". A child that is already gone reports an error
//! (`ESRCH` on unix, `InvalidInput` from Tokio once the child has been
//! reaped), and some platforms report failure alongside a zero status. All
//! of those mean the same thing to a caller: the process is not running.

use std::io;

use crate::errors::TerminationError;

/// Semantic result of [`ProcessHandle::terminate`](super::ProcessHandle::terminate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    /// The kill was delivered; an `Exit` event will follow.
    Requested,
    /// The process had already exited; nothing was sent.
    AlreadyExited,
}

pub fn normalize_kill_result(
    pid: u32,
    result: io::Result<()>,
) -> Result<TerminateOutcome, TerminationError> {
    match result {
        Ok(()) => Ok(TerminateOutcome::Requested),
        Err(e) if indicates_already_exited(&e) => Ok(TerminateOutcome::AlreadyExited),
        Err(source) => Err(TerminationError::Rejected { pid, source }),
    }
}

/// Whether a kill error really means "no such process".
pub fn indicates_already_exited(err: &io::Error) -> bool {
    match err.raw_os_error() {
        // Failure flag carrying a zero status.
        Some(0) => true,
        #[cfg(unix)]
        Some(code) if code == nix::errno::Errno::ESRCH as i32 => true,
        Some(_) => false,
        // Tokio refuses to signal a child it has already reaped.
        None => err.kind() == io::ErrorKind::InvalidInput,
    }
}
