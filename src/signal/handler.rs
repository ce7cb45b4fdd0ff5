// src/signal/handler.rs

//! OS signal registration.
//!
//! The handler itself does nothing but call [`SignalLatch::raise`] on the
//! process-wide [`TERMINATION`] latch: no allocation, no I/O, no locks.

use crate::errors::SignalRegistrationFailure;

use super::latch::SignalLatch;

/// Latch raised by every signal registered through [`register`].
pub static TERMINATION: SignalLatch = SignalLatch::new();

#[cfg(unix)]
extern "C" fn on_signal(signal: nix::libc::c_int) {
    TERMINATION.raise(signal);
}

/// Route the conventional "polite terminate" signal (SIGTERM) into
/// [`TERMINATION`].
#[cfg(unix)]
pub fn install_termination_handler() -> Result<&'static SignalLatch, SignalRegistrationFailure> {
    register(nix::sys::signal::Signal::SIGTERM as i32)
}

/// Register the latch-raising handler for `signal_id`.
///
/// Fails for numbers the platform does not know and for signals that cannot
/// be caught (SIGKILL, SIGSTOP).
#[cfg(unix)]
pub fn register(signal_id: i32) -> Result<&'static SignalLatch, SignalRegistrationFailure> {
    use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

    let failure = |reason: String| SignalRegistrationFailure {
        signal: signal_id,
        reason,
    };

    let signal = Signal::try_from(signal_id).map_err(|errno| failure(errno.desc().to_string()))?;

    let action = SigAction::new(
        SigHandler::Handler(on_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );

    // SAFETY: `on_signal` only performs lock-free atomic stores on a static.
    unsafe { sigaction(signal, &action) }.map_err(|errno| failure(errno.desc().to_string()))?;

    tracing::debug!(signal = %signal, "termination handler installed");
    Ok(&TERMINATION)
}

#[cfg(not(unix))]
pub fn install_termination_handler() -> Result<&'static SignalLatch, SignalRegistrationFailure> {
    register(15)
}

#[cfg(not(unix))]
pub fn register(signal_id: i32) -> Result<&'static SignalLatch, SignalRegistrationFailure> {
    Err(SignalRegistrationFailure {
        signal: signal_id,
        reason: "signal handlers are only supported on unix targets".to_string(),
    })
}
