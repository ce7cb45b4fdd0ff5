// src/signal/latch.rs

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

// Both cells must be lock-free for `raise` to be callable from a signal
// handler.
const _: () = assert!(cfg!(target_has_atomic = "8") && cfg!(target_has_atomic = "32"));

/// A one-way flag plus the signal number that set it.
///
/// `raise` only performs two atomic stores, so it is async-signal-safe. The
/// signal number is written before the flag (release) and read only after
/// the flag has been observed (acquire), so a reader that sees the flag also
/// sees the number.
#[derive(Debug)]
pub struct SignalLatch {
    raised: AtomicBool,
    signal: AtomicI32,
}

impl SignalLatch {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            signal: AtomicI32::new(0),
        }
    }

    /// Set the latch. Safe to call from a signal handler.
    ///
    /// Later deliveries are ignored: the first signal number wins.
    pub fn raise(&self, signal: i32) {
        if self.raised.load(Ordering::Acquire) {
            return;
        }
        self.signal.store(signal, Ordering::Relaxed);
        self.raised.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// The signal that raised the latch, or `None` while it is still clear.
    pub fn raised_signal(&self) -> Option<i32> {
        if self.is_raised() {
            Some(self.signal.load(Ordering::Relaxed))
        } else {
            None
        }
    }
}

impl Default for SignalLatch {
    fn default() -> Self {
        Self::new()
    }
}
