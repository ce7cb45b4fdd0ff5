// src/events/mod.rs

//! Lifecycle event channel.
//!
//! The process layer posts [`LifecycleEvent`]s into an [`EventSink`]; a
//! single background task ([`EventDispatcher`]) drains them in FIFO order
//! and hands each one to a [`LifecycleObserver`] exactly once.
//!
//! - [`channel`] defines the sink/queue pair.
//! - [`dispatcher`] owns the background task and its stop/join protocol.
//! - [`observer`] defines the callback trait and the stdout observer.

use std::fmt;

pub mod channel;
pub mod dispatcher;
pub mod observer;

pub use channel::{EventQueue, EventSink, event_channel};
pub use dispatcher::EventDispatcher;
pub use observer::{ConsoleObserver, LifecycleObserver};

/// What happened to a supervised process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEventKind {
    /// Launch parameters are wired; the exec is about to be attempted.
    Setup,
    /// The OS accepted the launch.
    StartSuccess { pid: u32 },
    /// The OS rejected the launch.
    StartError { reason: String },
    /// The process is gone, either on its own or after a kill.
    Exit { code: i32, reason: String },
    /// Follow-up posted by the dispatcher after it delivered `Exit`.
    Drained,
}

/// A lifecycle event attributed to one process by display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub process: String,
    pub kind: LifecycleEventKind,
}

impl LifecycleEvent {
    pub fn new(process: impl Into<String>, kind: LifecycleEventKind) -> Self {
        Self {
            process: process.into(),
            kind,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.kind, LifecycleEventKind::Exit { .. })
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LifecycleEventKind::Setup => write!(f, "[{}] setup complete", self.process),
            LifecycleEventKind::StartSuccess { pid } => {
                write!(f, "[{}] started (pid {pid})", self.process)
            }
            LifecycleEventKind::StartError { reason } => {
                write!(f, "[{}] start failed: {reason}", self.process)
            }
            LifecycleEventKind::Exit { code, reason } => {
                write!(f, "[{}] exited with code {code} ({reason})", self.process)
            }
            LifecycleEventKind::Drained => write!(f, "[{}] exit delivered", self.process),
        }
    }
}
