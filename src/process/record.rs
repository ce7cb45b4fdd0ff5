// src/process/record.rs

use std::fmt;

use tokio::sync::watch;

/// Lifecycle state of one supervised child.
///
/// ```text
/// Spawning ─► Running ─► ExitedNormally
///    │           └─────► Terminated
///    └─► SpawnFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Spawning,
    Running,
    /// Exited on its own with an exit code.
    ExitedNormally { code: i32 },
    /// Ended by a signal / forced kill. `signal` is known on unix only.
    Terminated { signal: Option<i32> },
    SpawnFailed,
}

impl ProcessState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProcessState::ExitedNormally { .. }
                | ProcessState::Terminated { .. }
                | ProcessState::SpawnFailed
        )
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessState::ExitedNormally { code } => Some(*code),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: &ProcessState) -> bool {
        matches!(
            (self, next),
            (ProcessState::Spawning, ProcessState::Running)
                | (ProcessState::Spawning, ProcessState::SpawnFailed)
                | (ProcessState::Running, ProcessState::ExitedNormally { .. })
                | (ProcessState::Running, ProcessState::Terminated { .. })
        )
    }

    /// Move to `next` if that is a legal transition. Returns whether the
    /// state changed; illegal transitions leave it untouched.
    pub fn advance(&mut self, next: ProcessState) -> bool {
        if self.can_transition_to(&next) {
            *self = next;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Spawning => write!(f, "spawning"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::ExitedNormally { code } => write!(f, "exited normally (code {code})"),
            ProcessState::Terminated { signal: Some(sig) } => {
                write!(f, "terminated (signal {sig})")
            }
            ProcessState::Terminated { signal: None } => write!(f, "terminated"),
            ProcessState::SpawnFailed => write!(f, "spawn failed"),
        }
    }
}

/// Identity and live state of one spawned child.
///
/// The state is published by the handle's monitor task; this record only
/// holds a read view of it.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pid: u32,
    display_name: String,
    state: watch::Receiver<ProcessState>,
}

impl ProcessRecord {
    pub(crate) fn new(pid: u32, display_name: String, state: watch::Receiver<ProcessState>) -> Self {
        Self {
            pid,
            display_name,
            state,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ProcessState {
        *self.state.borrow()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.state().exit_code()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<ProcessState> {
        self.state.clone()
    }
}
