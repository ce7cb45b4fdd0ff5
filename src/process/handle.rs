// src/process/handle.rs

//! Spawning and owning one child process.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::{SpawnFailure, TerminationError, WaitError};
use crate::events::{EventSink, LifecycleEvent, LifecycleEventKind};

use super::record::{ProcessRecord, ProcessState};
use super::terminate::{TerminateOutcome, normalize_kill_result};

/// A kill request travels to the monitor task with a reply slot for the raw
/// result.
type KillRequest = oneshot::Sender<io::Result<()>>;

/// What to launch.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl SpawnRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Executable file name, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

/// Result of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The child exited on its own.
    ExitedWithCode(i32),
    /// The child ended by signal, so it has no exit code.
    Killed { signal: Option<i32> },
    /// The bound elapsed with the child still alive.
    StillRunning,
}

impl From<ProcessState> for WaitOutcome {
    /// `SpawnFailed` never appears on a live handle; it is grouped with the
    /// non-exited states.
    fn from(state: ProcessState) -> Self {
        match state {
            ProcessState::ExitedNormally { code } => WaitOutcome::ExitedWithCode(code),
            ProcessState::Terminated { signal } => WaitOutcome::Killed { signal },
            ProcessState::Spawning | ProcessState::Running | ProcessState::SpawnFailed => {
                WaitOutcome::StillRunning
            }
        }
    }
}

/// Owner of one running child.
///
/// The `tokio::process::Child` itself lives in a monitor task that waits for
/// the exit, publishes the terminal state and posts the `Exit` event. The
/// handle talks to it through a watch channel (state) and an mpsc channel
/// (kill requests).
#[derive(Debug)]
pub struct ProcessHandle {
    record: ProcessRecord,
    kill_tx: mpsc::Sender<KillRequest>,
    monitor: JoinHandle<()>,
}

impl ProcessHandle {
    /// Launch `request` with stdin closed and stdout/stderr inherited.
    ///
    /// Posts `Setup` before the launch, then `StartSuccess` or `StartError`.
    /// Must be called from within a Tokio runtime.
    pub fn spawn(request: &SpawnRequest, sink: EventSink) -> Result<Self, SpawnFailure> {
        let name = request.display_name();
        let (state_tx, state_rx) = watch::channel(ProcessState::Spawning);

        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        sink.post(LifecycleEvent::new(&name, LifecycleEventKind::Setup));

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                state_tx.send_if_modified(|s| s.advance(ProcessState::SpawnFailed));
                warn!(
                    process = %name,
                    program = %request.program.display(),
                    error = %source,
                    "failed to spawn child process"
                );
                sink.post(LifecycleEvent::new(
                    &name,
                    LifecycleEventKind::StartError {
                        reason: source.to_string(),
                    },
                ));
                return Err(SpawnFailure {
                    display_name: name,
                    source,
                });
            }
        };

        let pid = child.id().unwrap_or(0);
        state_tx.send_if_modified(|s| s.advance(ProcessState::Running));
        info!(process = %name, pid, "child process started");
        sink.post(LifecycleEvent::new(
            &name,
            LifecycleEventKind::StartSuccess { pid },
        ));

        let (kill_tx, kill_rx) = mpsc::channel::<KillRequest>(4);
        let record = ProcessRecord::new(pid, name.clone(), state_rx);
        let monitor = tokio::spawn(monitor_child(child, pid, name, state_tx, kill_rx, sink));

        Ok(Self {
            record,
            kill_tx,
            monitor,
        })
    }

    pub fn record(&self) -> &ProcessRecord {
        &self.record
    }

    pub fn pid(&self) -> u32 {
        self.record.pid()
    }

    pub fn state(&self) -> ProcessState {
        self.record.state()
    }

    /// Block for at most `timeout` waiting for the child to exit.
    ///
    /// An elapsed timeout is `StillRunning`, not an error. A zero timeout
    /// reports only an exit that has already been observed.
    pub async fn wait_for(&self, timeout: Duration) -> Result<WaitOutcome, WaitError> {
        let mut state = self.record.watch();
        match tokio::time::timeout(timeout, state.wait_for(ProcessState::is_terminal)).await {
            Err(_elapsed) => Ok(WaitOutcome::StillRunning),
            Ok(Ok(terminal)) => Ok(WaitOutcome::from(*terminal)),
            Ok(Err(_closed)) => Err(WaitError::StatusUnavailable { pid: self.pid() }),
        }
    }

    /// Forcibly kill the child.
    ///
    /// Safe to call any number of times: once the child is gone every call
    /// returns `Ok(TerminateOutcome::AlreadyExited)`.
    pub async fn terminate(&self) -> Result<TerminateOutcome, TerminationError> {
        let pid = self.pid();

        if self.state().is_terminal() {
            debug!(pid, "terminate: child already exited");
            return Ok(TerminateOutcome::AlreadyExited);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        if self.kill_tx.send(reply_tx).await.is_err() {
            debug!(pid, "terminate: monitor already finished");
            return Ok(TerminateOutcome::AlreadyExited);
        }

        match reply_rx.await {
            Ok(result) => normalize_kill_result(pid, result),
            // The monitor saw the exit before it got to our request.
            Err(_) => Ok(TerminateOutcome::AlreadyExited),
        }
    }

    /// Wait for the monitor task to finish (the child has exited and its
    /// `Exit` event has been posted), bounded by `timeout`.
    ///
    /// Returns the state observed afterwards.
    pub async fn settle(self, timeout: Duration) -> ProcessState {
        let state = self.record.clone();
        match tokio::time::timeout(timeout, self.monitor).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(pid = state.pid(), error = %e, "child monitor task failed"),
            Err(_) => debug!(pid = state.pid(), "child monitor still running after settle bound"),
        }
        state.state()
    }
}

/// Own the child until it exits, serving kill requests in between.
async fn monitor_child(
    mut child: Child,
    pid: u32,
    name: String,
    state_tx: watch::Sender<ProcessState>,
    mut kill_rx: mpsc::Receiver<KillRequest>,
    sink: EventSink,
) {
    let mut kill_delivered = false;

    let waited = loop {
        tokio::select! {
            status = child.wait() => break status,

            Some(reply) = kill_rx.recv() => {
                let result = child.start_kill();
                match &result {
                    Ok(()) => {
                        kill_delivered = true;
                        info!(process = %name, pid, "kill delivered to child process");
                    }
                    Err(e) => debug!(process = %name, pid, error = %e, "kill request failed"),
                }
                // The requester may have given up; the result is then moot.
                let _ = reply.send(result);
            }
        }
    };

    match waited {
        Ok(status) => {
            let terminal = classify_exit(&status, kill_delivered);
            state_tx.send_if_modified(|s| s.advance(terminal));

            let code = status.code().unwrap_or(-1);
            info!(process = %name, pid, code, state = %terminal, "child process exited");
            sink.post(LifecycleEvent::new(
                &name,
                LifecycleEventKind::Exit {
                    code,
                    reason: status.to_string(),
                },
            ));
        }
        Err(e) => {
            // Dropping `state_tx` without a terminal state makes waiters
            // report `WaitError`.
            error!(process = %name, pid, error = %e, "waiting for child process failed");
            sink.post(LifecycleEvent::new(
                &name,
                LifecycleEventKind::Exit {
                    code: -1,
                    reason: e.to_string(),
                },
            ));
        }
    }
}

#[cfg(unix)]
fn classify_exit(status: &ExitStatus, _kill_delivered: bool) -> ProcessState {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(signal) => ProcessState::Terminated {
            signal: Some(signal),
        },
        None => ProcessState::ExitedNormally {
            code: status.code().unwrap_or(-1),
        },
    }
}

#[cfg(not(unix))]
fn classify_exit(status: &ExitStatus, kill_delivered: bool) -> ProcessState {
    if kill_delivered {
        ProcessState::Terminated { signal: None }
    } else {
        ProcessState::ExitedNormally {
            code: status.code().unwrap_or(-1),
        }
    }
}
