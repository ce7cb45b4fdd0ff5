// src/errors.rs

//! Crate-wide error types.
//!
//! Each lifecycle step has its own error so the supervisor can turn it into
//! a narrative outcome at that step. Only [`SignalRegistrationFailure`] is
//! fatal to a process, and only to the worker.

use std::io;

use thiserror::Error;

/// The child could not be launched (missing executable, permission denied,
/// platform rejected the exec).
#[derive(Error, Debug)]
#[error("failed to spawn '{display_name}': {source}")]
pub struct SpawnFailure {
    pub display_name: String,
    #[source]
    pub source: io::Error,
}

/// The wait primitive failed in a way that is neither "still running" nor
/// "exited". The child's real state is unknown.
#[derive(Error, Debug)]
pub enum WaitError {
    #[error("exit status of pid {pid} could not be observed (monitor stopped without a terminal state)")]
    StatusUnavailable { pid: u32 },
}

/// A termination request that genuinely failed. "Process already gone" is
/// never reported through this type.
#[derive(Error, Debug)]
pub enum TerminationError {
    #[error("kill request for pid {pid} was rejected: {source}")]
    Rejected {
        pid: u32,
        #[source]
        source: io::Error,
    },
}

/// Installing the termination signal handler failed.
#[derive(Error, Debug)]
#[error("failed to register handler for signal {signal}: {reason}")]
pub struct SignalRegistrationFailure {
    pub signal: i32,
    pub reason: String,
}

/// The background dispatch worker could not be joined cleanly.
#[derive(Error, Debug)]
pub enum DispatcherError {
    #[error("dispatch worker panicked or was cancelled: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum GracetermError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Spawn(#[from] SpawnFailure),

    #[error(transparent)]
    SignalRegistration(#[from] SignalRegistrationFailure),

    #[error(transparent)]
    Dispatcher(#[from] DispatcherError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GracetermError>;
