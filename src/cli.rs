// src/cli.rs

//! CLI argument parsing using `clap` for both binaries.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::parse_duration;
use crate::types::ExitPolicy;

/// Printed (to stdout) when `graceterm` is started without a program.
pub const USAGE: &str = "usage: graceterm [OPTIONS] <PATH> [ARGS]...\n\
e.g. graceterm ./target/debug/echo-loop";

/// Command-line arguments for `graceterm`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "graceterm",
    version,
    about = "Launch a program, watch it for a grace period, and kill it if it is still running.",
    long_about = None
)]
pub struct CliArgs {
    /// Optional config file (TOML) with `[supervisor]` timings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GRACETERM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// How long the child may run before the supervisor checks on it
    /// (e.g. `2500ms`).
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub observation_window: Option<Duration>,

    /// Extra bounded wait for the exit after the observation window.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub wait_bound: Option<Duration>,

    /// Upper bound on waiting for the final exit event before shutting down.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub drain_grace: Option<Duration>,

    /// `always-zero` (default) or `propagate` the child's outcome.
    #[arg(long, value_name = "POLICY")]
    pub exit_policy: Option<ExitPolicy>,

    /// Executable to supervise.
    #[arg(value_name = "PATH")]
    pub program: Option<PathBuf>,

    /// Arguments passed through to the child.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

/// Command-line arguments for `echo-loop`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "echo-loop",
    version,
    about = "Print a timestamp periodically until SIGTERM arrives.",
    long_about = None
)]
pub struct WorkerArgs {
    /// Optional config file (TOML) with a `[worker]` section.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Time between two echo lines (e.g. `500ms`).
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Logging level (error, warn, info, debug, trace).
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Convenience wrapper around `WorkerArgs::parse()`.
pub fn parse_worker() -> WorkerArgs {
    WorkerArgs::parse()
}
