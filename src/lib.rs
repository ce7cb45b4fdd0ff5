// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod process;
pub mod signal;
pub mod supervisor;
pub mod types;
pub mod worker;

use std::io;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, USAGE, WorkerArgs};
use crate::config::validate::{validate_supervisor, validate_worker};
use crate::config::{ConfigFile, SupervisorSettings, WorkerSettings, load_and_validate};
use crate::events::ConsoleObserver;
use crate::process::SpawnRequest;
use crate::signal::install_termination_handler;
use crate::supervisor::Supervisor;
use crate::worker::{EchoUnit, WorkerLoop};

/// Entry point of the `graceterm` binary. Returns the process exit status.
///
/// This wires together:
/// - settings resolution (defaults, config file, CLI flags)
/// - the supervisor with a stdout observer
/// - the status narrative
pub async fn run(args: CliArgs) -> Result<i32> {
    let Some(program) = args.program.clone() else {
        // Nothing to supervise is not an error.
        println!("{USAGE}");
        return Ok(0);
    };

    let settings = supervisor_settings(&args)?;
    let request = SpawnRequest::new(program).args(args.args.iter().cloned());

    println!("launch {}", request.display_name());

    let report = Supervisor::new(settings)
        .supervise(&request, ConsoleObserver::stdout())
        .await?;

    for line in report.narrate() {
        println!("{line}");
    }

    let code = report.exit_code(settings.exit_policy);
    debug!(code, policy = ?settings.exit_policy, "supervisor exit status");
    Ok(code)
}

/// Entry point of the `echo-loop` binary. Returns the process exit status.
///
/// The termination handler is installed before the loop starts; if that
/// fails the loop is never entered.
pub async fn run_worker(args: WorkerArgs) -> Result<i32> {
    let settings = worker_settings(&args)?;
    let latch = install_termination_handler()?;

    let worker = WorkerLoop::new(latch, settings.interval);
    let mut unit = EchoUnit::new(io::stdout());
    let exit = worker.run(&mut unit).await?;

    info!(signal = exit.signal, iterations = exit.iterations, "worker exiting");
    Ok(0)
}

/// Resolve supervisor timings: CLI flag → config file → built-in default.
pub fn supervisor_settings(args: &CliArgs) -> errors::Result<SupervisorSettings> {
    let mut settings = base_config(args.config.as_deref())?.supervisor;

    if let Some(window) = args.observation_window {
        settings.observation_window = window;
    }
    if let Some(bound) = args.wait_bound {
        settings.wait_bound = bound;
    }
    if let Some(grace) = args.drain_grace {
        settings.drain_grace = grace;
    }
    if let Some(policy) = args.exit_policy {
        settings.exit_policy = policy;
    }

    validate_supervisor(&settings)?;
    Ok(settings)
}

/// Resolve worker settings: CLI flag → config file → built-in default.
pub fn worker_settings(args: &WorkerArgs) -> errors::Result<WorkerSettings> {
    let mut settings = base_config(args.config.as_deref())?.worker;

    if let Some(interval) = args.interval {
        settings.interval = interval;
    }

    validate_worker(&settings)?;
    Ok(settings)
}

fn base_config(path: Option<&std::path::Path>) -> errors::Result<ConfigFile> {
    match path {
        Some(path) => load_and_validate(path),
        None => Ok(ConfigFile::default()),
    }
}
