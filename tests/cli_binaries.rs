// tests/cli_binaries.rs
#![cfg(unix)]

use std::error::Error;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

type TestResult = Result<(), Box<dyn Error>>;

const SUPERVISOR: &str = env!("CARGO_BIN_EXE_graceterm");
const WORKER: &str = env!("CARGO_BIN_EXE_echo-loop");

#[test]
fn no_arguments_prints_usage_and_succeeds() -> TestResult {
    let output = Command::new(SUPERVISOR).output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("usage: graceterm"));
    assert!(lines[1].starts_with("e.g. graceterm"));
    Ok(())
}

#[test]
fn worker_acknowledges_sigterm_once_and_exits_cleanly() -> TestResult {
    let mut child = Command::new(WORKER)
        .args(["--interval", "100ms"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let stdout = child.stdout.take().ok_or("stdout not piped")?;
    let mut reader = BufReader::new(stdout);

    let mut first = String::new();
    reader.read_line(&mut first)?;
    assert!(first.starts_with("echo: "), "unexpected first line: {first:?}");

    kill(Pid::from_raw(child.id() as i32), Signal::SIGTERM)?;

    let mut rest = String::new();
    reader.read_to_string(&mut rest)?;
    let status = child.wait()?;

    assert!(status.success(), "worker exited with {status}");
    let acknowledgements: Vec<&str> = rest
        .lines()
        .filter(|l| l.starts_with("handle signal number"))
        .collect();
    assert_eq!(acknowledgements, vec!["handle signal number: 15"]);
    assert_eq!(rest.lines().last(), Some("handle signal number: 15"));
    Ok(())
}

#[test]
fn supervisor_terminates_the_worker() -> TestResult {
    let output = Command::new(SUPERVISOR)
        .args([
            "--observation-window",
            "300ms",
            "--wait-bound",
            "100ms",
            "--log-level",
            "warn",
            WORKER,
        ])
        .stdin(Stdio::null())
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"launch echo-loop"), "{stdout}");
    assert_eq!(lines.last(), Some(&"echo-loop terminated"), "{stdout}");
    assert!(stdout.contains("[echo-loop] started (pid "));
    assert!(!stdout.contains("handle signal number"));
    Ok(())
}

#[test]
fn propagate_policy_reports_child_exit_code() -> TestResult {
    let output = Command::new(SUPERVISOR)
        .args([
            "--exit-policy",
            "propagate",
            "--observation-window",
            "200ms",
            "false",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("false already exited (code 1)"), "{stdout}");
    Ok(())
}

#[test]
fn missing_executable_is_narrated_not_fatal() -> TestResult {
    let output = Command::new(SUPERVISOR)
        .args(["--observation-window", "50ms", "/nonexistent/graceterm-child"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[graceterm-child] start failed"), "{stdout}");
    assert!(stdout.contains("failed to launch graceterm-child"), "{stdout}");
    Ok(())
}

#[test]
fn missing_config_file_is_an_error() -> TestResult {
    let output = Command::new(SUPERVISOR)
        .args(["--config", "/nonexistent/graceterm.toml", "true"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("graceterm error"), "{stderr}");
    Ok(())
}
