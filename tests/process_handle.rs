// tests/process_handle.rs
#![cfg(unix)]

mod common;
use crate::common::{RecordingObserver, init_tracing, with_timeout};

use std::error::Error;
use std::io;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::Signal;

use graceterm::errors::TerminationError;
use graceterm::events::{EventDispatcher, LifecycleEventKind, event_channel};
use graceterm::process::{
    ProcessHandle, ProcessState, SpawnRequest, TerminateOutcome, WaitOutcome,
    normalize_kill_result,
};

type TestResult = Result<(), Box<dyn Error>>;

fn sleeper(secs: u32) -> SpawnRequest {
    SpawnRequest::new("sleep").arg(secs.to_string())
}

fn shell(script: &str) -> SpawnRequest {
    SpawnRequest::new("sh").arg("-c").arg(script)
}

#[tokio::test]
async fn zero_wait_never_reports_exit_for_running_child() -> TestResult {
    init_tracing();

    let (sink, _queue) = event_channel();
    let handle = ProcessHandle::spawn(&sleeper(5), sink)?;

    assert_eq!(handle.state(), ProcessState::Running);
    assert!(handle.pid() > 0);
    assert_eq!(handle.record().display_name(), "sleep");

    for _ in 0..5 {
        assert_eq!(handle.wait_for(Duration::ZERO).await?, WaitOutcome::StillRunning);
    }
    assert_eq!(
        handle.wait_for(Duration::from_millis(100)).await?,
        WaitOutcome::StillRunning
    );

    handle.terminate().await?;
    Ok(())
}

#[tokio::test]
async fn terminate_kills_running_child_and_reaches_terminated() -> TestResult {
    init_tracing();

    let (sink, _queue) = event_channel();
    let handle = ProcessHandle::spawn(&sleeper(30), sink)?;

    assert_eq!(handle.terminate().await?, TerminateOutcome::Requested);

    let waited = with_timeout(handle.wait_for(Duration::from_secs(5))).await?;
    assert_eq!(
        waited,
        WaitOutcome::Killed {
            signal: Some(Signal::SIGKILL as i32)
        }
    );
    assert_eq!(
        handle.state(),
        ProcessState::Terminated {
            signal: Some(Signal::SIGKILL as i32)
        }
    );
    assert_eq!(handle.record().exit_code(), None);
    Ok(())
}

#[tokio::test]
async fn terminate_twice_on_exited_child_is_not_an_error() -> TestResult {
    init_tracing();

    let (sink, _queue) = event_channel();
    let handle = ProcessHandle::spawn(&shell("exit 0"), sink)?;

    let waited = with_timeout(handle.wait_for(Duration::from_secs(5))).await?;
    assert_eq!(waited, WaitOutcome::ExitedWithCode(0));

    assert_eq!(handle.terminate().await?, TerminateOutcome::AlreadyExited);
    assert_eq!(handle.terminate().await?, TerminateOutcome::AlreadyExited);
    assert_eq!(handle.state(), ProcessState::ExitedNormally { code: 0 });
    Ok(())
}

#[tokio::test]
async fn terminate_after_kill_is_idempotent() -> TestResult {
    init_tracing();

    let (sink, _queue) = event_channel();
    let handle = ProcessHandle::spawn(&sleeper(30), sink)?;

    handle.terminate().await?;
    with_timeout(handle.wait_for(Duration::from_secs(5))).await?;

    assert_eq!(handle.terminate().await?, TerminateOutcome::AlreadyExited);
    Ok(())
}

#[tokio::test]
async fn exit_code_is_reported() -> TestResult {
    init_tracing();

    let (sink, _queue) = event_channel();
    let handle = ProcessHandle::spawn(&shell("exit 3"), sink)?;

    let waited = with_timeout(handle.wait_for(Duration::from_secs(5))).await?;
    assert_eq!(waited, WaitOutcome::ExitedWithCode(3));
    assert_eq!(handle.record().exit_code(), Some(3));
    Ok(())
}

#[tokio::test]
async fn child_stdin_is_closed() -> TestResult {
    init_tracing();

    // `read` hits EOF immediately instead of blocking on our stdin.
    let (sink, _queue) = event_channel();
    let handle = ProcessHandle::spawn(&shell("if read -r line; then exit 1; else exit 0; fi"), sink)?;

    let waited = with_timeout(handle.wait_for(Duration::from_secs(5))).await?;
    assert_eq!(waited, WaitOutcome::ExitedWithCode(0));
    Ok(())
}

#[tokio::test]
async fn missing_executable_is_a_spawn_failure_with_start_error_event() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("no-such-program");

    let (sink, queue) = event_channel();
    let recorder = RecordingObserver::new();
    let dispatcher = EventDispatcher::start(queue, recorder.clone());

    let failure = ProcessHandle::spawn(&SpawnRequest::new(&missing), sink)
        .expect_err("spawning a missing file must fail");
    assert_eq!(failure.display_name, "no-such-program");
    assert_eq!(failure.source.kind(), io::ErrorKind::NotFound);

    with_timeout(dispatcher.stop()).await?;

    let kinds = recorder.kinds();
    assert_eq!(kinds.len(), 2);
    assert_eq!(kinds[0], LifecycleEventKind::Setup);
    assert!(matches!(kinds[1], LifecycleEventKind::StartError { .. }));
    Ok(())
}

#[tokio::test]
async fn exit_is_never_dispatched_before_start_events() -> TestResult {
    init_tracing();

    let (sink, queue) = event_channel();
    let recorder = RecordingObserver::new();
    let dispatcher = EventDispatcher::start(queue, recorder.clone());

    let handle = ProcessHandle::spawn(&shell("exit 0"), sink)?;
    let pid = handle.pid();
    let state = with_timeout(handle.settle(Duration::from_secs(5))).await;
    assert_eq!(state, ProcessState::ExitedNormally { code: 0 });

    with_timeout(dispatcher.stop()).await?;

    assert_eq!(
        recorder.kinds(),
        vec![
            LifecycleEventKind::Setup,
            LifecycleEventKind::StartSuccess { pid },
            LifecycleEventKind::Exit {
                code: 0,
                reason: "exit status: 0".to_string(),
            },
            LifecycleEventKind::Drained,
        ]
    );
    Ok(())
}

#[test]
fn kill_results_meaning_already_gone_are_normalized_to_success() {
    let pid = 4242;

    assert_eq!(
        normalize_kill_result(pid, Ok(())).unwrap(),
        TerminateOutcome::Requested
    );
    assert_eq!(
        normalize_kill_result(pid, Err(io::Error::from_raw_os_error(Errno::ESRCH as i32))).unwrap(),
        TerminateOutcome::AlreadyExited
    );
    // Failure flag with a zero status.
    assert_eq!(
        normalize_kill_result(pid, Err(io::Error::from_raw_os_error(0))).unwrap(),
        TerminateOutcome::AlreadyExited
    );
    assert_eq!(
        normalize_kill_result(
            pid,
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid argument: can't kill an exited process"
            ))
        )
        .unwrap(),
        TerminateOutcome::AlreadyExited
    );
}

#[test]
fn genuine_kill_failures_are_surfaced() {
    let err = normalize_kill_result(7, Err(io::Error::from_raw_os_error(Errno::EPERM as i32)))
        .expect_err("EPERM is a real failure");
    let TerminationError::Rejected { pid, source } = err;
    assert_eq!(pid, 7);
    assert_eq!(source.raw_os_error(), Some(Errno::EPERM as i32));

    // EINVAL is "bad signal", not "no such process".
    assert!(normalize_kill_result(7, Err(io::Error::from_raw_os_error(Errno::EINVAL as i32))).is_err());
}
