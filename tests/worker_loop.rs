// tests/worker_loop.rs
mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use tokio::time::Instant;

use graceterm::signal::SignalLatch;
use graceterm::worker::{EchoUnit, WorkUnit, WorkerLoop};

type TestResult = Result<(), Box<dyn Error>>;

/// Records when each unit ran and how many acknowledgments were emitted.
#[derive(Default)]
struct CountingUnit {
    performed: Vec<Instant>,
    acks: Vec<i32>,
}

impl WorkUnit for CountingUnit {
    fn perform(&mut self, _iteration: u64) -> io::Result<()> {
        self.performed.push(Instant::now());
        Ok(())
    }

    fn acknowledge(&mut self, signal: i32) -> io::Result<()> {
        self.acks.push(signal);
        Ok(())
    }
}

struct FailingUnit;

impl WorkUnit for FailingUnit {
    fn perform(&mut self, _iteration: u64) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }

    fn acknowledge(&mut self, _signal: i32) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn latch_raised_before_start_skips_all_work() -> TestResult {
    init_tracing();

    let latch = SignalLatch::new();
    latch.raise(15);

    let mut unit = CountingUnit::default();
    let exit = WorkerLoop::new(&latch, Duration::from_millis(500))
        .run(&mut unit)
        .await?;

    assert_eq!(exit.iterations, 0);
    assert_eq!(exit.signal, 15);
    assert!(unit.performed.is_empty());
    assert_eq!(unit.acks, vec![15]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn raise_mid_run_stops_within_one_interval() -> TestResult {
    init_tracing();

    let latch = Arc::new(SignalLatch::new());
    let interval = Duration::from_millis(500);
    let raise_at = Duration::from_millis(1250);

    let start = Instant::now();
    {
        let latch = Arc::clone(&latch);
        tokio::spawn(async move {
            tokio::time::sleep(raise_at).await;
            latch.raise(15);
        });
    }

    let mut unit = CountingUnit::default();
    let exit = WorkerLoop::new(&latch, interval).run(&mut unit).await?;
    let elapsed = start.elapsed();

    // Units at 0, 500 and 1000ms; the check after the 1500ms wake-up sees
    // the latch.
    assert_eq!(exit.iterations, 3);
    assert_eq!(unit.performed.len(), 3);
    assert_eq!(unit.acks, vec![15]);
    assert!(elapsed >= raise_at);
    assert!(elapsed <= raise_at + interval, "elapsed {elapsed:?}");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn work_unit_error_ends_the_loop_without_acknowledgment() {
    init_tracing();

    let latch = SignalLatch::new();
    let result = WorkerLoop::new(&latch, Duration::from_millis(10))
        .run(&mut FailingUnit)
        .await;

    assert!(result.is_err());
    assert!(!latch.is_raised());
}

#[test]
fn echo_unit_writes_timestamp_and_acknowledgment_lines() -> TestResult {
    let mut unit = EchoUnit::new(Vec::new());
    unit.perform(0)?;
    unit.perform(1)?;
    unit.acknowledge(15)?;

    let out = String::from_utf8(unit.into_inner())?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);

    for line in &lines[..2] {
        let stamp = line
            .strip_prefix("echo: ")
            .ok_or_else(|| format!("unexpected line: {line}"))?;
        assert!(stamp.parse::<u128>()? > 0);
    }
    assert_eq!(lines[2], "handle signal number: 15");
    Ok(())
}

proptest! {
    #[test]
    fn shutdown_latency_is_bounded_by_interval(
        interval_ms in 1u64..1_000,
        raise_at_ms in 0u64..5_000,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let (elapsed, unit) = rt.block_on(async {
            let latch = Arc::new(SignalLatch::new());
            let start = Instant::now();
            {
                let latch = Arc::clone(&latch);
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(raise_at_ms)).await;
                    latch.raise(15);
                });
            }

            let mut unit = CountingUnit::default();
            WorkerLoop::new(&latch, Duration::from_millis(interval_ms))
                .run(&mut unit)
                .await
                .unwrap();
            (start.elapsed(), unit)
        });

        prop_assert_eq!(unit.acks.len(), 1);
        prop_assert!(
            elapsed <= Duration::from_millis(raise_at_ms + interval_ms),
            "elapsed {:?} raise_at {}ms interval {}ms", elapsed, raise_at_ms, interval_ms
        );
    }
}
