// src/worker/worker_loop.rs

use std::io;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::errors::Result;
use crate::signal::SignalLatch;

/// One repeatable piece of work plus the final acknowledgment.
pub trait WorkUnit {
    /// Called once per iteration while the latch is clear.
    fn perform(&mut self, iteration: u64) -> io::Result<()>;

    /// Called exactly once, after the latch has been observed.
    fn acknowledge(&mut self, signal: i32) -> io::Result<()>;
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerExit {
    /// Number of completed `perform` calls.
    pub iterations: u64,
    /// Signal number read from the latch.
    pub signal: i32,
}

/// Poll loop: check latch, perform, sleep `interval`, repeat.
///
/// The latch is checked at the top of every iteration, i.e. before the first
/// unit and after each sleep, so shutdown latency is at most one interval
/// plus one unit of work.
#[derive(Debug)]
pub struct WorkerLoop<'a> {
    latch: &'a SignalLatch,
    interval: Duration,
}

impl<'a> WorkerLoop<'a> {
    pub fn new(latch: &'a SignalLatch, interval: Duration) -> Self {
        Self { latch, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn run<U: WorkUnit>(&self, unit: &mut U) -> Result<WorkerExit> {
        info!(interval = ?self.interval, "worker loop started");

        let mut iterations: u64 = 0;

        loop {
            if let Some(signal) = self.latch.raised_signal() {
                debug!(signal, iterations, "termination latch observed");
                unit.acknowledge(signal)?;
                info!(signal, iterations, "worker loop finished");
                return Ok(WorkerExit { iterations, signal });
            }

            unit.perform(iterations)?;
            iterations += 1;

            sleep(self.interval).await;
        }
    }
}
