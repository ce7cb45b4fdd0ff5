// src/worker/echo.rs

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use super::worker_loop::WorkUnit;

/// Echo payload: one timestamp line per iteration, one acknowledgment line
/// on shutdown. Every line is flushed so it reaches a supervisor's inherited
/// stdout immediately.
#[derive(Debug)]
pub struct EchoUnit<W: Write> {
    out: W,
}

impl<W: Write> EchoUnit<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WorkUnit for EchoUnit<W> {
    fn perform(&mut self, _iteration: u64) -> io::Result<()> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        writeln!(self.out, "echo: {nanos}")?;
        self.out.flush()
    }

    fn acknowledge(&mut self, signal: i32) -> io::Result<()> {
        writeln!(self.out, "handle signal number: {signal}")?;
        self.out.flush()
    }
}
