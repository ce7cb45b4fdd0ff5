// src/events/observer.rs

use std::io::{self, Write};

use tracing::warn;

use super::LifecycleEvent;

/// Callback invoked by the dispatcher, once per event, never concurrently.
pub trait LifecycleObserver: Send + 'static {
    fn on_event(&mut self, event: &LifecycleEvent);
}

/// Prints one status line per event.
#[derive(Debug)]
pub struct ConsoleObserver<W: Write + Send + 'static> {
    out: W,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send + 'static> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> LifecycleObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: &LifecycleEvent) {
        if let Err(e) = writeln!(self.out, "{event}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write lifecycle event");
        }
    }
}
