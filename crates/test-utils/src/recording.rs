use std::sync::{Arc, Mutex};
use std::time::Duration;

use graceterm::events::{LifecycleEvent, LifecycleEventKind, LifecycleObserver};

/// An observer that records every dispatched event.
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<LifecycleEventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }

    /// Index of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&LifecycleEventKind) -> bool) -> Option<usize> {
        self.events().iter().position(|e| pred(&e.kind))
    }

    /// Poll until at least `n` events were recorded or `limit` elapsed.
    pub async fn wait_for_count(&self, n: usize, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            if self.events.lock().unwrap().len() >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.events.lock().unwrap().len() >= n
    }
}

impl LifecycleObserver for RecordingObserver {
    fn on_event(&mut self, event: &LifecycleEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
