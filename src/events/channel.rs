// src/events/channel.rs

use tokio::sync::mpsc;
use tracing::debug;

use super::LifecycleEvent;

/// Producer side of the lifecycle channel. Cheap to clone; posting never
/// blocks, so it can be used from synchronous code.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<LifecycleEvent>,
}

impl EventSink {
    /// Queue an event for dispatch.
    ///
    /// Returns `false` when the dispatcher has already stopped; the event is
    /// dropped whole in that case.
    pub fn post(&self, event: LifecycleEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                debug!(?event, "dispatcher stopped; dropping lifecycle event");
                false
            }
        }
    }
}

/// Consumer side of the lifecycle channel, handed to an
/// [`EventDispatcher`](super::EventDispatcher).
///
/// The queue keeps a sink of its own so the dispatcher can schedule
/// follow-up notifications at the back of the queue.
#[derive(Debug)]
pub struct EventQueue {
    pub(crate) rx: mpsc::UnboundedReceiver<LifecycleEvent>,
    pub(crate) followups: EventSink,
}

/// Create a connected sink/queue pair.
pub fn event_channel() -> (EventSink, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = EventSink { tx };
    let queue = EventQueue {
        rx,
        followups: sink.clone(),
    };
    (sink, queue)
}
