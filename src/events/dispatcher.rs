// src/events/dispatcher.rs

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::errors::DispatcherError;

use super::channel::EventQueue;
use super::observer::LifecycleObserver;
use super::{LifecycleEvent, LifecycleEventKind};

/// Background task that drains an [`EventQueue`] into one observer.
///
/// Events are delivered one at a time in the order they were posted. Must be
/// shut down with [`EventDispatcher::stop`], which joins the task and hands
/// the observer back.
#[derive(Debug)]
pub struct EventDispatcher<O: LifecycleObserver> {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<O>,
}

impl<O: LifecycleObserver> EventDispatcher<O> {
    /// Spawn the dispatch task on the current Tokio runtime.
    pub fn start(queue: EventQueue, observer: O) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(dispatch_loop(queue, observer, stop_rx));
        Self {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    /// Stop dispatching and join the task.
    ///
    /// Events already queued when the stop is observed are still delivered
    /// (drain); anything posted after that is rejected by the sink.
    pub async fn stop(mut self) -> Result<O, DispatcherError> {
        if let Some(stop) = self.stop_tx.take() {
            // Err only if the task already ended; joining below covers it.
            let _ = stop.send(());
        }
        let observer = (&mut self.handle).await?;
        Ok(observer)
    }
}

async fn dispatch_loop<O: LifecycleObserver>(
    mut queue: EventQueue,
    mut observer: O,
    mut stop_rx: oneshot::Receiver<()>,
) -> O {
    info!("lifecycle dispatcher started");
    let mut delivered: usize = 0;

    loop {
        tokio::select! {
            biased;

            _ = &mut stop_rx => {
                debug!("stop requested");
                break;
            }

            event = queue.rx.recv() => match event {
                Some(event) => {
                    dispatch(&queue, &mut observer, event);
                    delivered += 1;
                }
                None => break,
            },
        }
    }

    // Drain whatever was queued before the stop, including follow-ups the
    // drain itself schedules, then refuse further posts.
    while let Ok(event) = queue.rx.try_recv() {
        dispatch(&queue, &mut observer, event);
        delivered += 1;
    }
    queue.rx.close();

    info!(delivered, "lifecycle dispatcher finished");
    observer
}

fn dispatch<O: LifecycleObserver>(queue: &EventQueue, observer: &mut O, event: LifecycleEvent) {
    debug!(?event, "dispatching lifecycle event");
    observer.on_event(&event);

    if event.is_exit() {
        queue
            .followups
            .post(LifecycleEvent::new(event.process, LifecycleEventKind::Drained));
    }
}
