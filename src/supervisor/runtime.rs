// src/supervisor/runtime.rs

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::SupervisorSettings;
use crate::errors::DispatcherError;
use crate::events::{EventDispatcher, LifecycleObserver, event_channel};
use crate::process::{ProcessHandle, ProcessState, SpawnRequest};

use super::decision::{Decision, decide, reconcile};
use super::{SupervisionOutcome, SupervisionReport};

/// Supervises one child per call to [`Supervisor::supervise`].
///
/// Sequence:
/// 1. spawn the child (events go to a fresh lifecycle channel)
/// 2. start the dispatch task with the given observer
/// 3. sleep for the observation window
/// 4. wait a further bounded time for the exit
/// 5. kill the child if it is (or may be) still running
/// 6. give the final `Exit` event up to the drain grace to arrive
/// 7. stop and join the dispatch task
///
/// The child's outcome is returned as a report; it never turns into an
/// `Err` here.
#[derive(Debug, Clone)]
pub struct Supervisor {
    settings: SupervisorSettings,
}

impl Supervisor {
    pub fn new(settings: SupervisorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SupervisorSettings {
        &self.settings
    }

    pub async fn supervise<O: LifecycleObserver>(
        &self,
        request: &SpawnRequest,
        observer: O,
    ) -> Result<SupervisionReport, DispatcherError> {
        let name = request.display_name();
        info!(
            process = %name,
            program = %request.program.display(),
            observation_window = ?self.settings.observation_window,
            "launching child process"
        );

        let (sink, queue) = event_channel();
        let spawned = ProcessHandle::spawn(request, sink);
        let dispatcher = EventDispatcher::start(queue, observer);

        let report = match spawned {
            Ok(handle) => self.observe(name, handle).await,
            // Queued StartError is delivered by the drain in `stop`.
            Err(failure) => SupervisionReport {
                display_name: name,
                pid: None,
                wait: None,
                wait_error: None,
                terminate_called: false,
                outcome: SupervisionOutcome::SpawnFailed {
                    reason: failure.source.to_string(),
                },
                final_state: ProcessState::SpawnFailed,
            },
        };

        dispatcher.stop().await?;
        debug!(process = %report.display_name, "dispatcher joined");

        info!(
            process = %report.display_name,
            outcome = ?report.outcome,
            final_state = %report.final_state,
            "supervision finished"
        );
        Ok(report)
    }

    async fn observe(&self, name: String, handle: ProcessHandle) -> SupervisionReport {
        let pid = handle.pid();

        sleep(self.settings.observation_window).await;

        let waited = handle.wait_for(self.settings.wait_bound).await;
        debug!(process = %name, pid, ?waited, "bounded wait finished");

        let (wait, wait_error) = match &waited {
            Ok(outcome) => (Some(*outcome), None),
            Err(e) => {
                warn!(process = %name, pid, error = %e, "wait for child failed; terminating");
                (None, Some(e.to_string()))
            }
        };

        let (outcome, terminate_called) = match decide(&waited) {
            Decision::Report(outcome) => {
                info!(process = %name, pid, ?outcome, "child exited within observation window");
                (outcome, false)
            }
            Decision::Terminate => {
                info!(process = %name, pid, "child outlived observation window; terminating");
                let result = handle.terminate().await;
                if let Err(e) = &result {
                    warn!(process = %name, pid, error = %e, "terminate failed");
                }
                (reconcile(&result), true)
            }
        };

        let final_state = handle.settle(self.settings.drain_grace).await;

        SupervisionReport {
            display_name: name,
            pid: Some(pid),
            wait,
            wait_error,
            terminate_called,
            outcome,
            final_state,
        }
    }
}
