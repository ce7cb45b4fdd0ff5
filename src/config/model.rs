// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::ExitPolicy;

/// How long the supervisor lets the child run before deciding anything.
pub const DEFAULT_OBSERVATION_WINDOW: Duration = Duration::from_millis(2500);
/// Extra bounded wait after the observation window.
pub const DEFAULT_WAIT_BOUND: Duration = Duration::from_millis(500);
/// Time given to the dispatcher to deliver the final `Exit` event.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_millis(300);
/// Worker echo cadence.
pub const DEFAULT_WORKER_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [supervisor]
/// observation_window = "2500ms"
/// wait_bound = "500ms"
/// drain_grace = "300ms"
/// exit_policy = "always-zero"
///
/// [worker]
/// interval = "500ms"
/// ```
///
/// Every key is optional; missing keys fall back to the defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub supervisor: RawSupervisorSection,

    #[serde(default)]
    pub worker: RawWorkerSection,
}

/// `[supervisor]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSupervisorSection {
    #[serde(default)]
    pub observation_window: Option<String>,

    #[serde(default)]
    pub wait_bound: Option<String>,

    #[serde(default)]
    pub drain_grace: Option<String>,

    /// `"always-zero"` (default) or `"propagate"`.
    #[serde(default)]
    pub exit_policy: Option<ExitPolicy>,
}

/// `[worker]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkerSection {
    #[serde(default)]
    pub interval: Option<String>,
}

/// Validated configuration. Construct it through `TryFrom<RawConfigFile>`
/// (see `validate.rs`) or [`ConfigFile::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub supervisor: SupervisorSettings,
    pub worker: WorkerSettings,
}

/// Timings and policy for one supervision run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorSettings {
    pub observation_window: Duration,
    pub wait_bound: Duration,
    pub drain_grace: Duration,
    pub exit_policy: ExitPolicy,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            observation_window: DEFAULT_OBSERVATION_WINDOW,
            wait_bound: DEFAULT_WAIT_BOUND,
            drain_grace: DEFAULT_DRAIN_GRACE,
            exit_policy: ExitPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSettings {
    pub interval: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WORKER_INTERVAL,
        }
    }
}
