use std::time::Duration;

use graceterm::config::SupervisorSettings;
use graceterm::types::ExitPolicy;

/// Builder for `SupervisorSettings` with short, test-friendly timings.
pub struct SettingsBuilder {
    settings: SupervisorSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: SupervisorSettings {
                observation_window: Duration::from_millis(300),
                wait_bound: Duration::from_millis(100),
                drain_grace: Duration::from_secs(2),
                exit_policy: ExitPolicy::AlwaysZero,
            },
        }
    }

    pub fn observation_window(mut self, d: Duration) -> Self {
        self.settings.observation_window = d;
        self
    }

    pub fn wait_bound(mut self, d: Duration) -> Self {
        self.settings.wait_bound = d;
        self
    }

    pub fn drain_grace(mut self, d: Duration) -> Self {
        self.settings.drain_grace = d;
        self
    }

    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.settings.exit_policy = policy;
        self
    }

    pub fn build(self) -> SupervisorSettings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
