// src/config/validate.rs

use std::time::Duration;

use crate::config::duration::parse_duration;
use crate::config::model::{ConfigFile, RawConfigFile, SupervisorSettings, WorkerSettings};
use crate::errors::{GracetermError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = GracetermError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let defaults = SupervisorSettings::default();
        let supervisor = SupervisorSettings {
            observation_window: resolve(
                "supervisor.observation_window",
                raw.supervisor.observation_window.as_deref(),
                defaults.observation_window,
            )?,
            wait_bound: resolve(
                "supervisor.wait_bound",
                raw.supervisor.wait_bound.as_deref(),
                defaults.wait_bound,
            )?,
            drain_grace: resolve(
                "supervisor.drain_grace",
                raw.supervisor.drain_grace.as_deref(),
                defaults.drain_grace,
            )?,
            exit_policy: raw.supervisor.exit_policy.unwrap_or(defaults.exit_policy),
        };

        let worker = WorkerSettings {
            interval: resolve(
                "worker.interval",
                raw.worker.interval.as_deref(),
                WorkerSettings::default().interval,
            )?,
        };

        let cfg = ConfigFile { supervisor, worker };
        validate_config(&cfg)?;
        Ok(cfg)
    }
}

fn resolve(key: &str, value: Option<&str>, default: Duration) -> Result<Duration> {
    match value {
        None => Ok(default),
        Some(s) => parse_duration(s)
            .map_err(|e| GracetermError::ConfigError(format!("[{key}]: {e}"))),
    }
}

/// Check timing invariants on already-typed settings.
///
/// Also called after CLI overrides have been applied.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_supervisor(&cfg.supervisor)?;
    validate_worker(&cfg.worker)?;
    Ok(())
}

pub fn validate_supervisor(settings: &SupervisorSettings) -> Result<()> {
    if settings.wait_bound.is_zero() {
        return Err(GracetermError::ConfigError(
            "supervisor.wait_bound must be > 0 (got 0)".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_worker(settings: &WorkerSettings) -> Result<()> {
    if settings.interval.is_zero() {
        return Err(GracetermError::ConfigError(
            "worker.interval must be > 0 (got 0)".to_string(),
        ));
    }
    Ok(())
}
