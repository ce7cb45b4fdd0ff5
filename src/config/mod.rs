// src/config/mod.rs

//! Configuration loading and validation for graceterm.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate and resolve durations into typed settings (`validate.rs`).
//! - Parse human duration strings like `"2500ms"` (`duration.rs`).
//!
//! A config file is optional. Without one, [`ConfigFile::default`] carries
//! the built-in timings.

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_duration;
pub use loader::{load_and_validate, load_from_path};
pub use model::{
    ConfigFile, RawConfigFile, RawSupervisorSection, RawWorkerSection, SupervisorSettings,
    WorkerSettings,
};
