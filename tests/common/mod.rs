#![allow(dead_code)]

pub use graceterm_test_utils::init_tracing;
pub use graceterm_test_utils::recording::RecordingObserver;
pub use graceterm_test_utils::settings::SettingsBuilder;

/// Run a future with a 10-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(10), f)
        .await
        .expect("Test timed out after 10 seconds")
}
