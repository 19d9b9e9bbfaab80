//! lcm-testkit
//!
//! Shared fixtures for lifecycle scenario tests:
//! - `EventLog` + recording observers (both observer variants)
//! - `ScriptedComponent`, an owner driven by explicit callback methods

mod component;
mod recording;

pub use component::ScriptedComponent;
pub use recording::{EventLog, Record, RecordingEventObserver, RecordingObserver};

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lcm_lifecycle=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
