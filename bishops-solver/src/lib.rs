//! Bishops solver tooling: explorer checkpoints, progress reports and
//! SQLite export.

pub mod checkpoint;
pub mod export;
pub mod report;

/// Install the `tracing` subscriber used by every binary.
///
/// The filter comes from `RUST_LOG` and defaults to `info`; `log` records
/// from bishops-core are captured as well.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
