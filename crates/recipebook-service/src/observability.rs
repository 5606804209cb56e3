//! Process-wide `tracing` subscriber.
//!
//! The level filter sits behind a reload layer so the binary can start
//! logging before configuration is read, then switch to `logging.level`.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER_HANDLE: OnceLock<FilterHandle> = OnceLock::new();

pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`
/// when it parses. Calling this twice keeps the first subscriber.
pub fn init_tracing_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let (filter_layer, handle) = reload::Layer::new(filter);
    let _ = FILTER_HANDLE.set(handle);

    // stdout carries command output
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Replaces the active filter. Does nothing until tracing is initialised.
pub fn apply_logging_level(level: &str) {
    let Some(handle) = FILTER_HANDLE.get() else {
        return;
    };
    if let Err(err) = handle.reload(EnvFilter::new(level)) {
        tracing::warn!(level, error = %err, "Could not change log level");
    }
}
