// src/log.rs
//
// Logging goes through `tracing`. The bins call `init` once and keep the
// returned guard alive for the whole run so the file writer flushes on exit.
// The library itself never installs a subscriber.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

/// Install a file subscriber writing to `<dir>/debug.log`.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_in(dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(guard)
}

/// Same as `init_in`, using the default store directory.
pub fn init() -> io::Result<WorkerGuard> {
    init_in(Path::new(STORE_DIR))
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warning-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
