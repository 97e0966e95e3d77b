//! Tracing subscriber setup.
//!
//! Two layers are installed:
//! - stderr, warnings and above unless `RUST_LOG` says otherwise
//! - a daily-rolling file `shelfstreak.log` in the log directory

use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::CoreError;

pub const LOG_FILE_PREFIX: &str = "shelfstreak.log";
const FILE_FILTER: &str = "info,shelfstreak_core=debug";
const STDERR_FILTER: &str = "warn";

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered file output is flushed.
///
/// Calling this twice is harmless; the second call keeps the first
/// subscriber.
pub fn init(log_dir: &Path) -> Result<WorkerGuard, CoreError> {
    std::fs::create_dir_all(log_dir)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter_or(FILE_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter_or(STDERR_FILTER));

    if tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(log_dir = %log_dir.display(), "logging initialised");
    }

    Ok(guard)
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_directory_and_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let _first = init(&logs).unwrap();
        let _second = init(&logs).unwrap();
        assert!(logs.is_dir());
    }
}
