//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFileWriter;
use crate::config::Config;
use crate::infrastructure::paths;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Picks the filter directive.
///
/// # Resolution
///
/// 1. `RUST_LOG` if set and non-empty
/// 2. `trace_level` from the configuration
/// 3. `"info"`
fn filter_directive(env: Option<String>, trace_level: Option<&str>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| trace_level.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Initializes the tracing subscriber writing to the rotating log file in the
/// data directory.
///
/// Returns the log file path, or `None` when logging could not be set up.
/// Failure is never fatal: the console runs without logs.
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    init_tracing_at(&paths::log_path(), config.trace_level.as_deref())
}

/// Same as [`init_tracing`] with an explicit log file.
///
/// Idempotent: only the first successful call installs a subscriber.
pub fn init_tracing_at(log_path: &Path, trace_level: Option<&str>) -> Option<PathBuf> {
    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return None;
        }
    }

    let directive = filter_directive(std::env::var("RUST_LOG").ok(), trace_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let writer = Arc::new(RotatingFileWriter::new(log_path.to_path_buf()));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()?;

    tracing::info!(level = %directive, log = %log_path.display(), "tracing initialized");
    Some(log_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins_over_config() {
        assert_eq!(filter_directive(Some("trace".into()), Some("warn")), "trace");
    }

    #[test]
    fn config_level_then_default() {
        assert_eq!(filter_directive(None, Some("debug")), "debug");
        assert_eq!(filter_directive(Some("  ".into()), None), "info");
        assert_eq!(filter_directive(None, None), "info");
    }

    #[test]
    fn second_initialization_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("petdesk.log");

        let _ = init_tracing_at(&path, Some("debug"));
        assert!(dir.path().join("logs").is_dir());
        assert!(init_tracing_at(&path, Some("debug")).is_none());
    }
}
