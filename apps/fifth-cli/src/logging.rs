//! Logging initialization and log file management.
//!
//! Provides dual-output tracing: stderr (human-readable) and an optional
//! JSON log file under `.fifth/logs/`, rotated daily as
//! `fifth.<YYYY-MM-DD>.log`. File logging is turned on by `--log-file` or
//! `logging.file` in `.fifth/config.yaml`.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use fifth_core::{EngineConfig, ProjectConfig};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "fifth";
const LOG_FILE_SUFFIX: &str = "log";
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Initialize the tracing subscriber with stderr output.
///
/// When file logging is enabled, an additional JSON layer writes to the
/// `.fifth/logs/` directory under the working directory.
///
/// Returns an optional [`WorkerGuard`] that must be held for the
/// lifetime of the program to ensure all buffered logs are flushed.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the
/// log file cannot be opened.
pub fn init_tracing(config: &EngineConfig, project: &ProjectConfig) -> Result<Option<WorkerGuard>> {
    let default_filter = project.logging.filter_or_default();
    let logs_dir = config
        .file_logging_enabled(project)
        .then(|| config.logs_dir());

    if let Some((subscriber, guard)) = build_tracing(logs_dir.as_deref(), default_filter)? {
        subscriber.init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(default_filter))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}

/// `RUST_LOG` when set, otherwise `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Build the tracing subscriber layers without registering globally.
///
/// Returns `Some((subscriber, guard))` when a log directory is provided
/// (dual-layer), or `None` when only stderr logging is needed.
fn build_tracing(
    logs_dir: Option<&Path>,
    default_filter: &str,
) -> Result<Option<(impl tracing::Subscriber + Send + Sync + use<>, WorkerGuard)>> {
    let Some(logs_dir) = logs_dir else {
        return Ok(None);
    };

    let (non_blocking, guard) = open_log_writer(logs_dir)?;

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(env_filter(default_filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(env_filter(default_filter)),
        );

    Ok(Some((subscriber, guard)))
}

/// Create the log directory and a daily-rotated file appender, returning a
/// non-blocking writer and its guard.
fn open_log_writer(logs_dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create log directory: {}", logs_dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(logs_dir)
        .with_context(|| format!("failed to open log file in {}", logs_dir.display()))?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Remove `.log` files older than `retention_days` from `logs_dir`.
///
/// This is a best-effort operation: errors on individual files are
/// reported via `eprintln!` (tracing is not initialized yet) but never
/// fail the command.
pub fn cleanup_old_logs(logs_dir: &Path, retention_days: u64) {
    if !logs_dir.is_dir() {
        return;
    }

    // A retention too long to represent keeps every file.
    let Some(cutoff) = retention_days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|secs| SystemTime::now().checked_sub(Duration::from_secs(secs)))
    else {
        return;
    };

    let entries = match fs::read_dir(logs_dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!(
                "warning: failed to read log directory {}: {e}",
                logs_dir.display()
            );
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(LOG_FILE_SUFFIX) {
            continue;
        }

        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                eprintln!(
                    "warning: failed to read metadata for {}: {e}",
                    path.display()
                );
                continue;
            }
        };

        if modified < cutoff
            && let Err(e) = fs::remove_file(&path)
        {
            eprintln!(
                "warning: failed to remove old log file {}: {e}",
                path.display(),
            );
        }
    }
}
