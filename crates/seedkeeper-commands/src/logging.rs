//! Log subscriber setup.
//!
//! Events go to a daily-rolling file under the caller's log directory,
//! written from a background thread. Secret content is never logged by this
//! workspace: events carry types, lengths and fingerprints only.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::CommandError;

/// File name prefix of the rolling log files.
pub const LOG_FILE_PREFIX: &str = "seedkeeper.log";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber, logging to `log_dir`.
///
/// The returned guard flushes pending events when dropped and must be held
/// for as long as logging is needed.
///
/// # Errors
///
/// Returns [`CommandError::Logging`] if a global subscriber is already set.
pub fn init(log_dir: &Path) -> Result<WorkerGuard, CommandError> {
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| CommandError::Logging(e.to_string()))?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialised");
    Ok(guard)
}

// ── Tests ──────────────────────────────────────────────────────────
