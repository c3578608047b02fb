use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize file-only logging.
///
/// The log file is opened in append mode and every event goes there, not
/// to the terminal — the menu owns the terminal. Level is controlled via
/// `RUST_LOG`, defaulting to `info`.
///
/// The returned guard must stay alive for the duration of the process;
/// dropping it flushes and stops the background writer.
pub fn init(log_file: &Path) -> Result<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let (writer, guard) = non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::info!(log_file = %log_file.display(), "Logging initialized");
    Ok(guard)
}
