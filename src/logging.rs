//! Tracing setup for embedding hosts.
//!
//! The core renders into a hosted page, so stdout and stderr are not ours to
//! write to; diagnostics go to a non-blocking file appender instead.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber, writing `vidlocator.log` under
/// `dir`. Filter defaults to `info`, overridable through `RUST_LOG`.
///
/// Returns the guard that flushes buffered log lines; the caller keeps it
/// alive for the lifetime of the host.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
  std::fs::create_dir_all(dir).with_context(|| format!("failed to create log directory {}", dir.display()))?;
  let appender = tracing_appender::rolling::never(dir, "vidlocator.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| anyhow!("failed to set global tracing subscriber: {e}"))?;
  Ok(guard)
}
