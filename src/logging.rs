//! Diagnostics go to a rolling file because the terminal UI owns stdout.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;

const LOG_FILE_PREFIX: &str = "fitness-tracker.log";
const DEFAULT_DIRECTIVE: &str = "fitness_tracker=info";

/// Install the global subscriber. Keep the returned guard alive for the whole
/// run or buffered lines are lost on exit.
pub fn init(config: &AppConfig) -> Result<WorkerGuard> {
    let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_DIRECTIVE))
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
