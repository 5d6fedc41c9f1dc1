use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::error::{Error, Result};

const LOG_FILE: &str = "pnotes.log";

/// Install the global tracing subscriber.
///
/// The terminal belongs to the TUI, so events go to a daily rolling file
/// through a non-blocking writer. `RUST_LOG` wins over the configured filter.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let dir = config.log_dir()?;
    std::fs::create_dir_all(&dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .map_err(|e| Error::Logging(format!("invalid filter '{}': {e}", config.log.filter)))?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(log_dir = %dir.display(), "Logging initialized");
    Ok(guard)
}
