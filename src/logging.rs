//! Log Output
//!
//! The terminal belongs to the dashboard, so tracing output goes to a
//! daily-rolling file instead of stdout.

use crate::config::LoggingConfig;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with a file writer. The returned guard must be held
/// for the lifetime of the process or buffered log lines are lost.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let appender = tracing_appender::rolling::daily(&config.directory, "pgx-dash.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
