//! Logging utilities wrapping `tracing` initialisation

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Flushes the log file when dropped. Hold it until the program exits.
#[must_use = "dropping the guard stops the log file writer"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialise the global tracing subscriber according to the provided logging options.
///
/// Console output goes to stderr; stdout is reserved for the generation summary.
/// When a subscriber is already installed this does nothing.
pub fn init(options: &LoggingOptions) -> Result<LogGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LogGuard { _file: None });
    }

    let level = options.level.as_str();
    let env_filter = EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))?;

    let (file_layer, guard) = match file_writer(options)? {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .with_ansi(options.color);

    Registry::default()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(LogGuard { _file: guard })
}

/// Open the configured log file, plain append or rolled by time.
fn file_writer(options: &LoggingOptions) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    let Some(path) = options.file.as_deref() else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Config(format!("Failed to create {}: {e}", dir.display())))?;

    let builder = NonBlockingBuilder::default().lossy(false);
    let pair = match options.rotation {
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| Error::Config(format!("Failed to open {}: {e}", path.display())))?;
            builder.finish(file)
        }
        Some(rotation) => {
            let prefix = path.file_name().ok_or_else(|| {
                Error::Config(format!("Log file '{}' has no file name", path.display()))
            })?;
            let appender = match rotation {
                LogRotation::Hourly => rolling::hourly(dir, prefix),
                LogRotation::Daily => rolling::daily(dir, prefix),
            };
            builder.finish(appender)
        }
    };

    Ok(Some(pair))
}
