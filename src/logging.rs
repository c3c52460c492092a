use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Logging options, usually taken from [`Settings`](crate::config::Settings)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    /// Directory for daily-rotated log files; console only when `None`
    pub log_dir: Option<&'a Utf8Path>,
    /// Prefix of each log file name
    pub log_prefix: &'a str,
    /// Use debug level instead of info
    pub debug_mode: bool,
    /// Emit JSON lines instead of the human readable format
    pub json: bool,
}

/// Build the level filter, letting `RUST_LOG` override the configured default
pub fn env_filter(debug_mode: bool) -> EnvFilter {
    let default = if debug_mode { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Create `log_dir` if it doesn't exist
pub fn ensure_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// Setup logging on stderr with an optional rotating file appender.
///
/// stdout carries the MCP transport, so console output always goes to stderr
/// without ANSI colours.
///
/// # Returns
/// A guard that must be held for the duration of the program to keep file
/// logging active; `None` when no log directory is configured
pub fn setup_logging(options: LogOptions<'_>) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if options.json {
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed(),
        );
    } else {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .boxed(),
        );
    }

    let guard = match options.log_dir {
        Some(log_dir) => {
            ensure_log_dir(log_dir)?;

            // Create daily rotating file appender
            let file_appender = rolling::daily(log_dir, options.log_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            if options.json {
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .boxed(),
                );
            } else {
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false) // No ANSI codes in log files
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .boxed(),
                );
            }
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(options.debug_mode))
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(
        "Logging initialized: dir={}, debug={}, json={}",
        options.log_dir.map(Utf8Path::as_str).unwrap_or("-"),
        options.debug_mode,
        options.json
    );

    Ok(guard)
}
