//! File-based logging setup.
//!
//! The TUI occupies the terminal, so logs are written to a daily-rotated
//! file instead of stdout. The log level can be controlled via the
//! `RUST_LOG` environment variable; the default keeps this crate at DEBUG
//! and everything else at WARN.

use std::env;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "manasik";

/// Resolve the log directory under `$XDG_STATE_HOME/manasik/logs` (or
/// `~/.local/state/manasik/logs`), falling back to a local `.logs`.
fn log_dir() -> PathBuf {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("state"))
    } else {
        None
    };

    match state_home {
        Some(d) => d.join("manasik").join("logs"),
        None => PathBuf::from(".logs"),
    }
}

/// Initialize the logging system. Returns the directory logs are written to.
pub fn init() -> anyhow::Result<PathBuf> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);

    // Non-blocking writer so logging never stalls the event loop. The guard
    // must outlive the process; leak it instead of threading it around.
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("manasik=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(dir)
}
