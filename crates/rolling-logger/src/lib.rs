//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to size-capped files in a log
//! directory and keeps the newest lines in memory. `log` records from
//! libraries are bridged into the same subscriber.

mod writer;

use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, format::Writer, time::FormatTime};
use tracing_subscriber::prelude::*;

pub use writer::{RollingWriter, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES, DEFAULT_RING_LINES};

static WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Local wall-clock timestamps with milliseconds
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Log to `{dir}/{app_name}.log`, rotating by size. Call once at startup.
pub fn init_logger(dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    let dir = dir.as_ref();
    let writer = RollingWriter::new(dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES, DEFAULT_RING_LINES)
        .map_err(|e| format!("Failed to open log in {}: {}", dir.display(), e))?;
    WRITER
        .set(writer.clone())
        .map_err(|_| "Logger already initialized".to_string())?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    tracing::info!("Logging to {}", dir.display());
    Ok(())
}

/// Stderr only, for runs without a log directory
pub fn init_console(verbose: bool) -> Result<(), String> {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::registry()
        .with(level)
        .with(fmt::layer().with_writer(std::io::stderr).with_timer(LocalTime))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Newest `n` formatted lines, oldest first
pub fn recent(n: usize) -> Vec<String> {
    WRITER.get().map(|w| w.recent(n)).unwrap_or_default()
}

fn ensure_init() -> Result<(), String> {
    match WRITER.get() {
        Some(_) => Ok(()),
        None => Err("Logger not initialized".to_string()),
    }
}
