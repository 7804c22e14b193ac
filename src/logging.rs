//! Tracing setup for the pipeline.
//!
//! Progress goes to stdout with a compact formatter and is mirrored to a log
//! file so long summarization runs can be inspected afterwards.
//! `VIDEOBRIEF_LOG_FILE` selects the file, defaulting to
//! `logs/videobrief.log`; when it cannot be opened the pipeline keeps running
//! with stdout logging only.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILE: &str = "logs/videobrief.log";

// Keeps the non-blocking writer flushing for the process lifetime.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize stdout and file logging. `RUST_LOG` controls filtering and
/// defaults to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    match open_log_file() {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

/// Open the log file in append mode, creating its directory as needed.
fn open_log_file() -> Option<std::fs::File> {
    let path = std::env::var("VIDEOBRIEF_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(error) = std::fs::create_dir_all(parent) {
                eprintln!(
                    "Failed to create log directory {}: {error}",
                    parent.display()
                );
                return None;
            }
        }
    }

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => Some(file),
        Err(error) => {
            eprintln!("Failed to open log file {}: {error}", path.display());
            None
        }
    }
}
