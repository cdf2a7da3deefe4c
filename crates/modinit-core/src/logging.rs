//! Logging infrastructure for modinit.
//!
//! Structured logging using the `tracing` ecosystem. Log records are for
//! diagnosing a run; the user-facing messages (usage, success line, listing)
//! are printed by the binary and never depend on the log level.
//!
//! ## Example
//!
//! ```no_run
//! use modinit_core::logging;
//!
//! // Initialize logging (call once at startup)
//! let _guard = logging::init_logging(None, 1).expect("logging init");
//!
//! tracing::info!(module = "myapp", "initializing module");
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{InitError, Result};

/// File name prefix for the rolling JSON log.
pub const LOG_FILE_NAME: &str = "modinit.log";

/// Guard that must be held to ensure log flushing on shutdown.
///
/// Keep this guard alive for the lifetime of the application.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Map the `-v` count to a default level.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the modinit logging system.
///
/// This sets up:
/// - Console logging to stderr (human-readable, compact)
/// - File logging to `<log_dir>/modinit.log` (JSON lines) when `log_dir` is given
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
pub fn init_logging(log_dir: Option<PathBuf>, verbosity: u8) -> Result<LogGuard> {
    let default_level = level_for_verbosity(verbosity);
    // "modinit" also matches the modinit_* crate targets by prefix
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("modinit={default_level}")));

    let (file_layer, file_guard) = match &log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| InitError::directory_creation(dir.clone(), e))?;

            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .json()
                .with_current_span(true)
                .with_span_list(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let verbose = verbosity > 1;
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| InitError::internal(format!("logging already initialized: {e}")))?;

    tracing::debug!(log_dir = ?log_dir, verbosity, "logging initialized");

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Initialize minimal console-only logging for testing.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
