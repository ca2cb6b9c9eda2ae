//! File-backed logging bootstrap.
//!
//! The TUI owns the terminal, so diagnostics go to rotating log files under
//! the data directory instead of stderr. Initialization happens once per
//! process and must never panic; when it fails the app simply runs unlogged.

use std::path::Path;
use std::sync::OnceLock;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

const LOG_BASENAME: &str = "taskboard";
const MAX_LOG_BYTES: u64 = 2 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;

static LOGGER: OnceLock<Option<LoggerHandle>> = OnceLock::new();

/// Start file logging under `<data_dir>/logs`. Idempotent; failures are
/// swallowed so a read-only disk never blocks the board.
pub fn init(data_dir: &Path) {
    let log_dir = data_dir.join("logs");
    LOGGER.get_or_init(|| {
        std::fs::create_dir_all(&log_dir).ok()?;
        Logger::try_with_env_or_str("info")
            .ok()?
            .log_to_file(
                FileSpec::default()
                    .directory(&log_dir)
                    .basename(LOG_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEPT_LOG_FILES),
            )
            .append()
            .start()
            .ok()
    });
}

/// Fire-and-forget failure report: `context` says what was being attempted.
pub fn report(context: &str, error: &dyn std::fmt::Display) {
    log::error!("{context}: {error}");
}
