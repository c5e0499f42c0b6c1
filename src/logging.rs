//! Logging bootstrap for the reader engine.
//!
//! Initializes file-based rolling logs exactly once per process. Swallowed
//! background failures (progress sync, audit writes) are reported through
//! `log::warn!` and end up here rather than on the RPC channel.

use std::path::Path;
use std::sync::OnceLock;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

const LOG_FILE_BASENAME: &str = "readnwin-reader";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Initializes rolling file logging in `log_dir` at the given level spec
/// (e.g. `"info"` or `"readnwin_reader=debug"`).
///
/// Idempotent: repeated calls after a successful init are no-ops. Returns a
/// human-readable error string when initialization fails; never panics.
pub fn init(level: &str, log_dir: &Path) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level spec '{}': {}", level, e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .start()
        .map_err(|e| format!("failed to start logger: {}", e))?;

    // A second racing init loses; its handle is dropped and the first wins.
    let _ = LOGGER.set(handle);
    Ok(())
}
