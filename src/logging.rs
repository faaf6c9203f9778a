//! File logging.
//!
//! The terminal belongs to the UI, so log records go to rotating files
//! under `TENOTE_LOG_DIR` or `<state-home>/tenote/logs`. Initialisation
//! happens at most once per process and never panics; a failure is handed
//! back to the caller, which keeps running without logs.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const ENV_LOG: &str = "TENOTE_LOG";
pub const ENV_LOG_DIR: &str = "TENOTE_LOG_DIR";

const LOG_FILE_BASENAME: &str = "tenote";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

pub fn default_log_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(ENV_LOG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| base.join(crate::config::APP_DIR).join("logs"))
}

pub fn level_from_env() -> String {
    env::var(ENV_LOG).unwrap_or_else(|_| "info".to_string())
}

/// Starts the file logger. Calling it again with the same directory is a
/// no-op; a different directory is rejected.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}`",
            state.log_dir.display()
        ));
    }

    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!("failed to create log directory `{}`: {err}", log_dir.display())
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
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
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let _ = LOGGING_STATE.set(LoggingState {
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    });
    log::info!(
        "tenote {} started, level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "" | "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; \
             expected trace|debug|info|warn|error|off"
        )),
    }
}
