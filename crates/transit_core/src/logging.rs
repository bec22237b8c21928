//! Process logging bootstrap.
//!
//! # Responsibility
//! - Initialize stderr logging, optionally mirrored to rolling files, once
//!   per process.
//! - Capture panics as structured log events.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and directory.
//! - Re-initialization with a different configuration is rejected.
//! - Logging initialization must not panic.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, LogSpecification, Logger, LoggerHandle, Naming,
    WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "transit-loader";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: LevelFilter,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Initializes logging at `level`, writing to stderr and, when `log_dir` is
/// set, to size-rotated files in that directory.
///
/// # Errors
/// - Returns an error when `level` is not a `log` level name.
/// - Returns an error when `log_dir` is blank, relative, or cannot be created.
/// - Returns an error when logging is already active with another config.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), String> {
    let level = parse_level(level)?;
    let log_dir = log_dir.map(absolute_dir).transpose()?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, log_dir.as_deref()))?;

    if state.level != level || state.log_dir != log_dir {
        return Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch to level `{}` at `{}`",
            state.level,
            target_name(state.log_dir.as_deref()),
            level,
            target_name(log_dir.as_deref())
        ));
    }

    Ok(())
}

/// Returns `debug` for debug builds and `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: LevelFilter, log_dir: Option<&Path>) -> Result<LoggingState, String> {
    let spec = LogSpecification::builder().default(level).build();
    let logger = Logger::with(spec)
        .format_for_stderr(flexi_logger::default_format)
        .write_mode(WriteMode::Direct);

    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .duplicate_to_stderr(Duplicate::All)
        }
        None => logger.log_to_stderr(),
    }
    .start()
    .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=logging_init module=core status=ok version={} level={} target={}",
        env!("CARGO_PKG_VERSION"),
        level,
        target_name(log_dir)
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.map(Path::to_path_buf),
        _logger: logger,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level.trim().parse::<LevelFilter>().map_err(|_| {
        format!("unsupported log level `{level}`; expected off|error|warn|info|debug|trace")
    })
}

fn absolute_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = Path::new(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if path.is_relative() {
        return Err(format!("log_dir must be absolute, got `{}`", path.display()));
    }
    Ok(path.to_path_buf())
}

fn target_name(log_dir: Option<&Path>) -> String {
    log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string())
}

// Called only from `start_logger`, which `LOGGING_STATE` runs at most once.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| {
                panic_info
                    .payload()
                    .downcast_ref::<String>()
                    .map(String::as_str)
            })
            .unwrap_or("non-string panic payload");
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            single_line(payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

/// Flattens `value` to one line of at most `max_chars` characters plus `...`.
fn single_line(value: &str, max_chars: usize) -> String {
    let mut chars = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch });
    let mut line: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        line.push_str("...");
    }
    line
}
