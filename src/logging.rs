//! One-time logging bootstrap.
//!
//! Call [`enable_log`] once at process start, before any tool invocations.
//! The configuration is held in an explicit process-wide slot; [`log_enabled`]
//! reports whether setup has completed.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use tracing::level_filters::LevelFilter;

use crate::{Result, ToolError};

const DEFAULT_LOG_PATH: &str = "./agent.log";

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();

/// Severity threshold for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            // tracing has no level above ERROR
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            other => Err(ToolError::Config(format!("Invalid log level: {}", other))),
        }
    }
}

/// How the log file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Truncate,
    Append,
}

impl FromStr for LogMode {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "truncate" | "w" => Ok(LogMode::Truncate),
            "append" | "a" => Ok(LogMode::Append),
            other => Err(ToolError::Config(format!("Invalid log mode: {}", other))),
        }
    }
}

/// Process-wide logging configuration, set once by [`enable_log`]
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub path: PathBuf,
    pub level: LogLevel,
    pub mode: LogMode,
}

/// Enable diagnostic logging for the process.
///
/// Level and mode are validated before the filesystem is touched; a bad
/// value fails fast with no side effects. Not safe to call concurrently
/// with itself, and a second call fails because the global subscriber is
/// already installed.
pub fn enable_log(path: Option<&str>, level: &str, mode: &str) -> Result<()> {
    let level = LogLevel::from_str(level)?;
    let mode = LogMode::from_str(mode)?;
    let path = PathBuf::from(path.unwrap_or(DEFAULT_LOG_PATH));

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    match mode {
        LogMode::Truncate => options.truncate(true),
        LogMode::Append => options.append(true),
    };
    let file = options
        .open(&path)
        .map_err(|err| ToolError::Logging(format!("failed to open {}: {}", path.display(), err)))?;

    tracing_subscriber::fmt()
        .with_max_level(level.to_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| ToolError::Logging(format!("failed to install subscriber: {}", err)))?;

    let config = LogConfig { path, level, mode };
    LOG_CONFIG
        .set(config)
        .map_err(|_| ToolError::Logging("logging already enabled".to_string()))?;
    Ok(())
}

/// Check whether [`enable_log`] has completed for this process.
pub fn log_enabled() -> bool {
    LOG_CONFIG.get().is_some()
}

/// The active logging configuration, if setup has completed.
pub fn log_config() -> Option<&'static LogConfig> {
    LOG_CONFIG.get()
}
