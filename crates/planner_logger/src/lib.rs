//! Leveled logger for the `gpa-planner` engine and CLI.
//!
//! - `log-info` enables `info!` output.
//! - `log-debug` enables `debug!` output and a runtime debug flag.
//! - `verbose` enables `verbose!`, an untagged stdout printer for CLI progress.
//! - `file-logging` redirects tagged messages to an append-only file once
//!   [`init_file_logging`] succeeds (verbose output never goes to the file).
//! - `warn!` and `error!` are always active.
//!
//! Tagged messages go to stdout (`[INFO]`, `[DEBUG]`) or stderr (`[WARN]`,
//! `[ERROR]`) while no log file is active.

use std::fmt::{self, Arguments};
use std::str::FromStr;
#[cfg(feature = "log-debug")]
use std::sync::atomic::AtomicBool;
use std::sync::atomic::{AtomicU8, Ordering};

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

/// Logging levels, ordered from most to least severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime flag).
    Debug = 4,
}

impl Level {
    /// Tag written in front of every message at this level.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

const fn default_level() -> u8 {
    if cfg!(feature = "log-debug") {
        Level::Debug as u8
    } else if cfg!(feature = "log-info") {
        Level::Info as u8
    } else {
        Level::Warn as u8
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(default_level());
#[cfg(feature = "log-debug")]
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(true);
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::SeqCst))
}

/// Parse and set level from a string (case-insensitive). Returns true on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

/// Enable debug logging at runtime (no-op when log-debug is disabled).
pub fn enable_debug() {
    #[cfg(feature = "log-debug")]
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Disable debug logging at runtime (no-op when log-debug is disabled).
pub fn disable_debug() {
    #[cfg(feature = "log-debug")]
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns whether debug logging is enabled (false if `log-debug` is disabled).
#[must_use]
pub fn is_debug_enabled() -> bool {
    #[cfg(feature = "log-debug")]
    {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }
    #[cfg(not(feature = "log-debug"))]
    {
        false
    }
}

/// Enable verbose output at runtime (no-op when verbose is disabled).
pub fn enable_verbose() {
    #[cfg(feature = "verbose")]
    VERBOSE_ENABLED.store(true, Ordering::SeqCst);
}

/// Disable verbose output at runtime (no-op when verbose is disabled).
pub fn disable_verbose() {
    #[cfg(feature = "verbose")]
    VERBOSE_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns whether verbose output is enabled (false if `verbose` is disabled).
#[must_use]
pub fn is_verbose_enabled() -> bool {
    #[cfg(feature = "verbose")]
    {
        VERBOSE_ENABLED.load(Ordering::SeqCst)
    }
    #[cfg(not(feature = "verbose"))]
    {
        false
    }
}

/// Start appending tagged log lines to `path`. Returns true on success.
#[cfg(feature = "file-logging")]
#[must_use]
pub fn init_file_logging(path: &std::path::Path) -> bool {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    LOG_FILE.lock().map_or(false, |mut slot| {
        *slot = Some(file);
        true
    })
}

/// Start appending tagged log lines to `path`. Always false without `file-logging`.
#[cfg(not(feature = "file-logging"))]
#[must_use]
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Stop writing to the log file and go back to console output.
pub fn close_file_logging() {
    #[cfg(feature = "file-logging")]
    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = None;
    }
}

/// Write `line` to the log file. Returns false when no file is active.
#[cfg(feature = "file-logging")]
fn write_to_file(line: &str) -> bool {
    let Ok(mut slot) = LOG_FILE.lock() else {
        return false;
    };
    let Some(file) = slot.as_mut() else {
        return false;
    };
    let _ = writeln!(file, "{line}");
    let _ = file.flush();
    true
}

#[cfg(not(feature = "file-logging"))]
const fn write_to_file(_line: &str) -> bool {
    false
}

fn emit(level: Level, msg: &str) {
    let line = format!("{} {msg}", level.tag());
    if write_to_file(&line) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

/// Decide whether a message at `level` should be emitted.
fn should_log(level: Level) -> bool {
    let compiled_in = match level {
        Level::Info => cfg!(feature = "log-info"),
        Level::Debug => cfg!(feature = "log-debug"),
        Level::Error | Level::Warn => true,
    };
    compiled_in && level <= self::level() && (level != Level::Debug || is_debug_enabled())
}

/// Internal logging dispatch used by the public macros.
pub fn log_impl(level: Level, args: Arguments) {
    if should_log(level) {
        emit(level, &args.to_string());
    }
}

#[macro_export]
/// Logs an error-level message (always enabled). Emits to stderr.
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Error, format_args!($($arg)*)) };
}

#[macro_export]
/// Logs a warning-level message (always enabled). Emits to stderr.
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Warn, format_args!($($arg)*)) };
}

#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Info, format_args!($($arg)*)) };
}

#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log_impl($crate::Level::Debug, format_args!($($arg)*)) };
}

#[macro_export]
/// Prints an untagged line when verbose output is enabled. Never goes to the log file.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::is_verbose_enabled() {
            println!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trips_through_display() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }

    #[test]
    fn level_parse_accepts_aliases() {
        assert_eq!("ERR".parse::<Level>(), Ok(Level::Error));
        assert_eq!("Warning".parse::<Level>(), Ok(Level::Warn));
        assert!("trace".parse::<Level>().is_err());
    }

    #[test]
    fn severity_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn macros_do_not_panic() {
        crate::info!("info {}", 1);
        crate::warn!("warn {}", 2);
        crate::error!("error {}", 3);
        crate::debug!("debug {}", 4);
    }
}
