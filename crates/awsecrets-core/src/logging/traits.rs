//! Logger trait and severity levels

use std::fmt;
use std::sync::Arc;

/// Severity of a log line
///
/// The resolver reports stage outcomes at `Debug`, the final pair at `Info`,
/// and profiles the store does not know at `Warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
        }
    }
}

/// Sink for resolver log lines
///
/// Messages arrive fully formatted and never carry credential values.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    /// Whether lines at `level` are kept; `false` skips formatting them
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Formatting entry point used by the `log_*!` macros
///
/// The arguments are only rendered when the logger keeps `level`, so a
/// disabled logger costs no allocation.
pub trait LoggerExt: Logger {
    fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.log(level, &args.to_string());
        }
    }
}

impl<T: Logger + ?Sized> LoggerExt for T {}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &*$logger,
            $crate::logging::Level::Debug,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &*$logger,
            $crate::logging::Level::Info,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::logging::LoggerExt::log_fmt(
            &*$logger,
            $crate::logging::Level::Warn,
            format_args!($($arg)*),
        )
    };
}
