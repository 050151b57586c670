//! Console logger implementation

use super::traits::{Level, Logger};

/// A logger that writes to stderr
///
/// Stdout is left alone; it usually belongs to the host program.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the `[awsecrets]` prefix, info and above
    pub fn new() -> Self {
        Self {
            prefix: "[awsecrets]".to_string(),
            verbose: false,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// Also print debug lines
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn line(&self, level: Level, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) {
        if self.enabled(level) {
            eprintln!("{}", self.line(level, message));
        }
    }

    /// Debug lines only when verbose
    fn enabled(&self, level: Level) -> bool {
        self.verbose || level > Level::Debug
    }
}
