//! No-op logger implementation

use super::traits::{Level, Logger};

/// A logger that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: Level, _message: &str) {}

    fn enabled(&self, _level: Level) -> bool {
        false
    }
}
