//! Logger that keeps records in memory

use std::sync::Mutex;

use super::traits::{Level, Logger};

/// One captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// Logger that records every line
///
/// Useful for hosts that surface resolution details in their own UI, and for
/// asserting on what the resolver reported.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Messages of all records, in order
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LoggerExt;

    #[test]
    fn test_memory_logger_records() {
        let logger = MemoryLogger::new();
        logger.debug("one");
        logger.warn("two");
        logger.log_fmt(Level::Info, format_args!("three {}", 3));

        let records = logger.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].level, Level::Debug);
        assert_eq!(records[1].level, Level::Warn);
        assert_eq!(logger.messages()[2], "three 3");

        logger.clear();
        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_macros_accept_shared_logger() {
        let logger: crate::logging::SharedLogger = std::sync::Arc::new(MemoryLogger::new());
        crate::log_debug!(logger, "value={}", 1);
        crate::log_info!(logger, "done");
    }
}
