//! Logging abstractions
//!
//! The resolver logs through an injected [`Logger`] so the host decides where
//! lines go. Credential material is never passed to a logger.

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{Level, Logger, LoggerExt, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{MemoryLogger, LogRecord};
