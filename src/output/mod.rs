//! The two sink kinds a session writes to. The console sink is always present; file sinks
//! exist once per configured file target and own their stream handle.

mod console;
mod file;

pub use console::{ColorTable, ConsoleCapture, ConsoleOutput, ConsoleStream};
pub use file::{BACKUP_EXTENSION, FileOutput, backup_existing, backup_path};

use crate::level::Level;

/// One log call as a sink sees it. The message may still span several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub level: Level,
    pub message: &'a str,
    pub indent: u8,
}

impl<'a> LogRecord<'a> {
    #[must_use]
    pub const fn new(level: Level, message: &'a str, indent: u8) -> Self {
        Self {
            level,
            message,
            indent,
        }
    }
}

/// `Send + Sync` so a session can be shared across threads; each sink serializes its own writes.
pub trait Output: Send + Sync {
    /// Formats the record for this sink and writes every line of it.
    ///
    /// # Errors
    /// I/O errors from the underlying stream, including a failed lazy open.
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying stream.
    fn flush(&self) -> Result<(), crate::Error>;

    /// Releases whatever the sink holds open. Never fails; problems go to the internal channel.
    fn close(&self) {}
}
