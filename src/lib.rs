#![forbid(unsafe_code)]

//! `keeplog` - leveled logging to the console, a log file and an error file.
//!
//! - Console output colored per level, warnings and errors on stderr
//! - Log and error files opened lazily, flushed after every line
//! - Backup, overwrite or append handling of existing files
//! - Optional level tags and timestamps in file output
//! - TOML config file for session defaults
//!
//! # Example
//!
//! ```no_run
//! use keeplog::{Level, Logger};
//!
//! # fn main() -> Result<(), keeplog::Error> {
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .console()
//!         .colors(true)
//!         .done()
//!     .file()
//!         .path("/tmp/app.log")
//!         .with_level(true)
//!         .append()
//!         .done()
//!     .build()?;
//!
//! logger.info("Application started")?;
//! logger.debug("Connecting to server...")?;
//! logger.error("Connection failed")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `cli` (default): Enables the `keeplog` command-line binary

// Core modules (always available)
pub mod config;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;
pub mod path;
pub mod payload;
pub mod settings;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use config::ConfigFile;
pub use error::Error;
pub use fmt::{ConsoleColor, LineFormatter, TargetKind, TimestampFormat};
pub use level::Level;
pub use logger::{ConsoleBuilder, FileBuilder, Logger, LoggerBuilder, TargetOverrides};
pub use output::{ConsoleCapture, ConsoleOutput, FileOutput, LogRecord, Output};
pub use path::{PathOptions, format_log_path};
pub use payload::{ErrorPayload, ErrorRecord};
pub use settings::{ColorPair, Disposition, SessionConfig, Settings, SnapshotFormat};
