//! Stepwise construction of [`Settings`] that ends in an initialized [`Logger`].

use super::Logger;
use crate::fmt::ConsoleColor;
use crate::level::Level;
use crate::output::{ConsoleCapture, ConsoleStream};
use crate::settings::{ColorPair, Disposition, Settings};
use std::path::PathBuf;

/// Collects settings; [`build`](Self::build) runs the same init as [`Logger::init`].
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    settings: Settings,
    stream: ConsoleStream,
    colors: Option<bool>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from already-assembled settings, e.g. ones merged from a config file.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Unset means `Info`.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.settings.level = Some(level);
        self
    }

    /// Spaces per indent step, `1..=8`.
    #[must_use]
    pub const fn tab_size(mut self, size: u8) -> Self {
        self.settings.tab_size = Some(size);
        self
    }

    /// Console has its own concerns (colors, capture) needing a dedicated sub-builder.
    #[must_use]
    pub fn console(self) -> ConsoleBuilder {
        ConsoleBuilder { parent: self }
    }

    /// The general log file.
    #[must_use]
    pub fn file(self) -> FileBuilder {
        FileBuilder {
            parent: self,
            error_file: false,
        }
    }

    /// The error-only log file.
    #[must_use]
    pub fn error_file(self) -> FileBuilder {
        FileBuilder {
            parent: self,
            error_file: true,
        }
    }

    /// The settings gathered so far.
    #[must_use]
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// # Errors
    /// Configuration errors, see [`Logger::init`].
    pub fn build(self) -> Result<Logger, crate::Error> {
        let mut logger = Logger::with_console_stream(self.stream);
        if let Some(enabled) = self.colors {
            logger.set_console_colors(enabled);
        }
        logger.init(&self.settings)?;
        Ok(logger)
    }
}

/// Console target settings.
pub struct ConsoleBuilder {
    parent: LoggerBuilder,
}

impl ConsoleBuilder {
    /// Piped output and captures may not want escape codes.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.parent.colors = Some(enabled);
        self
    }

    /// One foreground for every level.
    #[must_use]
    pub const fn foreground(mut self, color: ConsoleColor) -> Self {
        self.parent.settings.foreground = Some(color);
        self
    }

    /// One background for every level.
    #[must_use]
    pub const fn background(mut self, color: ConsoleColor) -> Self {
        self.parent.settings.background = Some(color);
        self
    }

    /// Overrides the default colors of one level.
    #[must_use]
    pub fn level_color(mut self, level: Level, colors: ColorPair) -> Self {
        self.parent.settings.level_colors.insert(level, colors);
        self
    }

    /// Sends console lines into `capture` instead of stdout/stderr.
    #[must_use]
    pub fn capture(mut self, capture: &ConsoleCapture) -> Self {
        self.parent.stream = ConsoleStream::Capture(capture.clone());
        self
    }

    /// Sends every console line to stderr, leaving stdout to the program.
    #[must_use]
    pub fn stderr(mut self) -> Self {
        self.parent.stream = ConsoleStream::Stderr;
        self
    }

    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.settings.console = true;
        self.parent
    }
}

/// Settings for either file target. Formatting options are shared by both files.
pub struct FileBuilder {
    parent: LoggerBuilder,
    error_file: bool,
}

impl FileBuilder {
    /// Explicit location; without one the path is derived from the running program.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = Some(path.into());
        if self.error_file {
            self.parent.settings.error_file_path = path;
        } else {
            self.parent.settings.file_path = path;
        }
        self
    }

    #[must_use]
    pub const fn disposition(mut self, disposition: Disposition) -> Self {
        self.parent.settings.disposition = Some(disposition);
        self
    }

    #[must_use]
    pub const fn backup(self) -> Self {
        self.disposition(Disposition::Backup)
    }

    #[must_use]
    pub const fn overwrite(self) -> Self {
        self.disposition(Disposition::Overwrite)
    }

    #[must_use]
    pub const fn append(self) -> Self {
        self.disposition(Disposition::Append)
    }

    #[must_use]
    pub const fn with_level(mut self, enabled: bool) -> Self {
        self.parent.settings.with_level = enabled;
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, enabled: bool) -> Self {
        self.parent.settings.with_timestamp = enabled;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.parent.settings.timestamp_format = Some(format.into());
        self
    }

    #[must_use]
    pub const fn utc(mut self, enabled: bool) -> Self {
        self.parent.settings.utc = enabled;
        self
    }

    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        if self.error_file {
            self.parent.settings.error_file = true;
        } else {
            self.parent.settings.file = true;
        }
        self.parent
    }
}
