//! The logging session: resolved settings plus the sinks they imply. `log` checks each
//! target's eligibility and fans the entry out to the console and file sinks.

mod builder;

pub use builder::{ConsoleBuilder, FileBuilder, LoggerBuilder};

use crate::fmt::{LineFormatter, TimestampFormat};
use crate::internal;
use crate::level::Level;
use crate::output::{
    ColorTable, ConsoleCapture, ConsoleOutput, ConsoleStream, FileOutput, LogRecord, Output,
};
use crate::payload::{ErrorPayload, flatten};
use crate::settings::{ColorPair, SessionConfig, Settings, SnapshotFormat};
use std::path::Path;

/// Per-call target suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetOverrides {
    pub no_console: bool,
    pub no_file: bool,
}

impl TargetOverrides {
    /// Skip the console for this call.
    #[must_use]
    pub const fn no_console() -> Self {
        Self {
            no_console: true,
            no_file: false,
        }
    }

    /// Skip both file targets for this call.
    #[must_use]
    pub const fn no_file() -> Self {
        Self {
            no_console: false,
            no_file: true,
        }
    }
}

/// A logging session. Starts uninitialized (nothing is emitted) until [`init`](Self::init).
///
/// File handles belong to the session: they open on first use and close on
/// [`reset`](Self::reset), on re-init, and when the logger is dropped.
#[derive(Debug)]
pub struct Logger {
    config: SessionConfig,
    console: ConsoleOutput,
    log_file: Option<FileOutput>,
    error_file: Option<FileOutput>,
    /// Survives re-init so a capture stays attached.
    console_stream: ConsoleStream,
    console_colors: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// An uninitialized session writing to the real console.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console_stream(ConsoleStream::Std)
    }

    /// An uninitialized session whose console output lands in the returned buffer.
    #[must_use]
    pub fn with_console_capture() -> (Self, ConsoleCapture) {
        let capture = ConsoleCapture::new();
        let logger = Self::with_console_stream(ConsoleStream::Capture(capture.clone()));
        (logger, capture)
    }

    #[must_use]
    pub fn with_console_stream(stream: ConsoleStream) -> Self {
        Self {
            config: SessionConfig::default(),
            console: ConsoleOutput::new().stream(stream.clone()),
            log_file: None,
            error_file: None,
            console_stream: stream,
            console_colors: true,
        }
    }

    /// Stepwise construction of settings followed by `init`.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Replaces the whole session. Open files are closed first; on error the session is
    /// left uninitialized.
    ///
    /// # Errors
    /// Configuration errors from [`Settings::resolve`].
    pub fn init(&mut self, settings: &Settings) -> Result<(), crate::Error> {
        self.reset();

        let config = settings.resolve()?;
        if !config.is_initialized() {
            internal::debug("LOGGER", "Threshold is none, all targets disabled");
            return Ok(());
        }

        let formatter = LineFormatter::new()
            .tab_size(config.tab_size)
            .with_level(config.with_level)
            .with_timestamp(config.with_timestamp)
            .timestamp_format(TimestampFormat::parse(&config.timestamp_format)?)
            .utc(config.utc);

        let colors = ColorTable::resolve(
            ColorPair::new(config.foreground, config.background),
            &settings.level_colors,
        );

        self.console = ConsoleOutput::new()
            .formatter(formatter.clone())
            .color_table(colors)
            .colors(self.console_colors)
            .stream(self.console_stream.clone());

        self.log_file = config.file_path.as_ref().map(|path| {
            FileOutput::new(path, false)
                .disposition(config.disposition)
                .formatter(formatter.clone())
        });
        self.error_file = config.error_file_path.as_ref().map(|path| {
            FileOutput::new(path, true)
                .disposition(config.disposition)
                .formatter(formatter.clone())
        });

        let mut targets: Vec<&str> = Vec::new();
        if config.console {
            targets.push("console");
        }
        if config.file {
            targets.push("file");
        }
        if config.error_file {
            targets.push("error file");
        }
        internal::debug(
            "LOGGER",
            &format!(
                "Initialized at {} with targets [{}]",
                config.level,
                targets.join(", ")
            ),
        );

        self.config = config;
        Ok(())
    }

    /// Closes open files and returns to the uninitialized state, default colors included.
    /// Safe to call any number of times.
    pub fn reset(&mut self) {
        for file in [self.log_file.take(), self.error_file.take()]
            .into_iter()
            .flatten()
        {
            file.close();
        }
        self.config = SessionConfig::default();
        self.console = ConsoleOutput::new()
            .colors(self.console_colors)
            .stream(self.console_stream.clone());
    }

    /// Turns console escape codes on or off; survives re-init.
    pub fn set_console_colors(&mut self, enabled: bool) {
        self.console_colors = enabled;
        self.console = std::mem::take(&mut self.console).colors(enabled);
    }

    /// Routes one entry to every eligible target.
    ///
    /// An empty message with no indent is a no-op. Every eligible target is attempted even
    /// when an earlier one fails; the first failure is returned.
    ///
    /// # Errors
    /// I/O errors from a sink, including a log file that cannot be opened.
    pub fn log(
        &self,
        level: Level,
        message: &str,
        indent: u8,
        overrides: TargetOverrides,
    ) -> Result<(), crate::Error> {
        if message.is_empty() && indent == 0 {
            return Ok(());
        }

        let record = LogRecord::new(level, message, indent);
        let mut first_error = None;
        for output in self.targets_for(level, overrides) {
            if let Err(e) = output.write(&record) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn targets_for(&self, level: Level, overrides: TargetOverrides) -> Vec<&dyn Output> {
        let mut targets: Vec<&dyn Output> = Vec::with_capacity(3);
        if !overrides.no_console && self.config.console_accepts(level) {
            targets.push(&self.console);
        }
        if !overrides.no_file {
            if self.config.file_accepts(level)
                && let Some(file) = &self.log_file
            {
                targets.push(file);
            }
            if self.config.error_file_accepts(level)
                && let Some(file) = &self.error_file
            {
                targets.push(file);
            }
        }
        targets
    }

    /// # Errors
    /// See [`log`](Self::log).
    pub fn debug(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Debug, msg, 0, TargetOverrides::default())
    }

    /// # Errors
    /// See [`log`](Self::log).
    pub fn info(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Info, msg, 0, TargetOverrides::default())
    }

    /// # Errors
    /// See [`log`](Self::log).
    pub fn warning(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Warning, msg, 0, TargetOverrides::default())
    }

    /// # Errors
    /// See [`log`](Self::log).
    pub fn error(&self, msg: &str) -> Result<(), crate::Error> {
        self.log(Level::Error, msg, 0, TargetOverrides::default())
    }

    /// Logs each payload as its own `Error` entry. See [`flatten`] for the text chosen.
    ///
    /// # Errors
    /// The first error from any payload. Later payloads are still routed.
    pub fn log_errors(
        &self,
        payloads: &[&dyn ErrorPayload],
        indent: u8,
        raw: bool,
        overrides: TargetOverrides,
    ) -> Result<(), crate::Error> {
        let mut first_error = None;
        for payload in payloads {
            if let Err(e) = self.log(Level::Error, &flatten(*payload, raw), indent, overrides) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Flushes every sink.
    ///
    /// # Errors
    /// The first I/O error encountered.
    pub fn flush(&self) -> Result<(), crate::Error> {
        self.console.flush()?;
        for file in [&self.log_file, &self.error_file].into_iter().flatten() {
            file.flush()?;
        }
        Ok(())
    }

    /// Serialized view of the resolved settings. Live color tables are not included.
    ///
    /// # Errors
    /// [`crate::Error::Serialize`] from the serializer.
    pub fn config_snapshot(
        &self,
        format: SnapshotFormat,
        pretty: bool,
    ) -> Result<String, crate::Error> {
        self.config.snapshot(format, pretty)
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Where console lines go, kept across re-init.
    #[must_use]
    pub const fn console_stream(&self) -> &ConsoleStream {
        &self.console_stream
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.config.is_initialized()
    }

    #[must_use]
    pub const fn threshold(&self) -> Level {
        self.config.level
    }

    #[must_use]
    pub const fn color_table(&self) -> &ColorTable {
        self.console.table()
    }

    #[must_use]
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file.as_ref().map(FileOutput::path)
    }

    #[must_use]
    pub fn error_file_path(&self) -> Option<&Path> {
        self.error_file.as_ref().map(FileOutput::path)
    }

    #[must_use]
    pub fn is_log_file_open(&self) -> bool {
        self.log_file.as_ref().is_some_and(FileOutput::is_open)
    }

    #[must_use]
    pub fn is_error_file_open(&self) -> bool {
        self.error_file.as_ref().is_some_and(FileOutput::is_open)
    }
}
