//! Console output: immediate, colored feedback with indentation only. Timestamps and
//! level tags are a file concern.

use crate::fmt::{ConsoleColor, LineFormatter, TargetKind, paint};
use crate::level::Level;
use crate::settings::ColorPair;

use super::{LogRecord, Output};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Per-level colors, merged once at session init so writes only do a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: BTreeMap<Level, ColorPair>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ColorTable {
    /// Red errors, yellow warnings, gray debug output, plain info. No backgrounds.
    #[must_use]
    pub fn defaults() -> Self {
        let mut colors = BTreeMap::new();
        colors.insert(Level::Error, ColorPair::fg(ConsoleColor::Red));
        colors.insert(Level::Warning, ColorPair::fg(ConsoleColor::Yellow));
        colors.insert(Level::Info, ColorPair::default());
        colors.insert(Level::Debug, ColorPair::fg(ConsoleColor::Gray));
        Self { colors }
    }

    /// Layers `overrides` over the defaults, then lets a global color win for every level.
    /// Foreground and background are merged independently.
    #[must_use]
    pub fn resolve(global: ColorPair, overrides: &BTreeMap<Level, ColorPair>) -> Self {
        let mut table = Self::defaults();

        for (level, pair) in overrides {
            let entry = table.colors.entry(*level).or_default();
            if pair.foreground.is_some() {
                entry.foreground = pair.foreground;
            }
            if pair.background.is_some() {
                entry.background = pair.background;
            }
        }

        for entry in table.colors.values_mut() {
            if global.foreground.is_some() {
                entry.foreground = global.foreground;
            }
            if global.background.is_some() {
                entry.background = global.background;
            }
        }

        table
    }

    #[must_use]
    pub fn get(&self, level: Level) -> ColorPair {
        self.colors.get(&level).copied().unwrap_or_default()
    }
}

/// Where console lines end up.
#[derive(Debug, Clone, Default)]
pub enum ConsoleStream {
    /// Errors and warnings to stderr, everything else to stdout.
    #[default]
    Std,
    /// Every line to stderr, whatever its level.
    Stderr,
    /// Every line into a shared in-memory buffer.
    Capture(ConsoleCapture),
}

/// Shared buffer behind [`ConsoleStream::Capture`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl ConsoleCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Captured lines without their terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn write_line(&self, line: &str) {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        buffer.extend_from_slice(line.as_bytes());
        buffer.push(b'\n');
    }
}

/// All console rendering state for one session.
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    formatter: LineFormatter,
    colors: ColorTable,
    /// Piped output and captures may not want escape codes.
    colors_enabled: bool,
    stream: ConsoleStream,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: LineFormatter::new(),
            colors: ColorTable::defaults(),
            colors_enabled: true,
            stream: ConsoleStream::Std,
        }
    }

    #[must_use]
    pub fn formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn color_table(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub fn stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    #[must_use]
    pub const fn table(&self) -> &ColorTable {
        &self.colors
    }

    /// Colors are applied to each line on its own, so nothing leaks into the next write.
    fn render(&self, line: &str, level: Level) -> String {
        if !self.colors_enabled {
            return line.to_string();
        }
        let pair = self.colors.get(level);
        paint(line, pair.foreground, pair.background)
    }

    fn write_stderr(&self, lines: &[String], level: Level) -> io::Result<()> {
        let mut err = io::stderr().lock();
        for line in lines {
            writeln!(err, "{}", self.render(line, level))?;
        }
        err.flush()
    }
}

impl Output for ConsoleOutput {
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        let lines = self.formatter.format(
            record.message,
            record.indent,
            record.level,
            TargetKind::Console,
        );

        match &self.stream {
            ConsoleStream::Capture(capture) => {
                for line in &lines {
                    capture.write_line(&self.render(line, record.level));
                }
            }
            ConsoleStream::Stderr => self.write_stderr(&lines, record.level)?,
            ConsoleStream::Std if record.level <= Level::Warning => {
                self.write_stderr(&lines, record.level)?;
            }
            ConsoleStream::Std => {
                let mut out = io::stdout().lock();
                for line in &lines {
                    writeln!(out, "{}", self.render(line, record.level))?;
                }
                out.flush()?;
            }
        }

        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}
