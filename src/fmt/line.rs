//! Turns one message line into the text a target writes.
//!
//! Console lines only ever get indentation. File lines may additionally carry a
//! timestamp and a fixed-width level tag, joined as `stamp:TAG: ` in front of the
//! indented text.

use super::timestamp::TimestampFormat;
use crate::level::Level;
use chrono::{DateTime, FixedOffset};

/// Which family of targets a line is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Console,
    File,
}

/// Spaces per indent step when nothing else is configured.
pub const DEFAULT_TAB_SIZE: u8 = 4;

/// Everything the decoration step needs, fixed at session init.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    tab_size: u8,
    with_level: bool,
    with_timestamp: bool,
    timestamp: TimestampFormat,
    utc: bool,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFormatter {
    /// No prefixes, four-space indent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            with_level: false,
            with_timestamp: false,
            timestamp: TimestampFormat::default(),
            utc: false,
        }
    }

    #[must_use]
    pub const fn tab_size(mut self, size: u8) -> Self {
        self.tab_size = size;
        self
    }

    #[must_use]
    pub const fn with_level(mut self, enabled: bool) -> Self {
        self.with_level = enabled;
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, enabled: bool) -> Self {
        self.with_timestamp = enabled;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp = format;
        self
    }

    #[must_use]
    pub const fn utc(mut self, enabled: bool) -> Self {
        self.utc = enabled;
        self
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        self.utc
    }

    /// `tab_size * indent` spaces.
    #[must_use]
    pub fn indentation(&self, indent: u8) -> String {
        " ".repeat(usize::from(self.tab_size) * usize::from(indent))
    }

    /// Decorates a single line, reading the clock only when a timestamp is wanted.
    #[must_use]
    pub fn format_line(&self, line: &str, indent: u8, level: Level, kind: TargetKind) -> String {
        let stamp = (kind == TargetKind::File && self.with_timestamp)
            .then(|| self.timestamp.render_now(self.utc));
        self.compose(stamp, line, indent, level, kind)
    }

    /// Same as [`format_line`](Self::format_line) with a caller-supplied instant.
    #[must_use]
    pub fn format_line_at(
        &self,
        line: &str,
        indent: u8,
        level: Level,
        kind: TargetKind,
        time: &DateTime<FixedOffset>,
    ) -> String {
        let stamp = (kind == TargetKind::File && self.with_timestamp)
            .then(|| self.timestamp.render(time, self.utc));
        self.compose(stamp, line, indent, level, kind)
    }

    /// Splits a message and decorates every line, preserving order.
    #[must_use]
    pub fn format(&self, message: &str, indent: u8, level: Level, kind: TargetKind) -> Vec<String> {
        split_lines(message)
            .map(|line| self.format_line(line, indent, level, kind))
            .collect()
    }

    fn compose(
        &self,
        stamp: Option<String>,
        line: &str,
        indent: u8,
        level: Level,
        kind: TargetKind,
    ) -> String {
        let indent = self.indentation(indent);
        let tag = (kind == TargetKind::File && self.with_level).then(|| level.tag());

        match (stamp, tag) {
            (Some(stamp), Some(tag)) => format!("{stamp}:{tag}: {indent}{line}"),
            (Some(stamp), None) => format!("{stamp}: {indent}{line}"),
            (None, Some(tag)) => format!("{tag}: {indent}{line}"),
            (None, None) => format!("{indent}{line}"),
        }
    }
}

/// Splits on `\n`, dropping a `\r` right before it.
pub fn split_lines(message: &str) -> impl Iterator<Item = &str> {
    message
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
