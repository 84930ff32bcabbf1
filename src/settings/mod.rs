//! What a logging session is initialized from, and what it resolves to.
//!
//! [`Settings`] is the caller's request: mostly optional fields, already merged from
//! explicit parameters and any config file. [`SessionConfig`] is the resolved state a
//! [`Logger`](crate::Logger) runs with: targets decided, paths known and the
//! timestamp pattern proven renderable.

use crate::fmt::{ConsoleColor, DEFAULT_TAB_SIZE, DEFAULT_TIMESTAMP_FORMAT, TimestampFormat};
use crate::level::Level;
use crate::path::{PathOptions, format_log_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Valid indentation widths.
pub const TAB_SIZE_RANGE: std::ops::RangeInclusive<u8> = 1..=8;

/// What happens to a log file that already exists when the session first writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Rename the old file with a timestamp suffix, then start fresh.
    #[default]
    Backup,
    /// Truncate the old file.
    Overwrite,
    /// Keep writing at the end of the old file.
    Append,
}

impl Disposition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Overwrite => "overwrite",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disposition {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backup" => Ok(Self::Backup),
            "overwrite" => Ok(Self::Overwrite),
            "append" => Ok(Self::Append),
            _ => Err(crate::Error::InvalidDisposition(s.to_string())),
        }
    }
}

/// Foreground and background for one level. `None` leaves that channel to the next layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPair {
    pub foreground: Option<ConsoleColor>,
    pub background: Option<ConsoleColor>,
}

impl ColorPair {
    #[must_use]
    pub const fn new(foreground: Option<ConsoleColor>, background: Option<ConsoleColor>) -> Self {
        Self {
            foreground,
            background,
        }
    }

    #[must_use]
    pub const fn fg(color: ConsoleColor) -> Self {
        Self::new(Some(color), None)
    }
}

/// Requested session settings.
///
/// Target flags are requests: `false` means "not asked for", and the resolve step may
/// still enable a target (console when nothing is asked for, a file target when only its
/// path is given).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Threshold. Unset means [`Level::Info`].
    pub level: Option<Level>,
    pub console: bool,
    pub file: bool,
    pub error_file: bool,
    pub file_path: Option<PathBuf>,
    pub error_file_path: Option<PathBuf>,
    /// Unset means [`Disposition::Backup`].
    pub disposition: Option<Disposition>,
    pub with_level: bool,
    pub with_timestamp: bool,
    pub timestamp_format: Option<String>,
    pub utc: bool,
    pub tab_size: Option<u8>,
    /// Applies to every level and wins over the per-level table.
    pub foreground: Option<ConsoleColor>,
    pub background: Option<ConsoleColor>,
    /// Layered over the default per-level colors.
    pub level_colors: BTreeMap<Level, ColorPair>,
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the init rules and validates the result.
    ///
    /// # Errors
    /// [`crate::Error::InvalidTabSize`] for a tab size outside `1..=8`, and
    /// [`crate::Error::TimestampFormat`] when the timestamp pattern cannot render, and
    /// [`crate::Error::SharedLogPath`] when both files would be the same file.
    pub fn resolve(&self) -> Result<SessionConfig, crate::Error> {
        let level = self.level.unwrap_or_default();
        if level == Level::None {
            return Ok(SessionConfig::default());
        }

        let tab_size = self.tab_size.unwrap_or(DEFAULT_TAB_SIZE);
        if !TAB_SIZE_RANGE.contains(&tab_size) {
            return Err(crate::Error::InvalidTabSize(tab_size));
        }

        let timestamp_format = self
            .timestamp_format
            .clone()
            .unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string());
        let _ = TimestampFormat::parse(&timestamp_format)?.render_now(self.utc);

        let nothing_requested = !self.console
            && !self.file
            && !self.error_file
            && self.file_path.is_none()
            && self.error_file_path.is_none();

        let console = self.console || nothing_requested;
        let file = self.file || self.file_path.is_some();
        let error_file = self.error_file || self.error_file_path.is_some();

        let file_path = file.then(|| {
            self.file_path
                .clone()
                .unwrap_or_else(|| format_log_path(&PathOptions::default(), false))
        });
        let error_file_path = error_file.then(|| {
            self.error_file_path
                .clone()
                .unwrap_or_else(|| format_log_path(&PathOptions::default(), true))
        });
        if let (Some(log), Some(err)) = (&file_path, &error_file_path)
            && same_location(log, err)
        {
            return Err(crate::Error::SharedLogPath(err.clone()));
        }

        Ok(SessionConfig {
            level,
            console,
            file,
            error_file,
            file_path,
            error_file_path,
            disposition: self.disposition.unwrap_or_default(),
            with_level: self.with_level,
            with_timestamp: self.with_timestamp,
            timestamp_format,
            utc: self.utc,
            tab_size,
            foreground: self.foreground,
            background: self.background,
        })
    }
}

/// Lexical comparison after making both paths absolute; the files need not exist yet.
fn same_location(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Resolved session state. The default value is the uninitialized session: threshold
/// `None`, no targets, no paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub level: Level,
    pub console: bool,
    pub file: bool,
    pub error_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_file_path: Option<PathBuf>,
    pub disposition: Disposition,
    pub with_level: bool,
    pub with_timestamp: bool,
    pub timestamp_format: String,
    pub utc: bool,
    pub tab_size: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<ConsoleColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<ConsoleColor>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: Level::None,
            console: false,
            file: false,
            error_file: false,
            file_path: None,
            error_file_path: None,
            disposition: Disposition::Backup,
            with_level: false,
            with_timestamp: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            utc: false,
            tab_size: DEFAULT_TAB_SIZE,
            foreground: None,
            background: None,
        }
    }
}

/// Serialization used by [`SessionConfig::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    #[default]
    Json,
    Toml,
}

impl FromStr for SnapshotFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(crate::Error::Serialize(format!("unknown snapshot format: {s}"))),
        }
    }
}

impl SessionConfig {
    /// Serializes the resolved settings, compact or pretty.
    ///
    /// # Errors
    /// [`crate::Error::Serialize`] when the serializer rejects the value.
    pub fn snapshot(&self, format: SnapshotFormat, pretty: bool) -> Result<String, crate::Error> {
        let result = match (format, pretty) {
            (SnapshotFormat::Json, false) => serde_json::to_string(self).map_err(|e| e.to_string()),
            (SnapshotFormat::Json, true) => {
                serde_json::to_string_pretty(self).map_err(|e| e.to_string())
            }
            (SnapshotFormat::Toml, false) => toml::to_string(self).map_err(|e| e.to_string()),
            (SnapshotFormat::Toml, true) => {
                toml::to_string_pretty(self).map_err(|e| e.to_string())
            }
        };
        result.map_err(crate::Error::Serialize)
    }

    /// Initialized means a threshold other than `None` was resolved.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.level != Level::None
    }

    /// Console eligibility for a message level.
    #[must_use]
    pub const fn console_accepts(&self, level: Level) -> bool {
        self.console && level.is_enabled(self.level)
    }

    /// Log file eligibility for a message level.
    #[must_use]
    pub const fn file_accepts(&self, level: Level) -> bool {
        self.file && level.is_enabled(self.level)
    }

    /// The error file only ever takes `Error` entries.
    #[must_use]
    pub const fn error_file_accepts(&self, level: Level) -> bool {
        matches!(level, Level::Error) && self.error_file && level.is_enabled(self.level)
    }
}
