//! Severity levels that gate which messages reach which targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower rank means higher severity. A threshold admits every level whose rank does not exceed its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Only meaningful as a threshold: switches every target off.
    None = 0,
    /// Failures. The only level the error file ever receives.
    Error = 1,
    /// Non-fatal anomalies that may need attention.
    Warning = 2,
    /// Normal operational messages.
    #[default]
    Info = 3,
    /// Diagnostics too noisy for normal operation.
    Debug = 4,
}

impl Level {
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Whether a message at `self` passes `threshold`.
    ///
    /// A `None` threshold admits nothing, and a `None` message is never emitted.
    #[must_use]
    pub const fn is_enabled(self, threshold: Self) -> bool {
        if matches!(threshold, Self::None) || matches!(self, Self::None) {
            return false;
        }
        self.rank() <= threshold.rank()
    }

    /// Lowercase because config files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Fixed five-column tag written in front of file lines.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::None => "     ",
            Self::Error => "ERROR",
            Self::Warning => "WARN ",
            Self::Info => "INFO ",
            Self::Debug => "DEBUG",
        }
    }

    /// Used by help output, config parsing, and tests.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::None,
            Self::Error,
            Self::Warning,
            Self::Info,
            Self::Debug,
        ]
    }

    /// Levels a message can actually be logged at.
    #[must_use]
    pub const fn emitting() -> [Self; 4] {
        [Self::Error, Self::Warning, Self::Info, Self::Debug]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "error" | "err" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
