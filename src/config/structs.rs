//! Configuration struct definitions.
//!
//! Values stay as strings here and are parsed when the file is applied, so a typo is
//! reported with the offending text instead of a serde position.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Threshold name (`none`, `error`, `warning`, `info`, `debug`).
    pub level: Option<String>,
}

/// Which targets to enable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetsConfig {
    pub console: bool,
    pub file: bool,
    pub error_file: bool,
}

/// File target configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Log file path; a leading `~` is expanded, other text is kept as written.
    pub path: Option<String>,
    /// Error file path; expanded like `path`.
    pub error_path: Option<String>,
    /// `backup`, `overwrite` or `append`.
    pub disposition: Option<String>,
    pub with_level: bool,
    pub with_timestamp: bool,
    pub timestamp_format: Option<String>,
    pub utc: bool,
    pub tab_size: Option<u8>,
}

/// Foreground and background names for one level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LevelColorConfig {
    pub foreground: Option<String>,
    pub background: Option<String>,
}

/// Console colors: a global pair plus optional `[colors.<level>]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub error: Option<LevelColorConfig>,
    pub warning: Option<LevelColorConfig>,
    pub info: Option<LevelColorConfig>,
    pub debug: Option<LevelColorConfig>,
}
