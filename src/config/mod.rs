//! TOML configuration file support.
//!
//! A config file supplies defaults for a session. Anything the caller sets explicitly
//! wins; the file only fills the gaps.

mod structs;

pub use structs::{ColorsConfig, FileConfig, GeneralConfig, LevelColorConfig, TargetsConfig};

use crate::fmt::ConsoleColor;
use crate::internal;
use crate::level::Level;
use crate::settings::{ColorPair, Disposition, Settings};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A completely empty config file is valid and changes nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub general: GeneralConfig,
    pub targets: TargetsConfig,
    pub file: FileConfig,
    pub colors: ColorsConfig,
}

impl ConfigFile {
    /// Loads the config from the default location.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or the file can't be read or parsed.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug(
                "CONFIG",
                &format!("{} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Parses config text.
    ///
    /// # Errors
    /// [`crate::Error::ConfigParse`] on invalid TOML or mistyped values.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config_dir>/keeplog/keeplog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("keeplog").join("keeplog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Fills every field `settings` left unset. Target and formatting switches are
    /// enabled when either side enables them.
    ///
    /// # Errors
    /// Invalid level, disposition or color names in the file.
    pub fn apply(&self, mut settings: Settings) -> Result<Settings, crate::Error> {
        if settings.level.is_none()
            && let Some(level) = &self.general.level
        {
            settings.level = Some(level.parse::<Level>()?);
        }

        settings.console |= self.targets.console;
        settings.file |= self.targets.file;
        settings.error_file |= self.targets.error_file;

        let file = &self.file;
        if settings.file_path.is_none() {
            settings.file_path = file.path.as_deref().map(expand_path);
        }
        if settings.error_file_path.is_none() {
            settings.error_file_path = file.error_path.as_deref().map(expand_path);
        }
        if settings.disposition.is_none()
            && let Some(disposition) = &file.disposition
        {
            settings.disposition = Some(disposition.parse::<Disposition>()?);
        }
        settings.with_level |= file.with_level;
        settings.with_timestamp |= file.with_timestamp;
        settings.utc |= file.utc;
        if settings.timestamp_format.is_none() {
            settings.timestamp_format.clone_from(&file.timestamp_format);
        }
        if settings.tab_size.is_none() {
            settings.tab_size = file.tab_size;
        }

        let colors = &self.colors;
        if settings.foreground.is_none() {
            settings.foreground = parse_color(colors.foreground.as_deref())?;
        }
        if settings.background.is_none() {
            settings.background = parse_color(colors.background.as_deref())?;
        }
        for (level, entry) in self.level_colors() {
            let pair = ColorPair::new(
                parse_color(entry.foreground.as_deref())?,
                parse_color(entry.background.as_deref())?,
            );
            settings.level_colors.entry(level).or_insert(pair);
        }

        Ok(settings)
    }

    fn level_colors(&self) -> impl Iterator<Item = (Level, &LevelColorConfig)> {
        let colors = &self.colors;
        [
            (Level::Error, colors.error.as_ref()),
            (Level::Warning, colors.warning.as_ref()),
            (Level::Info, colors.info.as_ref()),
            (Level::Debug, colors.debug.as_ref()),
        ]
        .into_iter()
        .filter_map(|(level, entry)| entry.map(|entry| (level, entry)))
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn parse_color(name: Option<&str>) -> Result<Option<ConsoleColor>, crate::Error> {
    name.map(str::parse::<ConsoleColor>)
        .transpose()
        .map_err(Into::into)
}
