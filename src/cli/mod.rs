//! CLI module for keeplog.
//!
//! Session options come before the subcommand and initialize one logger; the subcommand
//! then uses it.

pub mod commands;

pub use commands::{cmd_config, cmd_log, cmd_path};

use crate::config::ConfigFile;
use crate::fmt::ConsoleColor;
use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use crate::settings::{Disposition, Settings, SnapshotFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// keeplog - Log messages to the console and log files from the command line.
#[derive(Debug, Parser)]
#[command(name = "keeplog", version, about = "Log messages to the console and log files")]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,
    #[command(subcommand)]
    pub command: Command,
}

/// How the session is initialized.
#[derive(Debug, Default, Args)]
pub struct SessionArgs {
    /// Threshold: none, error, warning, info or debug
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<Level>,
    /// Log to the console
    #[arg(long)]
    pub console: bool,
    /// Log to the log file
    #[arg(long)]
    pub file: bool,
    /// Log errors to the error file
    #[arg(long)]
    pub error_file: bool,
    /// Log file location (enables the log file)
    #[arg(long, value_name = "PATH")]
    pub file_path: Option<PathBuf>,
    /// Error file location (enables the error file)
    #[arg(long, value_name = "PATH")]
    pub error_file_path: Option<PathBuf>,
    /// Rename an existing file with a timestamp suffix
    #[arg(long, conflicts_with_all = ["overwrite", "append"])]
    pub backup: bool,
    /// Truncate an existing file
    #[arg(long, conflicts_with = "append")]
    pub overwrite: bool,
    /// Append to an existing file
    #[arg(long)]
    pub append: bool,
    /// Prefix file lines with the level tag
    #[arg(long)]
    pub with_level: bool,
    /// Prefix file lines with a timestamp
    #[arg(long)]
    pub with_timestamp: bool,
    /// Timestamp pattern, e.g. "yyyy-MM-dd HH:mm:ss"
    #[arg(long, value_name = "PATTERN")]
    pub timestamp_format: Option<String>,
    /// Render timestamps in UTC
    #[arg(long)]
    pub utc: bool,
    /// Spaces per indent step (1-8)
    #[arg(long, value_name = "N")]
    pub tab_size: Option<u8>,
    /// Console foreground for every level
    #[arg(long, value_name = "COLOR")]
    pub foreground: Option<ConsoleColor>,
    /// Console background for every level
    #[arg(long, value_name = "COLOR")]
    pub background: Option<ConsoleColor>,
    /// Config file (default: <config dir>/keeplog/keeplog.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl SessionArgs {
    /// The disposition flag given, if any.
    #[must_use]
    pub const fn disposition(&self) -> Option<Disposition> {
        if self.backup {
            Some(Disposition::Backup)
        } else if self.overwrite {
            Some(Disposition::Overwrite)
        } else if self.append {
            Some(Disposition::Append)
        } else {
            None
        }
    }

    /// Explicit settings from the flags, with no config file applied.
    #[must_use]
    pub fn explicit_settings(&self) -> Settings {
        Settings {
            level: self.level,
            console: self.console,
            file: self.file,
            error_file: self.error_file,
            file_path: self.file_path.clone(),
            error_file_path: self.error_file_path.clone(),
            disposition: self.disposition(),
            with_level: self.with_level,
            with_timestamp: self.with_timestamp,
            timestamp_format: self.timestamp_format.clone(),
            utc: self.utc,
            tab_size: self.tab_size,
            foreground: self.foreground,
            background: self.background,
            ..Settings::default()
        }
    }

    /// Flags merged over the config file.
    ///
    /// # Errors
    /// Config file read, parse or value errors.
    pub fn settings(&self) -> Result<Settings, crate::Error> {
        let config = match &self.config {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };
        config.apply(self.explicit_settings())
    }

    /// An initialized logger for this invocation.
    ///
    /// # Errors
    /// Config file errors and invalid settings.
    pub fn build_logger(&self) -> Result<Logger, crate::Error> {
        let settings = self.settings()?;
        internal::debug("CLI", &format!("Session settings: {settings:?}"));
        Logger::builder().settings(settings).build()
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a message.
    Log(LogArgs),
    /// Print the default log file path.
    Path(PathArgs),
    /// Print the resolved session configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Level of this message
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub level: Level,
    /// Indentation steps
    #[arg(short, long, default_value_t = 0)]
    pub indent: u8,
    /// Skip the console for this message
    #[arg(long)]
    pub no_console: bool,
    /// Skip both files for this message
    #[arg(long)]
    pub no_file: bool,
    /// Message text; words are joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Directory (default: the executable's directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// File name without extension (default: the executable's name)
    #[arg(long)]
    pub name: Option<String>,
    /// Extension (default: log)
    #[arg(long)]
    pub ext: Option<String>,
    /// The error file path instead
    #[arg(long)]
    pub error_file: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// json or toml
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub format: SnapshotFormat,
    /// Multi-line output
    #[arg(long)]
    pub pretty: bool,
}
