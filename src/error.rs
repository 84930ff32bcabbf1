//! Unified error type for all keeplog operations.

/// Error type for keeplog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while opening, backing up or writing a log file.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Settings snapshot could not be serialized.
    Serialize(String),
    /// Timestamp format string cannot render a date.
    TimestampFormat(String),
    /// Invalid log level string.
    InvalidLevel(String),
    /// Invalid console color name.
    InvalidColor(String),
    /// Tab size outside `1..=8`.
    InvalidTabSize(u8),
    /// Invalid old-file disposition string.
    InvalidDisposition(String),
    /// Log file and error file resolve to the same path.
    SharedLogPath(std::path::PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::Serialize(s) => write!(f, "serialization error: {s}"),
            Self::TimestampFormat(s) => write!(f, "invalid timestamp format: {s}"),
            Self::InvalidLevel(level) => write!(f, "invalid log level: {level}"),
            Self::InvalidColor(color) => write!(f, "invalid console color: {color}"),
            Self::InvalidTabSize(size) => write!(f, "tab size must be 1..=8, got {size}"),
            Self::InvalidDisposition(s) => write!(f, "invalid file disposition: {s}"),
            Self::SharedLogPath(path) => {
                write!(f, "log file and error file share the path {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<crate::level::ParseLevelError> for Error {
    fn from(e: crate::level::ParseLevelError) -> Self {
        Self::InvalidLevel(e.input().to_string())
    }
}

impl From<crate::fmt::ParseColorError> for Error {
    fn from(e: crate::fmt::ParseColorError) -> Self {
        Self::InvalidColor(e.input().to_string())
    }
}
