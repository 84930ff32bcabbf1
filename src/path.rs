//! Default log file locations: next to the running program, named after it.

use std::path::PathBuf;

/// Extension used for the general log file.
pub const LOG_EXTENSION: &str = "log";

/// Marker inserted before the extension of the error file.
pub const ERROR_MARKER: &str = "err";

/// Optional pieces of a log path. Anything left `None` falls back to the running executable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOptions {
    pub directory: Option<PathBuf>,
    pub name: Option<String>,
    pub extension: Option<String>,
}

impl PathOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }
}

/// Builds `<dir>/<name>.log`, or `<dir>/<name>.err.log` for the error file.
///
/// A custom extension replaces `log`; the error marker still goes in front of it.
#[must_use]
pub fn format_log_path(options: &PathOptions, error_file: bool) -> PathBuf {
    let exe = std::env::current_exe().ok();

    let directory = options.directory.clone().unwrap_or_else(|| {
        exe.as_deref()
            .and_then(std::path::Path::parent)
            .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf)
    });

    let name = options.name.clone().unwrap_or_else(|| {
        exe.as_deref()
            .and_then(std::path::Path::file_stem)
            .map_or_else(
                || env!("CARGO_PKG_NAME").to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            )
    });

    let extension = options
        .extension
        .as_deref()
        .map(|ext| ext.trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .unwrap_or(LOG_EXTENSION);

    let file_name = if error_file {
        format!("{name}.{ERROR_MARKER}.{extension}")
    } else {
        format!("{name}.{extension}")
    };

    directory.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_pieces() {
        let opts = PathOptions::new().directory("/var/log").name("job");
        assert_eq!(format_log_path(&opts, false), PathBuf::from("/var/log/job.log"));
        assert_eq!(
            format_log_path(&opts, true),
            PathBuf::from("/var/log/job.err.log")
        );
    }

    #[test]
    fn custom_extension_keeps_error_marker() {
        let opts = PathOptions::new().directory("d").name("n").extension(".txt");
        assert_eq!(format_log_path(&opts, true), PathBuf::from("d/n.err.txt"));
    }

    #[test]
    fn defaults_follow_executable() {
        let path = format_log_path(&PathOptions::default(), false);
        let exe = std::env::current_exe().unwrap();
        assert_eq!(path.parent(), exe.parent());
        let stem = exe.file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("{stem}.log")
        );
    }
}
