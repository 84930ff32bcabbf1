//! Persistent file output. The stream is opened on the first write routed here, kept open
//! for the rest of the session, and flushed after every line.

use crate::fmt::{BACKUP_TIMESTAMP_FORMAT, LineFormatter, TargetKind, TimestampFormat};
use crate::internal;
use crate::settings::Disposition;

use super::{LogRecord, Output};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Appended after the timestamp of a renamed old log.
pub const BACKUP_EXTENSION: &str = ".bak";

/// How long to wait before generating another backup name after a collision.
const BACKUP_RETRY_DELAY: Duration = Duration::from_secs(1);

/// One log file and its lazily opened stream.
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    /// Only used to label internal diagnostics.
    error_file: bool,
    disposition: Disposition,
    formatter: LineFormatter,
    backup_extension: String,
    stream: Mutex<Option<BufWriter<File>>>,
}

impl FileOutput {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, error_file: bool) -> Self {
        Self {
            path: path.into(),
            error_file,
            disposition: Disposition::default(),
            formatter: LineFormatter::new(),
            backup_extension: BACKUP_EXTENSION.to_string(),
            stream: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn backup_extension(mut self, ext: impl Into<String>) -> Self {
        self.backup_extension = ext.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn is_error_file(&self) -> bool {
        self.error_file
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    const fn label(&self) -> &'static str {
        if self.error_file { "ERRFILE" } else { "FILE" }
    }

    /// Opens the stream now instead of on the first write. A no-op when already open.
    ///
    /// # Errors
    /// Directory creation, backup rename, or file open failures.
    pub fn open(&self) -> Result<(), crate::Error> {
        let mut stream = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        if stream.is_none() {
            *stream = Some(self.open_stream()?);
        }
        Ok(())
    }

    /// Applies the disposition to whatever file is already there, then opens for writing.
    fn open_stream(&self) -> Result<BufWriter<File>, crate::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            match fs::create_dir_all(parent) {
                Ok(()) => {
                    internal::debug(
                        self.label(),
                        &format!("Created directory: {}", parent.display()),
                    );
                }
                Err(e) => {
                    internal::error(
                        self.label(),
                        &format!("Failed to create directory {}: {e}", parent.display()),
                    );
                    return Err(e.into());
                }
            }
        }

        let exists = self.path.exists();
        let file = match self.disposition {
            Disposition::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
            Disposition::Overwrite => File::create(&self.path)?,
            Disposition::Backup => {
                if exists {
                    let utc = self.formatter.is_utc();
                    let backup = backup_existing(&self.path, &self.backup_extension, utc)?;
                    internal::debug(
                        self.label(),
                        &format!("Backed up {} to {}", self.path.display(), backup.display()),
                    );
                }
                OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&self.path)?
            }
        };

        internal::debug(
            self.label(),
            &format!(
                "Opened {} ({}, existed={exists})",
                self.path.display(),
                self.disposition
            ),
        );
        Ok(BufWriter::new(file))
    }
}

impl Output for FileOutput {
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        let mut guard = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        let stream = match &mut *guard {
            Some(stream) => stream,
            empty => empty.insert(self.open_stream()?),
        };

        for line in self
            .formatter
            .format(record.message, record.indent, record.level, TargetKind::File)
        {
            stream.write_all(line.as_bytes())?;
            stream.write_all(b"\n")?;
            stream.flush()?;
        }

        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        if let Some(stream) = self
            .stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            stream.flush()?;
        }
        Ok(())
    }

    fn close(&self) {
        let taken = self
            .stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(stream) = taken else {
            return;
        };

        match stream.into_inner() {
            Ok(file) => {
                if let Err(e) = file.sync_all() {
                    internal::debug(
                        self.label(),
                        &format!("Sync on close failed for {}: {e}", self.path.display()),
                    );
                }
                internal::debug(self.label(), &format!("Closed {}", self.path.display()));
            }
            Err(e) => {
                internal::debug(
                    self.label(),
                    &format!(
                        "Flush on close failed for {}: {}",
                        self.path.display(),
                        e.error()
                    ),
                );
            }
        }
    }
}

impl Drop for FileOutput {
    fn drop(&mut self) {
        self.close();
    }
}

/// Next free backup name for `path`: `<fileName>.<yyyyMMddHHmmss><ext>` in the same
/// directory. When the name for the current second is taken, waits a second and tries again.
#[must_use]
pub fn backup_path(path: &Path, extension: &str, utc: bool) -> PathBuf {
    let stamp_format = TimestampFormat::parse(BACKUP_TIMESTAMP_FORMAT).unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    loop {
        let stamp = stamp_format.render_now(utc);
        let candidate = path.with_file_name(format!("{file_name}.{stamp}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        internal::debug(
            "FILE",
            &format!("Backup name {} taken, retrying", candidate.display()),
        );
        thread::sleep(BACKUP_RETRY_DELAY);
    }
}

/// Renames `path` to its next free backup name and returns that name.
///
/// # Errors
/// The rename failure.
pub fn backup_existing(path: &Path, extension: &str, utc: bool) -> io::Result<PathBuf> {
    let backup = backup_path(path, extension, utc);
    fs::rename(path, &backup)?;
    Ok(backup)
}
