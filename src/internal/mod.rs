//! keeplog's own diagnostic channel. File opens, backups and close failures are reported
//! here instead of being returned to callers who cannot act on them.
//!
//! Backed by a console-only [`Logger`] in a `OnceLock`, so it never touches the files it
//! reports on. Every level goes to stderr, keeping stdout free for the host program.
//! Messages before `init` silently vanish.

use crate::level::Level;
use crate::logger::{Logger, TargetOverrides};
use crate::output::ConsoleStream;
use std::sync::OnceLock;

static INTERNAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Turns the channel on at the given threshold. Only the first call takes effect.
pub fn init(level: Level) {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| channel(level));
    if !was_init {
        debug("INTERNAL", &format!("Internal logger ready at {level}"));
    }
}

fn channel(level: Level) -> Logger {
    Logger::builder()
        .level(level)
        .console()
        .stderr()
        .done()
        .build()
        .unwrap_or_else(|_| Logger::with_console_stream(ConsoleStream::Stderr))
}

/// Whether `init` has run.
#[must_use]
pub fn is_initialized() -> bool {
    INTERNAL_LOGGER.get().is_some()
}

fn log(level: Level, scope: &str, msg: &str) {
    if let Some(logger) = INTERNAL_LOGGER.get() {
        let line = format!("[{scope}] {msg}");
        let _ = logger.log(level, &line, 0, TargetOverrides::default());
    }
}

/// Verbose lifecycle details: opens, closes, backups.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Non-fatal anomalies such as a missing optional config.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_writes_every_level_to_stderr() {
        let logger = channel(Level::Debug);
        assert!(logger.is_initialized());
        assert_eq!(logger.threshold(), Level::Debug);
        assert!(matches!(logger.console_stream(), ConsoleStream::Stderr));
        assert!(logger.log_file_path().is_none());
        assert!(logger.error_file_path().is_none());
    }
}
