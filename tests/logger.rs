//! Session lifecycle and routing.

use keeplog::{
    ColorPair, ConsoleCapture, ConsoleColor, ErrorRecord, Level, Logger, SessionConfig, Settings,
    SnapshotFormat, TargetOverrides,
};
use std::fs;
use std::io;
use tempfile::TempDir;

fn capture_logger(level: Level) -> (Logger, ConsoleCapture) {
    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .level(level)
        .console()
        .colors(false)
        .capture(&capture)
        .done()
        .build()
        .unwrap();
    (logger, capture)
}

#[test]
fn uninitialized_logger_emits_nothing() {
    let (logger, capture) = Logger::with_console_capture();
    assert!(!logger.is_initialized());
    assert_eq!(logger.threshold(), Level::None);
    logger.error("lost").unwrap();
    assert!(capture.contents().is_empty());
}

#[test]
fn default_init_logs_info_to_console() {
    let (mut logger, capture) = Logger::with_console_capture();
    logger.init(&Settings::new()).unwrap();

    assert!(logger.is_initialized());
    assert_eq!(logger.threshold(), Level::Info);
    assert!(logger.log_file_path().is_none());

    logger.info("hello").unwrap();
    logger.debug("hidden").unwrap();
    logger.warning("careful").unwrap();

    assert_eq!(
        capture.lines(),
        vec!["hello".to_string(), "\x1b[93mcareful\x1b[0m".to_string()]
    );
}

#[test]
fn threshold_admits_only_more_severe_levels() {
    for threshold in Level::all() {
        let (logger, capture) = capture_logger(threshold);
        for level in Level::emitting() {
            capture.clear();
            logger.log(level, "x", 0, TargetOverrides::default()).unwrap();
            let emitted = !capture.contents().is_empty();
            assert_eq!(
                emitted,
                threshold != Level::None && level.rank() <= threshold.rank(),
                "threshold {threshold}, level {level}"
            );
        }
    }
}

#[test]
fn none_threshold_leaves_session_uninitialized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("never.log");
    let mut logger = Logger::new();
    let settings = Settings {
        level: Some(Level::None),
        file_path: Some(path.clone()),
        ..Settings::default()
    };
    logger.init(&settings).unwrap();

    assert!(!logger.is_initialized());
    assert!(logger.log_file_path().is_none());
    logger.error("nothing").unwrap();
    assert!(!path.exists());
}

#[test]
fn empty_message_without_indent_is_ignored() {
    let (logger, capture) = capture_logger(Level::Debug);
    logger.info("").unwrap();
    assert!(capture.contents().is_empty());

    logger.log(Level::Info, "", 1, TargetOverrides::default()).unwrap();
    assert_eq!(capture.contents(), "    \n");
}

#[test]
fn reset_is_idempotent() {
    let (mut logger, capture) = capture_logger(Level::Debug);
    logger.reset();
    logger.reset();

    assert!(!logger.is_initialized());
    assert_eq!(logger.config(), &SessionConfig::default());
    logger.error("after reset").unwrap();
    assert!(capture.contents().is_empty());
}

#[test]
fn reset_restores_default_colors() {
    let capture = ConsoleCapture::new();
    let mut logger = Logger::builder()
        .console()
        .foreground(ConsoleColor::Green)
        .capture(&capture)
        .done()
        .build()
        .unwrap();
    assert_eq!(
        logger.color_table().get(Level::Error),
        ColorPair::fg(ConsoleColor::Green)
    );

    logger.reset();
    assert_eq!(
        logger.color_table().get(Level::Error),
        ColorPair::fg(ConsoleColor::Red)
    );
}

#[test]
fn global_color_wins_per_channel() {
    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .console()
        .background(ConsoleColor::Black)
        .level_color(Level::Info, ColorPair::fg(ConsoleColor::Cyan))
        .capture(&capture)
        .done()
        .build()
        .unwrap();

    logger.info("styled").unwrap();
    assert_eq!(capture.contents(), "\x1b[96m\x1b[40mstyled\x1b[0m\n");
    assert_eq!(
        logger.color_table().get(Level::Error),
        ColorPair::new(Some(ConsoleColor::Red), Some(ConsoleColor::Black))
    );
}

#[test]
fn console_colors_can_be_disabled() {
    let (mut logger, capture) = Logger::with_console_capture();
    logger.set_console_colors(false);
    logger.init(&Settings::new()).unwrap();
    logger.error("plain").unwrap();
    assert_eq!(capture.contents(), "plain\n");
}

#[test]
fn multi_line_console_message_is_indented_per_line() {
    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .tab_size(2)
        .console()
        .colors(false)
        .capture(&capture)
        .done()
        .build()
        .unwrap();

    logger
        .log(Level::Info, "first\r\nsecond", 1, TargetOverrides::default())
        .unwrap();
    assert_eq!(capture.lines(), vec!["  first", "  second"]);
}

#[test]
fn no_console_override_skips_console_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("only-file.log");
    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .console()
        .capture(&capture)
        .done()
        .file()
        .path(&path)
        .done()
        .build()
        .unwrap();

    logger
        .log(Level::Info, "quiet", 0, TargetOverrides::no_console())
        .unwrap();
    logger
        .log(Level::Info, "loud", 0, TargetOverrides::no_file())
        .unwrap();

    assert_eq!(capture.lines(), vec!["loud"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "quiet\n");
}

#[test]
fn error_file_receives_only_errors() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("app.log");
    let err_path = dir.path().join("app.err.log");
    let logger = Logger::builder()
        .level(Level::Debug)
        .file()
        .path(&log_path)
        .done()
        .error_file()
        .path(&err_path)
        .done()
        .build()
        .unwrap();

    logger.debug("d").unwrap();
    logger.info("i").unwrap();
    logger.warning("w").unwrap();
    logger.error("e").unwrap();

    assert_eq!(fs::read_to_string(&log_path).unwrap(), "d\ni\nw\ne\n");
    assert_eq!(fs::read_to_string(&err_path).unwrap(), "e\n");
}

#[test]
fn error_file_respects_error_threshold_only() {
    let dir = TempDir::new().unwrap();
    let err_path = dir.path().join("errors.log");
    let logger = Logger::builder()
        .level(Level::Error)
        .error_file()
        .path(&err_path)
        .done()
        .build()
        .unwrap();

    logger.warning("skipped").unwrap();
    assert!(!err_path.exists());
    logger.error("kept").unwrap();
    assert_eq!(fs::read_to_string(&err_path).unwrap(), "kept\n");
}

#[test]
fn error_file_only_takes_errors_at_default_threshold() {
    let dir = TempDir::new().unwrap();
    let err_path = dir.path().join("only.err.log");
    let mut logger = Logger::new();
    logger
        .init(&Settings {
            error_file_path: Some(err_path.clone()),
            ..Settings::default()
        })
        .unwrap();

    assert_eq!(logger.threshold(), Level::Info);
    assert!(logger.config().error_file);
    assert!(!logger.config().file);
    assert!(!logger.config().console);

    logger.info("routine").unwrap();
    logger.warning("odd").unwrap();
    assert!(!err_path.exists());
    assert!(!logger.is_error_file_open());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

    logger.error("broken").unwrap();
    assert_eq!(fs::read_to_string(&err_path).unwrap(), "broken\n");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failing_file_does_not_stop_console() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .console()
        .colors(false)
        .capture(&capture)
        .done()
        .file()
        .path(blocker.join("app.log"))
        .done()
        .build()
        .unwrap();

    let result = logger.info("still shown");
    assert!(matches!(result, Err(keeplog::Error::Io(_))));
    assert_eq!(capture.lines(), vec!["still shown"]);
}

#[test]
fn log_errors_keeps_going_after_file_failure() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .console()
        .colors(false)
        .capture(&capture)
        .done()
        .file()
        .path(blocker.join("app.log"))
        .done()
        .build()
        .unwrap();

    let first = ErrorRecord::from_text("first");
    let second = ErrorRecord::from_text("second");
    let result = logger.log_errors(&[&first, &second], 0, false, TargetOverrides::default());

    assert!(matches!(result, Err(keeplog::Error::Io(_))));
    assert_eq!(capture.lines(), vec!["first", "second"]);
}

#[test]
fn reinit_closes_previous_files() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");

    let mut logger = Logger::new();
    logger
        .init(&Settings {
            file_path: Some(first.clone()),
            ..Settings::default()
        })
        .unwrap();
    logger.info("one").unwrap();
    assert!(logger.is_log_file_open());

    logger
        .init(&Settings {
            file_path: Some(second.clone()),
            ..Settings::default()
        })
        .unwrap();
    assert!(!logger.is_log_file_open());
    assert_eq!(logger.log_file_path(), Some(second.as_path()));

    logger.info("two").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "one\n");
    assert_eq!(fs::read_to_string(&second).unwrap(), "two\n");
}

#[test]
fn failed_init_leaves_session_uninitialized() {
    let (mut logger, _capture) = capture_logger(Level::Debug);
    let settings = Settings {
        tab_size: Some(9),
        ..Settings::default()
    };
    assert!(matches!(
        logger.init(&settings),
        Err(keeplog::Error::InvalidTabSize(9))
    ));
    assert!(!logger.is_initialized());
}

#[test]
fn log_and_error_file_cannot_share_a_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("same.log");
    let mut logger = Logger::new();
    let settings = Settings {
        file_path: Some(path.clone()),
        error_file_path: Some(path.clone()),
        disposition: Some(keeplog::Disposition::Backup),
        ..Settings::default()
    };

    assert!(matches!(
        logger.init(&settings),
        Err(keeplog::Error::SharedLogPath(shared)) if shared == path
    ));
    assert!(!logger.is_initialized());
    logger.error("dropped").unwrap();
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn bad_timestamp_format_is_rejected_at_init() {
    let mut logger = Logger::new();
    let settings = Settings {
        with_timestamp: true,
        timestamp_format: Some("'unterminated".to_string()),
        ..Settings::default()
    };
    assert!(matches!(
        logger.init(&settings),
        Err(keeplog::Error::TimestampFormat(_))
    ));
}

#[test]
fn log_errors_writes_one_entry_per_payload() {
    let (logger, capture) = capture_logger(Level::Error);
    let io_err = io::Error::other("  disk full  ");
    let record = ErrorRecord::from_text("socket closed");

    logger
        .log_errors(&[&io_err, &record], 0, false, TargetOverrides::default())
        .unwrap();

    assert_eq!(capture.lines(), vec!["disk full", "socket closed"]);
}

#[test]
fn log_errors_raw_uses_textual_form() {
    let (logger, capture) = capture_logger(Level::Error);
    let record = ErrorRecord::from_error(io::Error::other("inner")).description("wrapped");

    logger
        .log_errors(&[&record], 1, true, TargetOverrides::default())
        .unwrap();

    assert_eq!(capture.lines(), vec!["    wrapped"]);
}

#[test]
fn snapshot_reflects_resolved_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snap.log");
    let logger = Logger::builder()
        .level(Level::Debug)
        .file()
        .path(&path)
        .with_level(true)
        .append()
        .done()
        .build()
        .unwrap();

    let json = logger.config_snapshot(SnapshotFormat::Json, false).unwrap();
    let parsed: SessionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, logger.config());
    assert!(json.contains("\"level\":\"debug\""));
    assert!(json.contains("\"disposition\":\"append\""));
    assert!(!json.contains("error_file_path"));

    let toml = logger.config_snapshot(SnapshotFormat::Toml, true).unwrap();
    assert!(toml.contains("level = \"debug\""));
}
