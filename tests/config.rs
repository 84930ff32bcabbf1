use keeplog::{ConfigFile, ConsoleCapture, ConsoleColor, Disposition, Level, Logger, Settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigFile::load_from(&dir.path().join("absent.toml")).unwrap();
    let settings = config.apply(Settings::new()).unwrap();
    assert_eq!(settings, Settings::new());
}

#[test]
fn invalid_toml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[general\nlevel = ").unwrap();
    assert!(matches!(
        ConfigFile::load_from(&path),
        Err(keeplog::Error::ConfigParse(_))
    ));
}

#[test]
fn config_file_drives_a_session() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("from-config.log");
    let config_path = dir.path().join("keeplog.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[general]
level = "warning"

[targets]
console = true

[file]
path = "{}"
disposition = "overwrite"
with_level = true

[colors.warning]
foreground = "magenta"
"#,
            log_path.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let settings = ConfigFile::load_from(&config_path)
        .unwrap()
        .apply(Settings::new())
        .unwrap();
    assert_eq!(settings.level, Some(Level::Warning));
    assert_eq!(settings.disposition, Some(Disposition::Overwrite));

    let capture = ConsoleCapture::new();
    let logger = Logger::builder()
        .settings(settings)
        .console()
        .capture(&capture)
        .done()
        .build()
        .unwrap();

    logger.info("dropped").unwrap();
    logger.warning("kept").unwrap();

    assert_eq!(capture.contents(), "\x1b[95mkept\x1b[0m\n");
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "WARN : kept\n");
    assert_eq!(
        logger.color_table().get(Level::Warning).foreground,
        Some(ConsoleColor::Magenta)
    );
}

#[test]
fn explicit_settings_override_file() {
    let config = ConfigFile::parse(
        r#"
[general]
level = "error"

[file]
timestamp_format = "HH:mm"
utc = true
"#,
    )
    .unwrap();

    let explicit = Settings {
        level: Some(Level::Debug),
        timestamp_format: Some("yyyy".to_string()),
        ..Settings::default()
    };
    let settings = config.apply(explicit).unwrap();

    assert_eq!(settings.level, Some(Level::Debug));
    assert_eq!(settings.timestamp_format.as_deref(), Some("yyyy"));
    assert!(settings.utc);
}
