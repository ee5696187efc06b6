use std::io::Write;

use tempfile::NamedTempFile;

use livelog::config::{StaticConfig, get_config, init_config, replace_config};

fn write_toml(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

#[test]
fn test_load_from_toml_file() {
    let file = write_toml(
        r#"
[source]
base_url = "https://short.example.com"
admin = true
cookie = "session=abc"

[poll]
interval_ms = 1500

[display]
default_limit = 20
limit_options = [
    { value = 20, label = "twenty" },
    { value = 40, label = "forty" },
]
"#,
    );

    let config = StaticConfig::load(Some(&path_of(&file))).unwrap();
    assert_eq!(config.source.base_url, "https://short.example.com");
    assert!(config.source.admin);
    assert_eq!(config.source.cookie.as_deref(), Some("session=abc"));
    assert_eq!(config.poll.interval_ms, 1500);
    // untouched sections keep defaults
    assert_eq!(config.poll.dedup_interval_ms, 2000);
    assert_eq!(config.display.default_limit, 20);
    assert_eq!(config.display.limit_options.len(), 2);
    assert_eq!(config.display.limit_options[1].label, "forty");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let config = StaticConfig::load(Some(&missing.to_string_lossy())).unwrap();
    assert_eq!(config.poll.interval_ms, 5000);
    assert_eq!(config.display.default_limit, 100);
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let file = write_toml(
        r#"
[poll]
interval_ms = 0
"#,
    );
    let err = StaticConfig::load(Some(&path_of(&file))).unwrap_err();
    assert_eq!(err.code(), "E002");

    let file = write_toml(
        r#"
[source]
base_url = "ftp://example.com"
"#,
    );
    assert!(StaticConfig::load(Some(&path_of(&file))).is_err());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_toml("[source\nbase_url = ");
    let err = StaticConfig::load(Some(&path_of(&file))).unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[test]
fn test_saved_sample_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("livelog.toml");
    StaticConfig::default().save_to_file(&path).unwrap();

    let loaded = StaticConfig::load(Some(&path.to_string_lossy())).unwrap();
    assert_eq!(loaded.source.path, "/api/url/admin/live-log");
    assert_eq!(loaded.display.limit_options.len(), 5);
}

#[test]
fn test_global_config_lifecycle() {
    let first = init_config(None).unwrap();
    assert!(first.poll.interval_ms > 0);

    let mut changed = (*first).clone();
    changed.source.admin = !first.source.admin;
    replace_config(changed).unwrap();
    assert_eq!(get_config().unwrap().source.admin, !first.source.admin);

    // invalid replacements leave the current value alone
    let mut invalid = StaticConfig::default();
    invalid.poll.interval_ms = 0;
    assert!(replace_config(invalid).is_err());
    assert_eq!(get_config().unwrap().source.admin, !first.source.admin);

    // second init returns what is already loaded
    assert_eq!(init_config(None).unwrap().source.admin, !first.source.admin);
}
