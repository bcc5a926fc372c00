use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = load_settings_with(&dir.path().join("missing.toml"), env_from(&[]));
    assert_eq!(loaded.file_error, None);
    let settings = loaded.settings;
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.storage_file, "local_storage.json");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_are_overridden_by_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("feedback.toml");
    fs::write(
        &config_path,
        "data_dir = \"/srv/feedback\"\nstorage_file = \"records.json\"\nlog_filter = \"debug\"\n",
    )
    .expect("write config");

    let from_file = load_settings_with(&config_path, env_from(&[])).settings;
    assert_eq!(from_file.data_dir, Some(PathBuf::from("/srv/feedback")));
    assert_eq!(from_file.storage_file, "records.json");
    assert_eq!(from_file.log_filter, "debug");

    let with_env = load_settings_with(
        &config_path,
        env_from(&[
            ("FEEDBACK_DATA_DIR", "/tmp/a"),
            ("APP__DATA_DIR", "/tmp/b"),
            ("FEEDBACK_LOG", "warn"),
        ]),
    )
    .settings;
    assert_eq!(with_env.data_dir, Some(PathBuf::from("/tmp/b")));
    assert_eq!(with_env.storage_file, "records.json");
    assert_eq!(with_env.log_filter, "warn");
}

#[test]
fn empty_environment_values_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_with(
        &dir.path().join("missing.toml"),
        env_from(&[("FEEDBACK_DATA_DIR", "  "), ("FEEDBACK_STORAGE_FILE", "")]),
    )
    .settings;
    assert_eq!(settings.data_dir, None);
    assert_eq!(settings.storage_file, "local_storage.json");
}

#[test]
fn malformed_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("feedback.toml");
    fs::write(&config_path, "this is = = not toml").expect("write config");

    let loaded = load_settings_with(&config_path, env_from(&[("FEEDBACK_LOG", "debug")]));
    assert!(loaded.file_error.is_some());
    assert_eq!(loaded.settings.data_dir, None);
    assert_eq!(loaded.settings.storage_file, "local_storage.json");
    assert_eq!(loaded.settings.log_filter, "debug");
}

#[test]
fn command_line_overrides_win() {
    let mut settings = Settings::default();
    settings.apply_overrides(
        Some(PathBuf::from("/data")),
        Some("other.json".to_string()),
        Some(String::new()),
    );
    assert_eq!(settings.data_dir, Some(PathBuf::from("/data")));
    assert_eq!(settings.storage_file, "other.json");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn paths_resolve_under_explicit_data_dir() {
    let settings = Settings {
        data_dir: Some(PathBuf::from("/var/lib/feedback")),
        storage_file: "  ".to_string(),
        ..Settings::default()
    };
    let paths = AppPaths::from_settings(&settings).expect("paths");
    assert_eq!(paths.data_root, PathBuf::from("/var/lib/feedback"));
    assert_eq!(
        paths.storage_path,
        PathBuf::from("/var/lib/feedback").join("local_storage.json")
    );
}
