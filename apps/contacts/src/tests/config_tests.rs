use super::*;

use std::collections::HashMap;

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn keeps_memory_and_full_urls() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite://./contacts.db?mode=rwc"),
        "sqlite://./contacts.db?mode=rwc"
    );
}

#[test]
fn single_colon_sqlite_prefix_gains_slashes() {
    assert_eq!(
        normalize_database_url("sqlite:data\\contacts.db"),
        "sqlite://data/contacts.db"
    );
}

#[test]
fn blank_url_falls_back_to_default() {
    assert_eq!(
        normalize_database_url("   "),
        Settings::default().database_url
    );
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
        database_url = "sqlite://./custom.db"
        log_filter = "debug"
        "#,
    );
    assert_eq!(settings.database_url, "sqlite://./custom.db");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "database_url = [not toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("CONTACTS_DATABASE_URL", "sqlite://./short.db"),
        ("APP__DATABASE_URL", "sqlite://./app.db"),
        ("CONTACTS_LOG", "warn"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.database_url, "sqlite://./app.db");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn load_settings_reads_explicit_config_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.toml");
    fs::write(&path, "log_filter = \"contacts=trace\"\n").expect("write config");

    let settings = load_settings(Some(path.as_path()));
    // Environment overrides win over the file.
    if std::env::var("CONTACTS_LOG").is_err() && std::env::var("APP__LOG_FILTER").is_err() {
        assert_eq!(settings.log_filter, "contacts=trace");
    }
}
