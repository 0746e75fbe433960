//! Integration-level unit tests for the SettingsEngine public API.
//!
//! Exercises default loading, dot-path edits, validation and reset through
//! the trait interface, against a settings file in a temp directory.

use tabdeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use tabdeck::types::errors::SettingsError;
use tabdeck::types::settings::PopupSettings;
use tempfile::TempDir;

/// Helper: engine backed by `settings.json` inside `dir`.
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, PopupSettings::default());
    assert_eq!(settings.search.threshold, 0.4);
    assert!(settings.behavior.close_popup_on_window_switch);
    assert_eq!(settings.logging.filter, "info");
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("search.threshold", serde_json::json!(0.25))
            .unwrap();
        engine
            .set_value("behavior.close_popup_on_window_switch", serde_json::json!(false))
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();
    assert_eq!(loaded.search.threshold, 0.25);
    assert!(!loaded.behavior.close_popup_on_window_switch);
}

#[test]
fn test_set_value_unknown_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let err = engine
        .set_value("search.nonexistent", serde_json::json!(true))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));

    let err = engine
        .set_value("nope.threshold", serde_json::json!(1))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));

    assert!(matches!(
        engine.set_value("", serde_json::json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_set_value_wrong_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let err = engine
        .set_value("search.match_url", serde_json::json!("yes"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert!(engine.get_settings().search.match_url, "failed edit must not apply");
}

#[test]
fn test_threshold_out_of_range_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let err = engine
        .set_value("search.threshold", serde_json::json!(1.5))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().search.threshold, 0.4);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(engine.load(), Err(SettingsError::Serialization(_))));
}

#[test]
fn test_partial_file_fills_missing_sections_with_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"logging":{"filter":"tabdeck=debug"}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();
    assert_eq!(settings.logging.filter, "tabdeck=debug");
    assert_eq!(settings.search, PopupSettings::default().search);
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine
        .set_value("logging.filter", serde_json::json!("warn"))
        .unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &PopupSettings::default());

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), PopupSettings::default());
}
