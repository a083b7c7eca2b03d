//! TOML Integration Tests
//!
//! - Full-metadata and values-only round trips through TOML files
//! - Null rejection (TOML has no null)
//! - Merging TOML text into an existing config

#![cfg(feature = "toml-write")]

mod common;

use common::{TestFixture, app_config, app_schema, app_schema_with_optional};
use serde_json::json;
use tyconf::{Config, Error, ErrorKind, MergeOptions, SaveOptions};

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_toml_full_metadata_round_trip() {
    let fixture = TestFixture::new();
    let path = fixture.path("config.toml");

    let mut original = app_config();
    original.set("host", "example.com").unwrap();
    original.set("limits", json!({"cpu": 4, "mem": 512})).unwrap();
    original.to_toml(Some(&path), &SaveOptions::default()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("_tyconf_version"));
    assert!(content.contains("[properties.port]"));

    let loaded = Config::from_toml(&fixture.source("config.toml"), None).unwrap();
    for (name, value) in &original {
        assert_eq!(loaded.get(name), Some(value), "value of {name}");
    }
    assert!(loaded.property_info("VERSION").unwrap().is_readonly());
    assert_eq!(
        loaded.property_info("limits").unwrap().declared_type().to_string(),
        "dict[str, int]"
    );
}

#[test]
fn test_toml_values_only_round_trip() {
    let mut original = app_config();
    original.set("ratio", 0.125).unwrap();
    original.set("tags", json!(["a", "b", "c"])).unwrap();

    let text = original
        .to_toml(None, &SaveOptions::default().values_only())
        .unwrap()
        .unwrap();
    assert!(text.contains("port = 8080"));
    assert!(!text.contains("_tyconf_version"));

    let loaded = Config::from_toml(&text, Some(&app_schema())).unwrap();
    assert_eq!(loaded.get("ratio"), Some(&json!(0.125)));
    assert_eq!(loaded.get("tags"), Some(&json!(["a", "b", "c"])));
}

#[test]
fn test_toml_float_stays_float() {
    let text = app_config()
        .to_toml(None, &SaveOptions::default().values_only())
        .unwrap()
        .unwrap();
    let loaded = Config::from_toml(&text, Some(&app_schema())).unwrap();
    // 0.5 must not come back as an int and trip the strict float check
    assert_eq!(loaded.get_as::<f64>("ratio").unwrap(), 0.5);
}

// =============================================================================
// Null Handling
// =============================================================================

#[test]
fn test_toml_rejects_null_values() {
    let config = Config::new(app_schema_with_optional()).unwrap();

    let err = config
        .to_toml(None, &SaveOptions::default().values_only())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("'timeout'"));

    // full metadata carries the null default too
    let err = config.to_toml(None, &SaveOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Serialize(_)));
}

#[test]
fn test_toml_rejection_writes_nothing() {
    let fixture = TestFixture::new();
    let path = fixture.path("optional.toml");
    let config = Config::new(app_schema_with_optional()).unwrap();

    assert!(config.to_toml(Some(&path), &SaveOptions::default()).is_err());
    assert!(!path.exists());
}

#[test]
fn test_toml_after_setting_optional() {
    let mut config = Config::new(app_schema_with_optional()).unwrap();
    config.set("timeout", 30).unwrap();
    let text = config
        .to_toml(None, &SaveOptions::default().values_only())
        .unwrap()
        .unwrap();
    assert!(text.contains("timeout = 30"));
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn test_load_toml_text() {
    let mut config = app_config();
    config
        .load_toml(
            "host = \"toml.example\"\nport = 4000\n\n[limits]\ncpu = 8\n",
            MergeOptions::default(),
        )
        .unwrap();
    assert_eq!(config.get("host"), Some(&json!("toml.example")));
    assert_eq!(config.get("port"), Some(&json!(4000)));
    assert_eq!(config.get("limits"), Some(&json!({"cpu": 8})));
}

#[test]
fn test_load_toml_file_and_errors() {
    let fixture = TestFixture::new();
    std::fs::write(fixture.path("override.toml"), "log_level = \"ERROR\"\n").unwrap();

    let mut config = app_config();
    config
        .load_toml(&fixture.source("override.toml"), MergeOptions::default())
        .unwrap();
    assert_eq!(config.get("log_level"), Some(&json!("ERROR")));

    let err = config
        .load_toml(&fixture.source("absent.toml"), MergeOptions::default())
        .unwrap_err();
    assert!(err.is_not_found());

    let err = config
        .load_toml("port = \"x\"\n", MergeOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = config
        .load_toml("port = = 1\n", MergeOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Parse { format: "TOML", .. }));
}
