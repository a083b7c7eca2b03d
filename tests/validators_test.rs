//! Validator Library Integration Tests
//!
//! Built-in validators attached to config properties, including composition
//! and the errors they surface through `Config::set`.

mod common;

use common::TestFixture;
use serde_json::json;
use tyconf::validators::{
    all_of, any_of, between, divisible_by, file_extension, has_keys, is_absolute_path,
    is_directory, keys_in, max_items, no_whitespace, not_in, positive, unique_items,
    url_scheme, valid_url,
};
use tyconf::{Config, ErrorKind, TypeSpec, Validator};

#[test]
fn test_service_config_with_validators() {
    let mut config = Config::builder()
        .property(
            "endpoint",
            (
                TypeSpec::Str,
                "https://api.example.com",
                all_of([valid_url(), url_scheme(["https"])]),
            ),
        )
        .property("workers", (TypeSpec::Int, 4, all_of([positive(), divisible_by(2)])))
        .property("load_factor", (TypeSpec::Float, 0.5, between(0.0, 1.0, false)))
        .property(
            "roles",
            (
                TypeSpec::list_of(TypeSpec::Str),
                json!(["reader"]),
                all_of([unique_items(), max_items(3)]),
            ),
        )
        .property(
            "limits",
            (
                TypeSpec::dict_of(TypeSpec::Str, TypeSpec::Int),
                json!({"cpu": 1}),
                all_of([has_keys(["cpu"]), keys_in(["cpu", "mem"])]),
            ),
        )
        .build()
        .unwrap();

    config.set("endpoint", "https://other.example.com/v2").unwrap();
    let err = config.set("endpoint", "http://other.example.com").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Property 'endpoint': URL scheme must be one of ["https"], got 'http'"#
    );
    let err = config.set("endpoint", "not a url").unwrap_err();
    assert!(err.to_string().contains("valid URL"));

    config.set("workers", 8).unwrap();
    assert!(config.set("workers", 3).is_err());
    assert!(config.set("workers", -2).is_err());

    assert!(config.set("load_factor", 1.0).is_err());
    config.set("load_factor", 0.99).unwrap();

    let err = config.set("roles", json!(["a", "a"])).unwrap_err();
    assert_eq!(err.to_string(), "Property 'roles': all items must be unique");
    assert!(config.set("roles", json!(["a", "b", "c", "d"])).is_err());

    config.set("limits", json!({"cpu": 2, "mem": 256})).unwrap();
    let err = config.set("limits", json!({"mem": 256})).unwrap_err();
    assert_eq!(err.to_string(), "Property 'limits': must contain keys: ['cpu']");
    let err = config.set("limits", json!({"cpu": 1, "trace": 1})).unwrap_err();
    assert_eq!(err.to_string(), "Property 'limits': invalid keys: ['trace']");
}

#[test]
fn test_path_validators_on_properties() {
    let fixture = TestFixture::new();
    let dir = fixture.source("");
    let mut config = Config::builder()
        .property(
            "data_dir",
            (TypeSpec::Str, dir, all_of([is_absolute_path(), is_directory()])),
        )
        .property(
            "config_file",
            (TypeSpec::Str, "app.json", file_extension(["json", ".toml"])),
        )
        .build()
        .unwrap();

    let missing = fixture.source("missing");
    let err = config.set("data_dir", missing.as_str()).unwrap_err();
    assert_eq!(err.to_string(), format!("Property 'data_dir': not a directory: {missing}"));
    assert!(config.set("data_dir", "relative/dir").is_err());

    config.set("config_file", "app.toml").unwrap();
    let err = config.set("config_file", "app.yaml").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Property 'config_file': file extension must be one of [".json", ".toml"]"#
    );
}

#[test]
fn test_wrong_value_kind_is_a_validator_failure() {
    // a string validator on a list property cannot inspect the value
    let err = Config::builder()
        .property("names", (TypeSpec::List(None), json!(["a"]), no_whitespace()))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_any_of_and_not_in() {
    let mut config = Config::builder()
        .property(
            "mode",
            (
                TypeSpec::one_of([TypeSpec::Int, TypeSpec::Str]),
                "auto",
                any_of([
                    Validator::predicate(|v| v.is_i64()),
                    not_in(["off", "disabled"]),
                ]),
            ),
        )
        .build()
        .unwrap();

    config.set("mode", 3).unwrap();
    config.set("mode", "manual").unwrap();
    let err = config.set("mode", "off").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_default_must_pass_validator() {
    let err = Config::builder()
        .property("workers", (TypeSpec::Int, 0, positive()))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Property 'workers': must be positive (> 0)");
}
