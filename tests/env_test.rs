//! Environment Variable Integration Tests
//!
//! - Building configs from prefixed variables
//! - Applying overrides to an existing config
//! - Conversion failures and read-only conflicts

mod common;

use common::{app_config, app_schema, app_schema_with_optional};
use serde_json::{Value, json};
use std::collections::HashMap;
use tyconf::{Config, EnvLoader, Error, ErrorKind, ProcessEnv, TypeSpec};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_from_env_scenario() {
    let vars = env(&[
        ("APP_HOST", "example.com"),
        ("APP_PORT", "3000"),
        ("APP_DEBUG", "true"),
        ("OTHER_PORT", "1"),
    ]);
    let config = Config::from_env("APP_", app_schema(), &vars).unwrap();

    assert_eq!(config.get("host"), Some(&json!("example.com")));
    assert_eq!(config.get("port"), Some(&json!(3000)));
    assert_eq!(config.get("debug"), Some(&json!(true)));
    // no variable, default kept
    assert_eq!(config.get("log_level"), Some(&json!("INFO")));
}

#[test]
fn test_containers_and_floats_from_env() {
    let vars = env(&[
        ("APP_TAGS", r#"["api", "admin"]"#),
        ("APP_LIMITS", r#"{"cpu": 4, "mem": 512}"#),
        ("APP_RATIO", "0.25"),
    ]);
    let config = Config::from_env("APP_", app_schema(), &vars).unwrap();
    assert_eq!(config.get_as::<Vec<String>>("tags").unwrap(), ["api", "admin"]);
    assert_eq!(config.get("limits"), Some(&json!({"cpu": 4, "mem": 512})));
    assert_eq!(config.get_as::<f64>("ratio").unwrap(), 0.25);
}

#[test]
fn test_optional_from_env() {
    let schema = app_schema_with_optional();

    let config = Config::from_env("APP_", schema.clone(), &env(&[("APP_TIMEOUT", "30")])).unwrap();
    assert_eq!(config.get("timeout"), Some(&json!(30)));

    let config = Config::from_env("APP_", schema, &env(&[("APP_TIMEOUT", "none")])).unwrap();
    assert_eq!(config.get("timeout"), Some(&Value::Null));
}

#[test]
fn test_conversion_failure() {
    let err = Config::from_env("APP_", app_schema(), &env(&[("APP_PORT", "high")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(matches!(
        err,
        Error::Conversion { ref key, ref raw, .. } if key == "port" && raw == "high"
    ));
}

#[test]
fn test_converted_values_still_validated() {
    let err = Config::from_env("APP_", app_schema(), &env(&[("APP_PORT", "80")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = Config::from_env("APP_", app_schema(), &env(&[("APP_TAGS", "[]")])).unwrap_err();
    assert_eq!(err.to_string(), "Property 'tags': must not be empty");
}

#[test]
fn test_null_for_non_nullable_is_type_error() {
    let err = Config::from_env("APP_", app_schema(), &env(&[("APP_HOST", "null")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_load_env_overrides_existing() {
    let mut config = app_config();
    config.set("host", "before.example").unwrap();

    let vars: &[(&str, &str)] = &[("svc_host", "after.example"), ("SVC_LOG_LEVEL", "DEBUG")];
    config.load_env("SVC_", vars).unwrap();

    assert_eq!(config.get("host"), Some(&json!("after.example")));
    assert_eq!(config.get("log_level"), Some(&json!("DEBUG")));
}

#[test]
fn test_load_env_readonly() {
    let mut config = app_config();
    config
        .load_env("APP_", &env(&[("APP_VERSION", "1.0.0")]))
        .unwrap();

    let err = config
        .load_env("APP_", &env(&[("APP_VERSION", "2.0.0")]))
        .unwrap_err();
    assert!(matches!(err, Error::ReadOnly(_)));
}

#[test]
fn test_load_env_on_frozen_config() {
    let mut config = app_config();
    config.freeze();
    let err = config
        .load_env("APP_", &env(&[("APP_PORT", "3000")]))
        .unwrap_err();
    assert!(err.is_state_violation());

    // nothing to apply, nothing refused
    config.load_env("APP_", &env(&[])).unwrap();
}

#[test]
fn test_union_tries_alternatives_in_order() {
    let schema = tyconf::Schema::new().with(
        "id",
        (TypeSpec::one_of([TypeSpec::Int, TypeSpec::Str]), 0),
    );
    let config = Config::from_env("APP_", schema.clone(), &env(&[("APP_ID", "42")])).unwrap();
    assert_eq!(config.get("id"), Some(&json!(42)));

    let config = Config::from_env("APP_", schema, &env(&[("APP_ID", "user-7")])).unwrap();
    assert_eq!(config.get("id"), Some(&json!("user-7")));
}

#[test]
fn test_var_names() {
    assert_eq!(EnvLoader::<ProcessEnv>::var_name("APP_", "log_level"), "APP_LOG_LEVEL");
    assert_eq!(EnvLoader::<ProcessEnv>::var_name("", "port"), "PORT");
}

#[test]
fn test_process_env_source() {
    // variable name unique to this test
    let loaded = EnvLoader::new(&ProcessEnv)
        .load("TYCONF_ENV_TEST_UNSET_", &app_schema())
        .unwrap();
    assert!(loaded.is_empty());
}
