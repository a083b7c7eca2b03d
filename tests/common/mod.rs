//! Common test utilities for tyconf integration tests
//!
//! Provides a shared application schema and a temp-dir fixture.

#![allow(dead_code)]

use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tyconf::validators::{non_empty, one_of, range};
use tyconf::{Config, Schema, TypeSpec};

// =============================================================================
// Test Schema
// =============================================================================

/// Schema of a small web application covering every kind of property
pub fn app_schema() -> Schema {
    Schema::new()
        .with("VERSION", (TypeSpec::Str, "1.0.0", true))
        .with("host", (TypeSpec::Str, "localhost"))
        .with("port", (TypeSpec::Int, 8080, range(1024, 65535)))
        .with("debug", (TypeSpec::Bool, false))
        .with("ratio", (TypeSpec::Float, 0.5))
        .with(
            "log_level",
            (TypeSpec::Str, "INFO", one_of(["DEBUG", "INFO", "WARNING", "ERROR"])),
        )
        .with(
            "tags",
            (TypeSpec::list_of(TypeSpec::Str), vec!["web"], non_empty()),
        )
        .with(
            "limits",
            (
                TypeSpec::dict_of(TypeSpec::Str, TypeSpec::Int),
                serde_json::json!({"cpu": 2}),
            ),
        )
}

/// Same as [`app_schema`] plus a nullable property (not representable in TOML)
pub fn app_schema_with_optional() -> Schema {
    app_schema().with("timeout", (TypeSpec::optional(TypeSpec::Int), Value::Null))
}

pub fn app_config() -> Config {
    Config::new(app_schema()).unwrap()
}

// =============================================================================
// Fixture
// =============================================================================

/// Config plus a temporary directory for file round trips
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub config: Config,
}

impl TestFixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            temp_dir: TempDir::new().unwrap(),
            config: app_config(),
        }
    }

    /// Path of a file inside the temp dir
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Same as [`TestFixture::path`], as a string source
    pub fn source(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }
}
