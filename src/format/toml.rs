//! TOML format
//!
//! Parsing is always available. Writing needs the `toml-write` feature
//! (enabled by default).

use super::Format;
use crate::error::{Error, Result};
use crate::store::SaveOptions;
use serde_json::Value;

/// TOML documents
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl Format for TomlFormat {
    fn name(&self) -> &'static str {
        "TOML"
    }

    fn extension(&self) -> &str {
        "toml"
    }

    #[cfg(feature = "toml-write")]
    fn encode(&self, doc: &Value, _options: &SaveOptions) -> Result<String> {
        if let Some(path) = find_null(doc, String::new()) {
            return Err(Error::Serialize(format!(
                "TOML cannot represent null values (found at '{path}')"
            )));
        }
        ::toml::to_string(doc).map_err(|e| Error::Serialize(e.to_string()))
    }

    #[cfg(not(feature = "toml-write"))]
    fn encode(&self, _doc: &Value, _options: &SaveOptions) -> Result<String> {
        Err(Error::Unsupported(
            "TOML writing requires the 'toml-write' feature. \
             Enable it with: tyconf = { version = \"1\", features = [\"toml-write\"] }"
                .into(),
        ))
    }

    fn decode(&self, text: &str) -> Result<Value> {
        ::toml::from_str(text).map_err(|e| Error::Parse {
            format: "TOML",
            reason: e.to_string(),
        })
    }
}

/// Dotted path of the first null in `value`
#[cfg(feature = "toml-write")]
fn find_null(value: &Value, path: String) -> Option<String> {
    let join = |key: &str| {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}.{key}")
        }
    };
    match value {
        Value::Null => Some(path.clone()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_null(item, join(&i.to_string()))),
        Value::Object(map) => map.iter().find_map(|(k, v)| find_null(v, join(k))),
        _ => None,
    }
}
