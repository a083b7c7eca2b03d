//! Value-tree documents
//!
//! A config is exchanged in one of two shapes:
//!
//! - **values-only**: a flat mapping of property name to current value. It
//!   carries no types, so loading it needs a [`Schema`].
//! - **full-metadata**: self-describing, with the crate version and one entry
//!   per property:
//!
//! ```json
//! {
//!   "_tyconf_version": "1.2.1",
//!   "properties": {
//!     "port": {"type": "int", "value": 3000, "default": 8080, "readonly": false, "has_validator": true}
//!   }
//! }
//! ```
//!
//! Validators cannot be written down. `has_validator` only records that one
//! existed; loading such a document yields properties without validators.

use crate::error::{Error, Result};
use crate::property::{PropertyDef, Schema};
use crate::store::{Config, SaveOptions};
use crate::types::TypeRegistry;
use log::{debug, warn};
use serde_json::{Map, Value, json};

/// Top-level key holding the producing crate version
pub const VERSION_KEY: &str = "_tyconf_version";

/// Top-level key holding the property table
pub const PROPERTIES_KEY: &str = "properties";

/// Version written into full-metadata documents
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether `doc` is a full-metadata document
#[must_use]
pub fn is_full_metadata(doc: &Value) -> bool {
    doc.get(VERSION_KEY).is_some() && doc.get(PROPERTIES_KEY).is_some()
}

/// Build the document for `config`
pub(crate) fn encode(config: &Config, options: &SaveOptions) -> Value {
    if options.values_only {
        return Value::Object(
            config
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        );
    }

    let mut properties = Map::new();
    for descriptor in config.descriptors() {
        let value = config.get(descriptor.name()).cloned().unwrap_or(Value::Null);
        let mut entry = json!({
            "type": descriptor.declared_type().to_string(),
            "value": value,
            "default": descriptor.default_value(),
            "readonly": descriptor.is_readonly(),
        });
        if descriptor.has_validator() {
            entry["has_validator"] = Value::Bool(true);
        }
        properties.insert(descriptor.name().to_string(), entry);
    }

    let mut doc = Map::new();
    if options.include_version {
        doc.insert(VERSION_KEY.to_string(), Value::String(VERSION.to_string()));
    }
    doc.insert(PROPERTIES_KEY.to_string(), Value::Object(properties));
    Value::Object(doc)
}

fn top_level(doc: &Value) -> Result<&Map<String, Value>> {
    doc.as_object().ok_or_else(|| Error::Parse {
        format: "document",
        reason: "expected a mapping at the top level".into(),
    })
}

/// Build a config from either document shape
pub(crate) fn decode(doc: &Value, schema: Option<&Schema>, registry: &TypeRegistry) -> Result<Config> {
    if is_full_metadata(doc) {
        return decode_full(doc, registry);
    }
    let schema = schema.ok_or(Error::SchemaRequired)?;
    decode_values(top_level(doc)?, schema)
}

fn decode_full(doc: &Value, registry: &TypeRegistry) -> Result<Config> {
    if let Some(version) = doc.get(VERSION_KEY).and_then(Value::as_str) {
        if version != VERSION {
            debug!("Loading document written by version {version}");
        }
    }
    let properties = doc
        .get(PROPERTIES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Parse {
            format: "document",
            reason: format!("'{PROPERTIES_KEY}' must be a mapping"),
        })?;

    let mut config = Config::default();
    for (name, entry) in properties {
        let invalid = |reason: String| Error::InvalidDefinition {
            name: name.clone(),
            reason,
        };
        let entry = entry
            .as_object()
            .ok_or_else(|| invalid("property entry must be a mapping".into()))?;
        let type_name = entry
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing 'type'".into()))?;
        let default_value = entry
            .get("default")
            .cloned()
            .ok_or_else(|| invalid("missing 'default'".into()))?;
        let readonly = match entry.get("readonly") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => return Err(invalid(format!("'readonly' must be a boolean, got {other}"))),
        };

        let mut def = PropertyDef::new(registry.resolve(type_name)?, default_value);
        if readonly {
            def = def.readonly();
        }
        config.add(name, def)?;

        if entry.get("has_validator").and_then(Value::as_bool) == Some(true) {
            warn!("Property '{name}' had a validator; validators are not restored from documents");
        }
        if let Some(value) = entry.get("value") {
            config.seed(name, value.clone())?;
        }
    }
    Ok(config)
}

fn decode_values(values: &Map<String, Value>, schema: &Schema) -> Result<Config> {
    let mut config = Config::new(schema.clone())?;
    for (name, value) in values {
        if config.contains(name) {
            config.seed(name, value.clone())?;
        } else {
            warn!("Ignoring '{name}': not in schema");
        }
    }
    Ok(config)
}

/// Current values carried by either document shape
pub(crate) fn values_of(doc: &Value) -> Result<Map<String, Value>> {
    if !is_full_metadata(doc) {
        return Ok(top_level(doc)?.clone());
    }
    let properties = doc
        .get(PROPERTIES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Parse {
            format: "document",
            reason: format!("'{PROPERTIES_KEY}' must be a mapping"),
        })?;
    properties
        .iter()
        .map(|(name, entry)| {
            entry
                .get("value")
                .cloned()
                .map(|value| (name.clone(), value))
                .ok_or_else(|| Error::InvalidDefinition {
                    name: name.clone(),
                    reason: "missing 'value'".into(),
                })
        })
        .collect()
}
