//! Human-readable rendering of a config
//!
//! [`Config`]'s `Display` gives a one-line summary; [`Config::format_table`]
//! gives an aligned table of every property:
//!
//! ```text
//! Configuration properties:
//! --------------------------------------------
//! host             = 'localhost'    str
//! port             = 8080           int
//! --------------------------------------------
//! ```

use crate::store::Config;
use serde_json::Value;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 44;
const MAX_STRING_LENGTH: usize = 50;
const MAX_COLLECTION_ITEMS: usize = 5;

fn quoted(text: &str) -> String {
    format!("'{text}'")
}

/// Table cell for a value
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LENGTH => {
            let head: String = s.chars().take(MAX_STRING_LENGTH - 3).collect();
            quoted(&format!("{head}..."))
        }
        Value::String(s) => quoted(s),
        Value::Array(items) => {
            let shown: Vec<String> = items
                .iter()
                .take(MAX_COLLECTION_ITEMS)
                .map(format_item)
                .collect();
            if items.len() > MAX_COLLECTION_ITEMS {
                format!("[{}, ...]", shown.join(", "))
            } else {
                format!("[{}]", shown.join(", "))
            }
        }
        Value::Object(map) if map.len() > MAX_COLLECTION_ITEMS => "{...}".to_string(),
        other => format_item(other),
    }
}

/// Value nested in a collection
fn format_item(value: &Value) -> String {
    match value {
        Value::String(s) => quoted(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_item).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quoted(k), format_item(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        scalar => scalar.to_string(),
    }
}

impl Config {
    /// Aligned table of all properties, sorted by name
    #[must_use]
    pub fn format_table(&self) -> String {
        if self.is_empty() {
            return "No properties defined\n".to_string();
        }

        let mut names: Vec<&str> = self.keys().collect();
        names.sort_unstable();

        let rule = "-".repeat(RULE_WIDTH);
        let mut out = String::new();
        let _ = writeln!(out, "Configuration properties:");
        let _ = writeln!(out, "{rule}");
        for name in names {
            let (Some(value), Ok(info)) = (self.get(name), self.property_info(name)) else {
                continue;
            };
            let _ = writeln!(
                out,
                "{name:<16} = {:<14} {}",
                format_value(value),
                info.declared_type()
            );
        }
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Print [`Config::format_table`] to stdout
    pub fn show(&self) {
        print!("{}", self.format_table());
    }
}

impl fmt::Display for Config {
    /// `Config(host="localhost", port=8080)`, names sorted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<(&str, &Value)> = self.iter().collect();
        pairs.sort_unstable_by_key(|(name, _)| *name);

        f.write_str("Config(")?;
        for (i, (name, value)) in pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}
