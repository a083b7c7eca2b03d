//! JSON format

use super::Format;
use crate::error::{Error, Result};
use crate::store::SaveOptions;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// JSON documents, UTF-8, non-ASCII written as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn encode(&self, doc: &Value, options: &SaveOptions) -> Result<String> {
        let Some(width) = options.indent else {
            return serde_json::to_string(doc).map_err(Error::from);
        };

        let indent = b" ".repeat(width);
        let mut out = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
        doc.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(|e| Error::Serialize(e.to_string()))
    }

    fn decode(&self, text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(Error::from)
    }
}
