//! Collection and mapping validators

use super::{ValidationError, Validator, sized_len, unsupported};
use serde_json::Value;

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Value must not be empty (empty string, list, mapping, zero, false or null)
pub fn non_empty() -> Validator {
    Validator::new(|value| {
        if is_falsy(value) {
            Err(ValidationError::invalid("must not be empty"))
        } else {
            Ok(())
        }
    })
}

fn items<'a>(validator: &str, value: &'a Value) -> Result<&'a [Value], ValidationError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| unsupported(validator, "a list", value))
}

/// Every list item must be distinct
pub fn unique_items() -> Validator {
    Validator::new(|value| {
        let items = items("unique_items", value)?;
        let duplicated = items
            .iter()
            .enumerate()
            .any(|(i, item)| items[i + 1..].contains(item));
        if duplicated {
            Err(ValidationError::invalid("all items must be unique"))
        } else {
            Ok(())
        }
    })
}

/// List must contain every one of `required`
pub fn has_items<V: Into<Value>>(required: impl IntoIterator<Item = V>) -> Validator {
    let required: Vec<Value> = required.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        let items = items("has_items", value)?;
        let missing: Vec<Value> = required
            .iter()
            .filter(|r| !items.contains(r))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "must contain items: {}",
                Value::Array(missing)
            )))
        }
    })
}

/// At least `min_count` items (or entries)
pub fn min_items(min_count: usize) -> Validator {
    Validator::new(move |value| {
        if sized_len("min_items", value)? < min_count {
            Err(ValidationError::Invalid(format!(
                "must have at least {min_count} items"
            )))
        } else {
            Ok(())
        }
    })
}

/// At most `max_count` items (or entries)
pub fn max_items(max_count: usize) -> Validator {
    Validator::new(move |value| {
        if sized_len("max_items", value)? > max_count {
            Err(ValidationError::Invalid(format!(
                "must have at most {max_count} items"
            )))
        } else {
            Ok(())
        }
    })
}

fn quoted(keys: &[&str]) -> String {
    let quoted: Vec<String> = keys.iter().map(|k| format!("'{k}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Mapping must contain every key in `required`
pub fn has_keys<S: Into<String>>(required: impl IntoIterator<Item = S>) -> Validator {
    let required: Vec<String> = required.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        let map = value
            .as_object()
            .ok_or_else(|| unsupported("has_keys", "a mapping", value))?;
        let missing: Vec<&str> = required
            .iter()
            .filter(|k| !map.contains_key(k.as_str()))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "must contain keys: {}",
                quoted(&missing)
            )))
        }
    })
}

/// Mapping may only contain keys from `allowed`
pub fn keys_in<S: Into<String>>(allowed: impl IntoIterator<Item = S>) -> Validator {
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        let map = value
            .as_object()
            .ok_or_else(|| unsupported("keys_in", "a mapping", value))?;
        let invalid: Vec<&str> = map
            .keys()
            .filter(|k| !allowed.contains(k))
            .map(String::as_str)
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "invalid keys: {}",
                quoted(&invalid)
            )))
        }
    })
}
