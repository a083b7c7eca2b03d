//! Environment variable loading
//!
//! Property `name` is read from `{prefix}{NAME}` where `NAME` is the property
//! name uppercased. Variable names match case-insensitively. Only properties
//! with a variable present are returned; defaults are never filled in here.
//!
//! Raw strings are converted to the declared type:
//!
//! | Declared type | Conversion |
//! |---------------|------------|
//! | `bool` | `true`, `1`, `yes`, `on` (any case) are true, anything else false |
//! | any other | `none`, `null` or empty become null |
//! | `int`, `float` | parsed from the trimmed text |
//! | `str` | kept as-is |
//! | `list`, `dict` | parsed as JSON of the matching kind |
//! | `Optional[T]` | as `T` |
//! | `Union[..]` | first alternative that converts |

use crate::error::{Error, Result};
use crate::property::Schema;
use crate::types::TypeSpec;
use log::debug;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// Source of environment variables
pub trait EnvSource {
    /// All variables as `(name, value)` pairs
    fn vars(&self) -> Vec<(String, String)>;
}

/// The process environment
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

impl<S: std::hash::BuildHasher> EnvSource for HashMap<String, String, S> {
    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl EnvSource for [(&str, &str)] {
    fn vars(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }
}

/// Reads typed property values from an [`EnvSource`]
pub struct EnvLoader<'a, S: EnvSource + ?Sized = ProcessEnv> {
    source: &'a S,
}

impl<'a, S: EnvSource + ?Sized> EnvLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Environment variable name for a property
    #[must_use]
    pub fn var_name(prefix: &str, name: &str) -> String {
        format!("{prefix}{}", name.to_uppercase())
    }

    /// Converted values of the schema properties that have a variable set
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] for the first variable that does not
    /// convert to its property's type.
    pub fn load(&self, prefix: &str, schema: &Schema) -> Result<Map<String, Value>> {
        let vars = self.source.vars();
        let mut out = Map::new();
        for (name, def) in schema.iter() {
            let wanted = Self::var_name(prefix, name).to_uppercase();
            let Some((key, raw)) = vars.iter().find(|(k, _)| k.to_uppercase() == wanted) else {
                continue;
            };
            debug!("Property '{name}' read from environment variable {key}");
            out.insert(name.to_string(), convert(name, raw, def.declared_type())?);
        }
        Ok(out)
    }
}

const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];
const NULL_TOKENS: [&str; 3] = ["none", "null", ""];

/// Convert one raw environment string to `target`
///
/// # Errors
///
/// Returns [`Error::Conversion`] naming the property, the raw text and the
/// target type.
pub fn convert(name: &str, raw: &str, target: &TypeSpec) -> Result<Value> {
    if *target == TypeSpec::Bool {
        let lower = raw.to_lowercase();
        return Ok(Value::Bool(TRUTHY.contains(&lower.as_str())));
    }
    if NULL_TOKENS.contains(&raw.to_lowercase().as_str()) {
        return Ok(Value::Null);
    }
    convert_non_null(raw, target).map_err(|reason| Error::Conversion {
        key: name.to_string(),
        raw: raw.to_string(),
        target: target.to_string(),
        reason,
    })
}

fn convert_non_null(raw: &str, target: &TypeSpec) -> std::result::Result<Value, String> {
    match target {
        TypeSpec::Str => Ok(Value::String(raw.to_string())),
        TypeSpec::Bool => Ok(Value::Bool(TRUTHY.contains(&raw.to_lowercase().as_str()))),
        TypeSpec::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| e.to_string()),
        TypeSpec::Float => {
            let n = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
            Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| "non-finite numbers are not supported".to_string())
        }
        TypeSpec::List(_) => match serde_json::from_str::<Value>(raw).map_err(|e| e.to_string())? {
            list @ Value::Array(_) => Ok(list),
            _ => Err("expected a JSON array".into()),
        },
        TypeSpec::Dict(_) => match serde_json::from_str::<Value>(raw).map_err(|e| e.to_string())? {
            map @ Value::Object(_) => Ok(map),
            _ => Err("expected a JSON object".into()),
        },
        TypeSpec::Null => Err("only none/null or an empty value convert to None".into()),
        TypeSpec::Nullable(inner) => convert_non_null(raw, inner),
        TypeSpec::OneOf(_) => {
            let mut reasons = Vec::new();
            for alt in target.alternatives() {
                match convert_non_null(raw, alt) {
                    Ok(value) => return Ok(value),
                    Err(reason) => reasons.push(format!("{alt}: {reason}")),
                }
            }
            Err(format!("no alternative matched ({})", reasons.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .with("port", (TypeSpec::Int, 8080))
            .with("debug", (TypeSpec::Bool, false))
    }

    #[test]
    fn test_only_present_variables_are_returned() {
        let env = HashMap::from([("APP_PORT".to_string(), "3000".to_string())]);
        let loaded = EnvLoader::new(&env).load("APP_", &schema()).unwrap();
        assert_eq!(Value::Object(loaded), json!({"port": 3000}));
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let env: &[(&str, &str)] = &[("app_debug", "Yes"), ("App_Port", " 42 ")];
        let loaded = EnvLoader::new(env).load("APP_", &schema()).unwrap();
        assert_eq!(Value::Object(loaded), json!({"port": 42, "debug": true}));
    }

    #[test]
    fn test_bool_tokens() {
        for raw in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(convert("b", raw, &TypeSpec::Bool).unwrap(), json!(true));
        }
        for raw in ["false", "0", "no", "", "none", "anything"] {
            assert_eq!(convert("b", raw, &TypeSpec::Bool).unwrap(), json!(false));
        }
    }

    #[test]
    fn test_null_tokens_for_non_bool() {
        for raw in ["none", "NULL", ""] {
            assert_eq!(convert("x", raw, &TypeSpec::Int).unwrap(), Value::Null);
            assert_eq!(convert("x", raw, &TypeSpec::Str).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(convert("n", "-7", &TypeSpec::Int).unwrap(), json!(-7));
        assert_eq!(convert("r", "0.25", &TypeSpec::Float).unwrap(), json!(0.25));
        assert!(convert("r", "3", &TypeSpec::Float).unwrap().is_f64());

        let err = convert("port", "abc", &TypeSpec::Int).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert!(
            err.to_string()
                .starts_with("Cannot convert environment variable 'port' value 'abc' to int:")
        );
        assert!(convert("r", "inf", &TypeSpec::Float).is_err());
    }

    #[test]
    fn test_containers_are_json() {
        assert_eq!(
            convert("tags", r#"["a","b"]"#, &TypeSpec::list_of(TypeSpec::Str)).unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(
            convert("limits", r#"{"cpu": 2}"#, &TypeSpec::Dict(None)).unwrap(),
            json!({"cpu": 2})
        );
        assert!(convert("tags", "a,b", &TypeSpec::List(None)).is_err());
        assert!(convert("tags", r#"{"a":1}"#, &TypeSpec::List(None)).is_err());
    }

    #[test]
    fn test_optional_and_union() {
        let timeout = TypeSpec::optional(TypeSpec::Int);
        assert_eq!(convert("t", "30", &timeout).unwrap(), json!(30));
        assert_eq!(convert("t", "none", &timeout).unwrap(), Value::Null);

        let id = TypeSpec::one_of([TypeSpec::Int, TypeSpec::Str]);
        assert_eq!(convert("id", "12", &id).unwrap(), json!(12));
        assert_eq!(convert("id", "ab", &id).unwrap(), json!("ab"));

        let err = convert("r", "x", &TypeSpec::one_of([TypeSpec::Int, TypeSpec::Float])).unwrap_err();
        assert!(err.to_string().contains("Union[int, float]"));
    }
}
