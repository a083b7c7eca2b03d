//! Property declarations
//!
//! [`PropertyDef`] is what callers write when declaring a property;
//! [`PropertyDescriptor`] is the immutable record a [`Config`](crate::Config)
//! keeps for each declared property. A [`Schema`] is an ordered collection of
//! named definitions.

use crate::error::{Error, Result};
use crate::types::{TypeRegistry, TypeSpec};
use crate::validators::Validator;
use serde_json::Value;

// =============================================================================
// Property Definition
// =============================================================================

/// Declaration of one property: type, default, read-only flag and validator
///
/// # Example
///
/// ```
/// use tyconf::{PropertyDef, TypeSpec, validators::range};
///
/// let port = PropertyDef::new(TypeSpec::Int, 8080).validator(range(1024, 65535));
/// let version = PropertyDef::new(TypeSpec::Str, "1.0.0").readonly();
/// assert!(version.is_readonly());
/// assert!(!port.is_readonly());
/// ```
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub(crate) declared_type: TypeSpec,
    pub(crate) default_value: Value,
    pub(crate) readonly: bool,
    pub(crate) validator: Option<Validator>,
}

impl PropertyDef {
    /// Writable property without a validator
    pub fn new(declared_type: TypeSpec, default_value: impl Into<Value>) -> Self {
        Self {
            declared_type,
            default_value: default_value.into(),
            readonly: false,
            validator: None,
        }
    }

    /// Mark the property read-only
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Attach a validator
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    #[must_use]
    pub fn declared_type(&self) -> &TypeSpec {
        &self.declared_type
    }

    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }
}

impl<V: Into<Value>> From<(TypeSpec, V)> for PropertyDef {
    fn from((declared_type, default_value): (TypeSpec, V)) -> Self {
        PropertyDef::new(declared_type, default_value)
    }
}

impl<V: Into<Value>> From<(TypeSpec, V, bool)> for PropertyDef {
    fn from((declared_type, default_value, readonly): (TypeSpec, V, bool)) -> Self {
        let def = PropertyDef::new(declared_type, default_value);
        if readonly { def.readonly() } else { def }
    }
}

impl<V: Into<Value>> From<(TypeSpec, V, Validator)> for PropertyDef {
    fn from((declared_type, default_value, validator): (TypeSpec, V, Validator)) -> Self {
        PropertyDef::new(declared_type, default_value).validator(validator)
    }
}

// =============================================================================
// Property Descriptor
// =============================================================================

/// Metadata of a declared property
///
/// Created when a property is added to a config and never changed afterwards.
/// The default value was checked against the type and validator at that point.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    def: PropertyDef,
}

impl PropertyDescriptor {
    pub(crate) fn new(name: impl Into<String>, def: PropertyDef) -> Self {
        Self {
            name: name.into(),
            def,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn declared_type(&self) -> &TypeSpec {
        &self.def.declared_type
    }

    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.def.default_value
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.def.readonly
    }

    #[must_use]
    pub fn validator(&self) -> Option<&Validator> {
        self.def.validator.as_ref()
    }

    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.def.validator.is_some()
    }

    /// Definition this descriptor was built from
    #[must_use]
    pub fn definition(&self) -> &PropertyDef {
        &self.def
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered set of named property definitions
///
/// Inserting a name that is already present replaces its definition in place.
///
/// # Example
///
/// ```
/// use tyconf::{Schema, TypeSpec};
///
/// let schema = Schema::new()
///     .with("host", (TypeSpec::Str, "localhost"))
///     .with("port", (TypeSpec::Int, 8080))
///     .with("VERSION", (TypeSpec::Str, "1.0.0", true));
///
/// assert_eq!(schema.names().collect::<Vec<_>>(), ["host", "port", "VERSION"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, PropertyDef)>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition (builder style)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, def: impl Into<PropertyDef>) -> Self {
        self.insert(name, def);
        self
    }

    /// Add or replace a definition
    pub fn insert(&mut self, name: impl Into<String>, def: impl Into<PropertyDef>) {
        let name = name.into();
        let def = def.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = def,
            None => self.entries.push((name, def)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, def)| def)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDef)> {
        self.entries.iter().map(|(n, def)| (n.as_str(), def))
    }

    /// Read a schema from a value tree with the built-in type names
    ///
    /// See [`Schema::from_value_with_registry`].
    ///
    /// # Errors
    ///
    /// Same as [`Schema::from_value_with_registry`].
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with_registry(value, &TypeRegistry::new())
    }

    /// Read a schema from a value tree
    ///
    /// The tree is a mapping of property name to `[type-name, default]` or
    /// `[type-name, default, readonly]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] for entries of the wrong shape and
    /// [`Error::UnknownType`] for type names the registry cannot resolve.
    pub fn from_value_with_registry(value: &Value, registry: &TypeRegistry) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| Error::InvalidDefinition {
            name: String::new(),
            reason: "schema must be a mapping of property definitions".into(),
        })?;

        let mut schema = Schema::new();
        for (name, entry) in map {
            let invalid = |reason: &str| Error::InvalidDefinition {
                name: name.clone(),
                reason: reason.to_string(),
            };
            let parts = entry
                .as_array()
                .ok_or_else(|| invalid("definition must be a [type, default] or [type, default, readonly] list"))?;
            let (type_name, default_value, readonly) = match parts.as_slice() {
                [t, d] => (t, d, false),
                [t, d, Value::Bool(r)] => (t, d, *r),
                [_, _, _] => return Err(invalid("third element must be a boolean (readonly)")),
                _ => {
                    return Err(invalid(&format!(
                        "definition must have 2 or 3 elements, got {}",
                        parts.len()
                    )));
                }
            };
            let type_name = type_name
                .as_str()
                .ok_or_else(|| invalid("type must be given as a type name"))?;
            let declared_type = registry.resolve(type_name)?;
            schema.insert(
                name.clone(),
                (declared_type, default_value.clone(), readonly),
            );
        }
        Ok(schema)
    }
}

impl<S, D> FromIterator<(S, D)> for Schema
where
    S: Into<String>,
    D: Into<PropertyDef>,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, def) in iter {
            schema.insert(name, def);
        }
        schema
    }
}

impl IntoIterator for Schema {
    type Item = (String, PropertyDef);
    type IntoIter = std::vec::IntoIter<(String, PropertyDef)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a (String, PropertyDef);
    type IntoIter = std::slice::Iter<'a, (String, PropertyDef)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::validators::range;
    use serde_json::json;

    #[test]
    fn test_tuple_forms() {
        let def: PropertyDef = (TypeSpec::Str, "localhost").into();
        assert_eq!(def.default_value(), &json!("localhost"));
        assert!(!def.is_readonly());

        let def: PropertyDef = (TypeSpec::Str, "1.0.0", true).into();
        assert!(def.is_readonly());

        let def: PropertyDef = (TypeSpec::Int, 8080, range(1024, 65535)).into();
        assert!(def.validator.is_some());
        assert!(!def.is_readonly());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut schema = Schema::new()
            .with("a", (TypeSpec::Int, 1))
            .with("b", (TypeSpec::Int, 2));
        schema.insert("a", (TypeSpec::Int, 10));

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(schema.get("a").unwrap().default_value(), &json!(10));
    }

    #[test]
    fn test_from_value() {
        let schema = Schema::from_value(&json!({
            "host": ["str", "localhost"],
            "ports": ["list[int]", [80, 443]],
            "VERSION": ["str", "1.0", true]
        }))
        .unwrap();

        assert_eq!(schema.names().collect::<Vec<_>>(), ["host", "ports", "VERSION"]);
        assert_eq!(
            schema.get("ports").unwrap().declared_type(),
            &TypeSpec::list_of(TypeSpec::Int)
        );
        assert!(schema.get("VERSION").unwrap().is_readonly());
    }

    #[test]
    fn test_from_value_rejects_bad_shapes() {
        let err = Schema::from_value(&json!({"x": ["int"]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaDefinition);

        let err = Schema::from_value(&json!({"x": ["int", 1, "yes"]})).unwrap_err();
        assert!(err.to_string().contains("boolean"));

        let err = Schema::from_value(&json!({"x": ["int", 1, true, 4]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaDefinition);

        let err = Schema::from_value(&json!({"x": ["Widget", 1]})).unwrap_err();
        assert!(matches!(err, Error::UnknownType(_)));
    }
}
