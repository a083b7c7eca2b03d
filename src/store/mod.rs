//! The configuration store
//!
//! A [`Config`] owns two tables keyed by property name: descriptors (type,
//! default, read-only flag, validator) and current values. Both tables always
//! hold the same names. Every write goes through [`Config::set`], every
//! deletion through [`Config::remove`].

mod builder;
mod io;

pub use builder::ConfigBuilder;
pub use io::{MergeOptions, SaveOptions};

use crate::error::{Error, Result};
use crate::property::{PropertyDef, PropertyDescriptor, Schema};
use crate::types::{check_type, value_type_name};
use crate::validators::check_value;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Typed, mutable configuration
///
/// # Example
///
/// ```
/// use tyconf::{Config, TypeSpec, validators::range};
///
/// let mut config = Config::builder()
///     .property("host", (TypeSpec::Str, "localhost"))
///     .property("port", (TypeSpec::Int, 8080, range(1024, 65535)))
///     .property("VERSION", (TypeSpec::Str, "1.0.0", true))
///     .build()
///     .unwrap();
///
/// config.set("port", 3000).unwrap();
/// assert!(config.set("port", 80).is_err());
/// assert!(config.set("VERSION", "2.0.0").is_err());
/// assert_eq!(config.get_as::<i64>("port").unwrap(), 3000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    properties: HashMap<String, PropertyDescriptor>,
    values: HashMap<String, Value>,
    /// Declaration order
    order: Vec<String>,
    frozen: bool,
}

impl Config {
    /// Create a config from a schema, adding properties in schema order
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Config::add`].
    pub fn new(schema: Schema) -> Result<Self> {
        let mut config = Config::default();
        for (name, def) in schema {
            config.add(&name, def)?;
        }
        Ok(config)
    }

    /// Start declaring properties fluently
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    // -------------------------------------------------------------------------
    // Schema changes
    // -------------------------------------------------------------------------

    /// Declare a new property
    ///
    /// The default value must satisfy the declared type and the validator.
    ///
    /// # Errors
    ///
    /// - [`Error::Frozen`] when the config is frozen
    /// - [`Error::EmptyName`], [`Error::ReservedName`] or
    ///   [`Error::DuplicateProperty`] for a bad name
    /// - [`Error::TypeMismatch`] or [`Error::Validation`] for a bad default
    pub fn add(&mut self, name: &str, def: impl Into<PropertyDef>) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen {
                action: "add properties to",
            });
        }
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        if name.starts_with('_') {
            return Err(Error::ReservedName(name.to_string()));
        }
        if self.properties.contains_key(name) {
            return Err(Error::DuplicateProperty(name.to_string()));
        }

        let def = def.into();
        check_type(name, &def.default_value, &def.declared_type)?;
        if let Some(validator) = &def.validator {
            check_value(name, &def.default_value, validator)?;
        }

        debug!("Added property '{name}' ({})", def.declared_type);
        self.values.insert(name.to_string(), def.default_value.clone());
        self.properties
            .insert(name.to_string(), PropertyDescriptor::new(name, def));
        self.order.push(name.to_string());
        Ok(())
    }

    /// Delete a property and its value
    ///
    /// # Errors
    ///
    /// Returns [`Error::Frozen`], [`Error::PropertyNotFound`] or
    /// [`Error::ReadOnly`].
    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen {
                action: "delete properties from",
            });
        }
        let descriptor = self.descriptor(name)?;
        if descriptor.is_readonly() {
            return Err(Error::ReadOnly(name.to_string()));
        }

        self.properties.remove(name);
        self.values.remove(name);
        self.order.retain(|n| n != name);
        debug!("Removed property '{name}'");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Replace the value of a property
    ///
    /// The type is checked before the validator runs.
    ///
    /// # Errors
    ///
    /// State errors ([`Error::Frozen`], [`Error::PropertyNotFound`],
    /// [`Error::ReadOnly`]) come first, then [`Error::TypeMismatch`], then
    /// [`Error::Validation`]. The stored value is unchanged on error.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen { action: "modify" });
        }
        let descriptor = self.descriptor(name)?;
        if descriptor.is_readonly() {
            return Err(Error::ReadOnly(name.to_string()));
        }

        let value = value.into();
        Self::check(descriptor, &value)?;
        debug!("Set property '{name}'");
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// [`Config::set`] that reports failure as `false`
    pub fn try_set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.set(name, value) {
            Ok(()) => true,
            Err(e) => {
                debug!("try_set('{name}') refused: {e}");
                false
            }
        }
    }

    /// Set several properties in order
    ///
    /// There is no rollback: pairs before the failing one stay applied.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Config::set`].
    pub fn update<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in pairs {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// Restore every writable property to its default
    ///
    /// # Errors
    ///
    /// Returns [`Error::Frozen`] when the config is frozen.
    pub fn reset(&mut self) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen { action: "reset" });
        }
        for (name, descriptor) in &self.properties {
            if !descriptor.is_readonly() {
                self.values
                    .insert(name.clone(), descriptor.default_value().clone());
            }
        }
        debug!("Reset {} properties to defaults", self.properties.len());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Reject every modification until [`Config::unfreeze`]
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Independent, unfrozen copy
    ///
    /// Descriptors keep their original defaults, so [`Config::reset`] on the
    /// copy restores the declared defaults. Current values are carried over
    /// as they are, read-only ones included. Validators are shared.
    #[must_use]
    pub fn copy(&self) -> Config {
        Config {
            properties: self.properties.clone(),
            values: self.values.clone(),
            order: self.order.clone(),
            frozen: false,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current value, or `None` for an unknown name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Current value, or `default` for an unknown name
    #[must_use]
    pub fn get_or(&self, name: &str, default: impl Into<Value>) -> Value {
        self.values
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Current value
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyNotFound`] for an unknown name.
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Current value converted to `T`
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyNotFound`] for an unknown name and
    /// [`Error::TypeMismatch`] when the value does not convert.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.value(name)?;
        T::deserialize(value).map_err(|_| Error::TypeMismatch {
            key: name.to_string(),
            expected: std::any::type_name::<T>().to_string(),
            actual: value_type_name(value).to_string(),
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Property names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Current values in declaration order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter().map(|(_, value)| value)
    }

    /// `(name, value)` pairs in declaration order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            config: self,
            names: self.order.iter(),
        }
    }

    /// Descriptor of a property
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyNotFound`] for an unknown name.
    pub fn property_info(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.descriptor(name)
    }

    /// Property names in declaration order
    #[must_use]
    pub fn list_properties(&self) -> Vec<&str> {
        self.keys().collect()
    }

    /// Declarations of this config, with their original defaults
    #[must_use]
    pub fn schema(&self) -> Schema {
        self.descriptors()
            .map(|d| (d.name().to_string(), d.definition().clone()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn descriptor(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.properties
            .get(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Descriptors in declaration order
    pub(crate) fn descriptors(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.order.iter().filter_map(|n| self.properties.get(n))
    }

    fn check(descriptor: &PropertyDescriptor, value: &Value) -> Result<()> {
        check_type(descriptor.name(), value, descriptor.declared_type())?;
        if let Some(validator) = descriptor.validator() {
            check_value(descriptor.name(), value, validator)?;
        }
        Ok(())
    }

    /// Store a loaded value, bypassing the read-only flag
    ///
    /// Type and validator still apply.
    pub(crate) fn seed(&mut self, name: &str, value: Value) -> Result<()> {
        let descriptor = self.descriptor(name)?;
        Self::check(descriptor, &value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Apply loaded values through [`Config::set`]
    ///
    /// Read-only properties whose incoming value equals the current one are
    /// skipped, so a config can re-load its own documents.
    pub(crate) fn merge(
        &mut self,
        values: serde_json::Map<String, Value>,
        update_existing: bool,
    ) -> Result<()> {
        for (name, value) in values {
            match self.properties.get(&name) {
                None if update_existing => {
                    warn!("Ignoring unknown property '{name}'");
                    continue;
                }
                Some(d) if d.is_readonly() && self.values.get(&name) == Some(&value) => {
                    debug!("Read-only property '{name}' unchanged, skipping");
                    continue;
                }
                _ => {}
            }
            self.set(&name, value)?;
        }
        Ok(())
    }
}

/// Iterator over `(name, value)` pairs of a [`Config`]
pub struct Iter<'a> {
    config: &'a Config,
    names: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.next()?;
        let value = self.config.values.get(name)?;
        Some((name.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
