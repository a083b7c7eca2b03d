//! Builder for Config
//!
//! This module contains [`ConfigBuilder`] which provides a fluent API for
//! declaring the properties of a [`Config`](super::Config).

use crate::error::Result;
use crate::property::{PropertyDef, Schema};

use super::Config;

/// Builder for creating a [`Config`] with a fluent API.
///
/// Declarations are collected into a [`Schema`] and validated together in
/// [`ConfigBuilder::build`], so the first bad declaration is reported there.
///
/// # Example
///
/// ```
/// use tyconf::{Config, TypeSpec};
///
/// let config = Config::builder()
///     .property("host", (TypeSpec::Str, "localhost"))
///     .readonly("VERSION", TypeSpec::Str, "1.0.0")
///     .frozen()
///     .build()
///     .unwrap();
///
/// assert!(config.is_frozen());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    schema: Schema,
    frozen: bool,
}

impl ConfigBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing schema.
    #[must_use]
    pub fn from_schema(schema: Schema) -> Self {
        Self {
            schema,
            frozen: false,
        }
    }

    /// Declare a property.
    ///
    /// Accepts a [`PropertyDef`] or one of the tuple forms `(type, default)`,
    /// `(type, default, readonly)` and `(type, default, validator)`.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, def: impl Into<PropertyDef>) -> Self {
        self.schema.insert(name, def);
        self
    }

    /// Declare a read-only property.
    #[must_use]
    pub fn readonly(
        self,
        name: impl Into<String>,
        declared_type: crate::TypeSpec,
        default_value: impl Into<serde_json::Value>,
    ) -> Self {
        self.property(name, PropertyDef::new(declared_type, default_value).readonly())
    }

    /// Freeze the config once built.
    #[must_use]
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Build the [`Config`].
    ///
    /// # Errors
    ///
    /// Returns the first declaration error (bad name, default of the wrong
    /// type, default refused by its validator).
    pub fn build(self) -> Result<Config> {
        let mut config = Config::new(self.schema)?;
        if self.frozen {
            config.freeze();
        }
        Ok(config)
    }
}
