//! Loading and saving configs
//!
//! Every adapter goes through the value-tree document (see
//! [`crate::document`]): text formats parse into it or render from it, and the
//! environment loader produces a flat values-only mapping.

use crate::document;
use crate::env::{EnvLoader, EnvSource};
use crate::error::{Error, Result};
use crate::format::{Format, JsonFormat, TomlFormat};
use crate::property::Schema;
use crate::types::TypeRegistry;
use log::{debug, info};
use serde_json::Value;
use std::path::Path;

use super::Config;

// =============================================================================
// Options
// =============================================================================

/// How a config is written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write only `name -> value` pairs instead of the full metadata document
    pub values_only: bool,
    /// JSON indentation width; `None` writes compact JSON
    pub indent: Option<usize>,
    /// Write the crate version key (full-metadata documents only)
    pub include_version: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            values_only: false,
            indent: Some(2),
            include_version: true,
        }
    }
}

impl SaveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn values_only(mut self) -> Self {
        self.values_only = true;
        self
    }

    #[must_use]
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    #[must_use]
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Leave out the version key
    ///
    /// The result is no longer recognized as a full-metadata document when
    /// read back.
    #[must_use]
    pub fn without_version(mut self) -> Self {
        self.include_version = false;
        self
    }
}

/// How loaded values are merged into an existing config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Skip names the config does not declare instead of failing on them
    pub update_existing: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            update_existing: true,
        }
    }
}

impl MergeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on names the config does not declare
    #[must_use]
    pub fn strict() -> Self {
        Self {
            update_existing: false,
        }
    }

    #[must_use]
    pub fn update_existing(mut self, update_existing: bool) -> Self {
        self.update_existing = update_existing;
        self
    }
}

// =============================================================================
// Source Resolution
// =============================================================================

/// Text shaped like a document rather than a path
fn is_document_text(source: &str) -> bool {
    let trimmed = source.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[') || source.contains('\n') || source.contains('=')
}

/// Read `source` as a file when it names one, otherwise parse it as text
///
/// An existing file always wins, whatever its name looks like. With
/// `strict`, a source that exists but is not a file fails, and a source that
/// looks like a path but does not exist fails with [`Error::FileNotFound`].
/// Document-shaped text is never taken for a missing path.
fn read_source<F: Format>(format: &F, source: &str, strict: bool) -> Result<Value> {
    let path = Path::new(source);
    if path.is_file() {
        debug!("Reading {} from {}", format.name(), path.display());
        return format.read(path);
    }
    if strict && path.exists() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    if is_document_text(source) {
        return format.decode(source);
    }
    if strict {
        let looks_like_path = source.contains('/')
            || source.contains('\\')
            || source.ends_with(&format!(".{}", format.extension()));
        if looks_like_path {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
    }
    format.decode(source)
}

// =============================================================================
// Config adapters
// =============================================================================

impl Config {
    // -------------------------------------------------------------------------
    // Value trees
    // -------------------------------------------------------------------------

    /// Export as a value tree
    #[must_use]
    pub fn to_value(&self, options: &SaveOptions) -> Value {
        document::encode(self, options)
    }

    /// Build a config from a value tree
    ///
    /// Full-metadata documents are self-describing. Values-only mappings need
    /// `schema`; keys it does not declare are ignored and missing keys keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaRequired`] for a values-only mapping without a
    /// schema, [`Error::UnknownType`] for unresolvable type names, and the
    /// type or validator error of any value that does not fit its property.
    pub fn from_value(doc: &Value, schema: Option<&Schema>) -> Result<Self> {
        Self::from_value_with_registry(doc, schema, &TypeRegistry::new())
    }

    /// [`Config::from_value`] resolving type names through `registry`
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_value`].
    pub fn from_value_with_registry(
        doc: &Value,
        schema: Option<&Schema>,
        registry: &TypeRegistry,
    ) -> Result<Self> {
        document::decode(doc, schema, registry)
    }

    /// Merge the values of a document of either shape into this config
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Config::set`].
    pub fn merge_value(&mut self, doc: &Value, options: MergeOptions) -> Result<()> {
        let values = document::values_of(doc)?;
        self.merge(values, options.update_existing)
    }

    fn save<F: Format>(
        &self,
        format: &F,
        path: Option<&Path>,
        options: &SaveOptions,
    ) -> Result<Option<String>> {
        let doc = self.to_value(options);
        match path {
            Some(path) => {
                format.write(path, &doc, options)?;
                Ok(None)
            }
            None => format.encode(&doc, options).map(Some),
        }
    }

    fn load<F: Format>(&mut self, format: &F, source: &str, options: MergeOptions) -> Result<()> {
        let doc = read_source(format, source, true)?;
        self.merge_value(&doc, options)?;
        info!("Loaded {} into config ({} properties)", format.name(), self.len());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // JSON
    // -------------------------------------------------------------------------

    /// Render as JSON
    ///
    /// With a path the document is written atomically and `None` is returned;
    /// without one the text is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileWrite`] when the file cannot be written.
    pub fn to_json(&self, path: Option<&Path>, options: &SaveOptions) -> Result<Option<String>> {
        self.save(&JsonFormat, path, options)
    }

    /// Build a config from a JSON file or JSON text
    ///
    /// `source` is read from disk when it names an existing file and parsed as
    /// text otherwise.
    ///
    /// # Errors
    ///
    /// Parse errors, plus everything [`Config::from_value`] returns.
    pub fn from_json(source: &str, schema: Option<&Schema>) -> Result<Self> {
        let doc = read_source(&JsonFormat, source, false)?;
        Self::from_value(&doc, schema)
    }

    /// Merge a JSON file or JSON text into this config
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAFile`] when `source` names a directory,
    /// [`Error::FileNotFound`] when it looks like a path (contains a path
    /// separator or ends in `.json`) but does not exist, and otherwise the
    /// errors of [`Config::merge_value`].
    pub fn load_json(&mut self, source: &str, options: MergeOptions) -> Result<()> {
        self.load(&JsonFormat, source, options)
    }

    // -------------------------------------------------------------------------
    // TOML
    // -------------------------------------------------------------------------

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] without the `toml-write` feature and
    /// [`Error::Serialize`] when a value is null.
    pub fn to_toml(&self, path: Option<&Path>, options: &SaveOptions) -> Result<Option<String>> {
        self.save(&TomlFormat, path, options)
    }

    /// Build a config from a TOML file or TOML text
    ///
    /// # Errors
    ///
    /// Parse errors, plus everything [`Config::from_value`] returns.
    pub fn from_toml(source: &str, schema: Option<&Schema>) -> Result<Self> {
        let doc = read_source(&TomlFormat, source, false)?;
        Self::from_value(&doc, schema)
    }

    /// Merge a TOML file or TOML text into this config
    ///
    /// # Errors
    ///
    /// Same as [`Config::load_json`], with `.toml` as the path suffix.
    pub fn load_toml(&mut self, source: &str, options: MergeOptions) -> Result<()> {
        self.load(&TomlFormat, source, options)
    }

    // -------------------------------------------------------------------------
    // Environment
    // -------------------------------------------------------------------------

    /// Build a config from `schema`, then apply `{prefix}{NAME}` variables
    ///
    /// # Errors
    ///
    /// Schema errors, [`Error::Conversion`] for unconvertible variables, and
    /// the errors of [`Config::set`].
    pub fn from_env<S: EnvSource + ?Sized>(prefix: &str, schema: Schema, source: &S) -> Result<Self> {
        let values = EnvLoader::new(source).load(prefix, &schema)?;
        let mut config = Config::new(schema)?;
        config.merge(values, true)?;
        Ok(config)
    }

    /// Apply `{prefix}{NAME}` variables to the declared properties
    ///
    /// # Errors
    ///
    /// [`Error::Conversion`] for unconvertible variables and the errors of
    /// [`Config::set`].
    pub fn load_env<S: EnvSource + ?Sized>(&mut self, prefix: &str, source: &S) -> Result<()> {
        let values = EnvLoader::new(source).load(prefix, &self.schema())?;
        debug!("Applying {} environment overrides", values.len());
        self.merge(values, true)
    }
}
