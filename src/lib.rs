//! # tyconf - Typed Configuration
//!
//! A typed, mutable configuration container. Properties are declared with a
//! type, a default value, an optional read-only flag and an optional
//! validator; every write is checked against all of them.
//!
//! ## Features
//!
//! - **Type checking**: `str`, `int`, `float`, `bool`, `list`, `dict`, `None`,
//!   `Optional[T]` and `Union[..]` declarations, checked on every write
//! - **Validators**: a library of ready-made checks (ranges, lengths, patterns,
//!   URLs, paths...) composable with [`validators::all_of`] and
//!   [`validators::any_of`]
//! - **Read-only properties and freezing**: per-property write protection and
//!   a whole-config frozen state
//! - **Serialization**: JSON, TOML, value trees and environment variables,
//!   either as values only or as self-describing documents with metadata
//!
//! ## Quick Start
//!
//! ```rust
//! use tyconf::{Config, TypeSpec, validators::{range, one_of}};
//!
//! # fn example() -> tyconf::Result<()> {
//! let mut config = Config::builder()
//!     .property("host", (TypeSpec::Str, "localhost"))
//!     .property("port", (TypeSpec::Int, 8080, range(1024, 65535)))
//!     .property("log_level", (TypeSpec::Str, "INFO", one_of(["DEBUG", "INFO", "WARNING"])))
//!     .property("VERSION", (TypeSpec::Str, "1.0.0", true))
//!     .build()?;
//!
//! config.set("port", 3000)?;
//!
//! // value rejected by the validator
//! let err = config.set("port", 80).unwrap_err();
//! assert_eq!(err.to_string(), "Property 'port': must be >= 1024");
//!
//! // read-only
//! assert!(config.set("VERSION", "2.0.0").unwrap_err().is_state_violation());
//!
//! assert_eq!(config.to_string(), r#"Config(VERSION="1.0.0", host="localhost", log_level="INFO", port=3000)"#);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Optional and Union Types
//!
//! ```rust
//! use tyconf::{Config, TypeSpec};
//! use serde_json::Value;
//!
//! let mut config = Config::builder()
//!     .property("timeout", (TypeSpec::optional(TypeSpec::Int), Value::Null))
//!     .property("id", (TypeSpec::one_of([TypeSpec::Int, TypeSpec::Str]), 0))
//!     .build()
//!     .unwrap();
//!
//! config.set("timeout", 30).unwrap();
//! config.set("id", "user-7").unwrap();
//! assert!(config.set("id", 1.5).is_err());
//! ```
//!
//! ## Serialization
//!
//! Full-metadata documents carry types and defaults and can be loaded on their
//! own. Values-only documents need the schema. Validators are never written;
//! re-attach them after loading a full-metadata document if needed.
//!
//! ```rust
//! use tyconf::{Config, SaveOptions, TypeSpec};
//!
//! # fn example() -> tyconf::Result<()> {
//! let config = Config::builder()
//!     .property("host", (TypeSpec::Str, "localhost"))
//!     .build()?;
//!
//! let text = config.to_json(None, &SaveOptions::default())?.unwrap_or_default();
//! let copy = Config::from_json(&text, None)?;
//! assert_eq!(copy.get("host"), config.get("host"));
//!
//! let values = config.to_json(None, &SaveOptions::default().values_only().compact())?;
//! assert_eq!(values.as_deref(), Some(r#"{"host":"localhost"}"#));
//! let copy = Config::from_json(r#"{"host":"example.com"}"#, Some(&config.schema()))?;
//! assert_eq!(copy.get_as::<String>("host")?, "example.com");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Variables
//!
//! ```rust
//! use tyconf::{Config, Schema, TypeSpec};
//! use std::collections::HashMap;
//!
//! let schema = Schema::new()
//!     .with("port", (TypeSpec::Int, 8080))
//!     .with("debug", (TypeSpec::Bool, false));
//! let env = HashMap::from([("APP_PORT".to_string(), "3000".to_string())]);
//!
//! let config = Config::from_env("APP_", schema, &env).unwrap();
//! assert_eq!(config.get_as::<i64>("port").unwrap(), 3000);
//! assert_eq!(config.get_as::<bool>("debug").unwrap(), false);
//! ```
//!
//! Use [`ProcessEnv`] to read the real process environment.

// Core modules
mod display;
mod error;
mod property;
mod store;
mod types;

// Adapters
pub mod document;
pub mod env;
pub mod format;

pub mod validators;

// Re-exports from core
pub use error::{BoxError, Error, ErrorKind, Result};
pub use property::{PropertyDef, PropertyDescriptor, Schema};
pub use store::{Config, ConfigBuilder, Iter, MergeOptions, SaveOptions};
pub use types::{TypeRegistry, TypeSpec, check_type, value_type_name};

// Re-exports from adapters
pub use env::{EnvLoader, EnvSource, ProcessEnv};
pub use format::{Format, JsonFormat, TomlFormat};
pub use validators::{ValidationError, Validator};
