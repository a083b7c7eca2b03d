//! Value validators
//!
//! A [`Validator`] is a shared, stateless check of one value. It succeeds with
//! `Ok(())` and fails with a [`ValidationError`]:
//!
//! - [`ValidationError::Rejected`] when a predicate answered `false`
//! - [`ValidationError::Invalid`] with a domain message ("must be >= 1024")
//! - [`ValidationError::Failed`] wrapping an arbitrary error raised by user code
//!
//! The store turns these into [`Error::Validation`](crate::Error::Validation)
//! naming the property.
//!
//! # Example
//!
//! ```
//! use tyconf::validators::{all_of, range, not_in};
//! use serde_json::json;
//!
//! let port = all_of([range(1024, 65535), not_in([3000, 5000])]);
//! assert!(port.validate(&json!(8080)).is_ok());
//! assert_eq!(port.validate(&json!(80)).unwrap_err().to_string(), "must be >= 1024");
//! ```

mod collection;
mod numeric;
mod path;
mod string;

pub use collection::{has_items, has_keys, keys_in, max_items, min_items, non_empty, unique_items};
pub use numeric::{
    between, divisible_by, is_even, is_odd, max_value, min_value, negative, non_negative,
    non_positive, positive, range,
};
pub use path::{
    file_extension, is_absolute_path, is_directory, is_file, is_relative_path, path_exists,
    url_scheme, valid_url,
};
pub use string::{
    contains, ends_with, is_alpha, is_alphanumeric, is_lowercase, is_numeric, is_uppercase,
    length, max_length, min_length, no_whitespace, regex, starts_with,
};

use crate::error::{BoxError, Error, Result};
use crate::types::value_type_name;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Validator
// =============================================================================

/// Why a validator refused a value
#[derive(Debug)]
pub enum ValidationError {
    /// A predicate returned `false`
    Rejected,
    /// Described domain failure
    Invalid(String),
    /// Error raised by user code while validating
    Failed(BoxError),
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Invalid`]
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationError::Invalid(message.into())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Rejected => f.write_str("validation failed"),
            ValidationError::Invalid(msg) => f.write_str(msg),
            ValidationError::Failed(source) => write!(f, "validation error: {source}"),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::Failed(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

type CheckFn = dyn Fn(&Value) -> std::result::Result<(), ValidationError> + Send + Sync;

/// Shared validation function
///
/// Cloning is cheap; clones share the same function, so a validator can back
/// properties in several configs at once.
#[derive(Clone)]
pub struct Validator {
    check: Arc<CheckFn>,
}

impl Validator {
    /// Wrap a function that reports failures as [`ValidationError`]
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Wrap a yes/no predicate; `false` becomes [`ValidationError::Rejected`]
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value| {
            if check(value) {
                Ok(())
            } else {
                Err(ValidationError::Rejected)
            }
        })
    }

    /// Wrap a function returning any error type; errors become
    /// [`ValidationError::Failed`] with the original kept as the source
    pub fn fallible<F, E>(check: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::new(move |value| check(value).map_err(|e| ValidationError::Failed(e.into())))
    }

    /// Run the check
    ///
    /// # Errors
    ///
    /// Returns the validator's [`ValidationError`] when the value is refused.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), ValidationError> {
        (self.check)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(Fn)")
    }
}

/// Run `validator` on the value of property `name`
///
/// # Errors
///
/// Returns [`Error::Validation`] with the property name and the normalized
/// reason.
pub(crate) fn check_value(name: &str, value: &Value, validator: &Validator) -> Result<()> {
    validator.validate(value).map_err(|e| match e {
        ValidationError::Rejected => Error::Validation {
            key: name.to_string(),
            reason: format!("validation failed for value {value}"),
            source: None,
        },
        ValidationError::Invalid(reason) => Error::Validation {
            key: name.to_string(),
            reason,
            source: None,
        },
        ValidationError::Failed(source) => Error::Validation {
            key: name.to_string(),
            reason: format!("validation error: {source}"),
            source: Some(source),
        },
    })
}

// =============================================================================
// Combinators
// =============================================================================

/// All validators must pass; the first failure is returned unchanged
pub fn all_of(validators: impl IntoIterator<Item = Validator>) -> Validator {
    let validators: Vec<Validator> = validators.into_iter().collect();
    Validator::new(move |value| {
        for v in &validators {
            v.validate(value)?;
        }
        Ok(())
    })
}

/// At least one validator must pass
///
/// When every child fails, the messages are joined with `; ` after
/// `must satisfy at least one of: `.
pub fn any_of(validators: impl IntoIterator<Item = Validator>) -> Validator {
    let validators: Vec<Validator> = validators.into_iter().collect();
    Validator::new(move |value| {
        let mut errors = Vec::with_capacity(validators.len());
        for v in &validators {
            match v.validate(value) {
                Ok(()) => return Ok(()),
                Err(e) => errors.push(e.to_string()),
            }
        }
        Err(ValidationError::Invalid(format!(
            "must satisfy at least one of: {}",
            errors.join("; ")
        )))
    })
}

// =============================================================================
// Choice Validators
// =============================================================================

/// Value must equal one of `allowed`
pub fn one_of<V: Into<Value>>(allowed: impl IntoIterator<Item = V>) -> Validator {
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        if allowed.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "must be one of {}",
                Value::Array(allowed.clone())
            )))
        }
    })
}

/// Value must not equal any of `disallowed`
pub fn not_in<V: Into<Value>>(disallowed: impl IntoIterator<Item = V>) -> Validator {
    let disallowed: Vec<Value> = disallowed.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        if disallowed.contains(value) {
            Err(ValidationError::Invalid(format!(
                "must not be one of {}",
                Value::Array(disallowed.clone())
            )))
        } else {
            Ok(())
        }
    })
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Failure for a validator applied to a value it cannot inspect
pub(crate) fn unsupported(validator: &str, wanted: &str, value: &Value) -> ValidationError {
    ValidationError::Failed(
        format!(
            "{validator} requires {wanted}, got {}",
            value_type_name(value)
        )
        .into(),
    )
}

pub(crate) fn expect_str<'a>(
    validator: &str,
    value: &'a Value,
) -> std::result::Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| unsupported(validator, "a string", value))
}

/// Length of a string (in characters), list or mapping
pub(crate) fn sized_len(validator: &str, value: &Value) -> std::result::Result<usize, ValidationError> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(items) => Ok(items.len()),
        Value::Object(map) => Ok(map.len()),
        other => Err(unsupported(validator, "a string, list or mapping", other)),
    }
}

// =============================================================================
// Tests
// =============================================================================
