//! Error types for tyconf

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tyconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause carried by validation failures raised from user code
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Broad classification of an [`Error`]
///
/// Callers use this to tell "cannot modify" apart from "value rejected"
/// without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed schema or property declaration
    SchemaDefinition,
    /// Operation not allowed in the current state (frozen, read-only, unknown name)
    StateViolation,
    /// Value does not satisfy the declared type
    TypeMismatch,
    /// Validator rejected the value
    Validation,
    /// Environment string could not be converted to the target type
    Conversion,
    /// Malformed or unavailable interchange data
    Format,
}

/// Main error type for tyconf
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Schema Definition Errors
    // -------------------------------------------------------------------------
    #[error("Property '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("Property name cannot be empty")]
    EmptyName,

    #[error(
        "Property name '{0}' is reserved. Names starting with '_' are reserved for internal use"
    )]
    ReservedName(String),

    #[error("Property '{0}' already exists")]
    DuplicateProperty(String),

    // -------------------------------------------------------------------------
    // State Errors
    // -------------------------------------------------------------------------
    #[error("Cannot {action} frozen config")]
    Frozen { action: &'static str },

    #[error("Property '{0}' is read-only")]
    ReadOnly(String),

    #[error("Property '{0}' does not exist")]
    PropertyNotFound(String),

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Property '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Property '{key}': {reason}")]
    Validation {
        key: String,
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Cannot convert environment variable '{key}' value '{raw}' to {target}: {reason}")]
    Conversion {
        key: String,
        raw: String,
        target: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("{0} is not a file")]
    NotAFile(PathBuf),

    #[error("Failed to serialize data: {0}")]
    Serialize(String),

    #[error("Failed to parse {format}: {reason}")]
    Parse { format: &'static str, reason: String },

    #[error(
        "Schema required when loading values-only format. Provide a schema mapping each property to (type, default)"
    )]
    SchemaRequired,

    #[error("Unknown type name '{0}'")]
    UnknownType(String),

    #[error("{0}")]
    Unsupported(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Parse {
                format: "JSON",
                reason: e.to_string(),
            }
        } else {
            Error::Serialize(e.to_string())
        }
    }
}

impl Error {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDefinition { .. }
            | Error::EmptyName
            | Error::ReservedName(_)
            | Error::DuplicateProperty(_) => ErrorKind::SchemaDefinition,
            Error::Frozen { .. } | Error::ReadOnly(_) | Error::PropertyNotFound(_) => {
                ErrorKind::StateViolation
            }
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Conversion { .. } => ErrorKind::Conversion,
            Error::FileRead { .. }
            | Error::FileWrite { .. }
            | Error::FileNotFound(_)
            | Error::NotAFile(_)
            | Error::Serialize(_)
            | Error::Parse { .. }
            | Error::SchemaRequired
            | Error::UnknownType(_)
            | Error::Unsupported(_) => ErrorKind::Format,
        }
    }

    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PropertyNotFound(_) | Error::FileNotFound(_))
    }

    /// Check if the operation was refused because of the config's state
    /// rather than because of the value
    #[must_use]
    pub fn is_state_violation(&self) -> bool {
        self.kind() == ErrorKind::StateViolation
    }

    /// Check if the value itself was rejected (type or validator)
    #[must_use]
    pub fn is_rejected_value(&self) -> bool {
        matches!(self.kind(), ErrorKind::TypeMismatch | ErrorKind::Validation)
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================

use std::path::Path;

/// Read a UTF-8 file with proper error handling
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write content to a file with proper error handling
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::EmptyName.kind(), ErrorKind::SchemaDefinition);
        assert_eq!(
            Error::Frozen { action: "modify" }.kind(),
            ErrorKind::StateViolation
        );
        assert_eq!(
            Error::ReadOnly("VERSION".into()).kind(),
            ErrorKind::StateViolation
        );
        assert_eq!(Error::SchemaRequired.kind(), ErrorKind::Format);
        assert!(Error::PropertyNotFound("x".into()).is_not_found());
        assert!(Error::PropertyNotFound("x".into()).is_state_violation());
    }

    #[test]
    fn test_messages_name_the_property() {
        let err = Error::TypeMismatch {
            key: "port".into(),
            expected: "int".into(),
            actual: "str".into(),
        };
        assert_eq!(err.to_string(), "Property 'port': expected int, got str");

        let err = Error::Validation {
            key: "port".into(),
            reason: "must be >= 1024".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "Property 'port': must be >= 1024");
        assert!(err.is_rejected_value());
    }

    #[test]
    fn test_schema_required_message() {
        assert!(Error::SchemaRequired.to_string().contains("Schema required"));
    }

    #[test]
    fn test_json_syntax_error_is_parse() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Parse { format: "JSON", .. }));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
