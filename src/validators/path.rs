//! URL and filesystem path validators

use super::{ValidationError, Validator, expect_str};
use std::path::Path;
use url::Url;

/// URL scheme must be one of `schemes`
///
/// Text that does not parse as a URL has an empty scheme.
pub fn url_scheme<S: Into<String>>(schemes: impl IntoIterator<Item = S>) -> Validator {
    let schemes: Vec<String> = schemes.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        let text = expect_str("url_scheme", value)?;
        let scheme = Url::parse(text)
            .map(|u| u.scheme().to_string())
            .unwrap_or_default();
        if schemes.contains(&scheme) {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "URL scheme must be one of {schemes:?}, got '{scheme}'"
            )))
        }
    })
}

/// URL with both a scheme and a host
pub fn valid_url() -> Validator {
    Validator::new(|value| {
        let text = expect_str("valid_url", value)?;
        let has_host = Url::parse(text)
            .ok()
            .and_then(|u| u.host_str().map(|h| !h.is_empty()))
            .unwrap_or(false);
        if has_host {
            Ok(())
        } else {
            Err(ValidationError::invalid(
                "must be a valid URL with scheme and domain",
            ))
        }
    })
}

/// Path must exist
pub fn path_exists() -> Validator {
    Validator::new(|value| {
        let text = expect_str("path_exists", value)?;
        if Path::new(text).exists() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "path does not exist: {text}"
            )))
        }
    })
}

/// Path must be an existing file
pub fn is_file() -> Validator {
    Validator::new(|value| {
        let text = expect_str("is_file", value)?;
        if Path::new(text).is_file() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!("not a file: {text}")))
        }
    })
}

/// Path must be an existing directory
pub fn is_directory() -> Validator {
    Validator::new(|value| {
        let text = expect_str("is_directory", value)?;
        if Path::new(text).is_dir() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!("not a directory: {text}")))
        }
    })
}

/// Path must be absolute
pub fn is_absolute_path() -> Validator {
    Validator::new(|value| {
        if Path::new(expect_str("is_absolute_path", value)?).is_absolute() {
            Ok(())
        } else {
            Err(ValidationError::invalid("path must be absolute"))
        }
    })
}

/// Path must be relative
pub fn is_relative_path() -> Validator {
    Validator::new(|value| {
        if Path::new(expect_str("is_relative_path", value)?).is_absolute() {
            Err(ValidationError::invalid("path must be relative"))
        } else {
            Ok(())
        }
    })
}

/// Final extension must be one of `extensions` (leading dot optional)
pub fn file_extension<S: AsRef<str>>(extensions: impl IntoIterator<Item = S>) -> Validator {
    let normalized: Vec<String> = extensions
        .into_iter()
        .map(|ext| {
            let ext = ext.as_ref();
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{ext}")
            }
        })
        .collect();
    Validator::new(move |value| {
        let text = expect_str("file_extension", value)?;
        let suffix = Path::new(text)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        if normalized.contains(&suffix) {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "file extension must be one of {normalized:?}"
            )))
        }
    })
}
