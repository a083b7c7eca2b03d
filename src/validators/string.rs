//! String validators: length, content matching and character classes

use super::{ValidationError, Validator, expect_str, sized_len};

/// Length (characters for strings, items for lists and mappings) within
/// optional inclusive bounds
pub fn length(min_len: Option<usize>, max_len: Option<usize>) -> Validator {
    Validator::new(move |value| {
        let actual = sized_len("length", value)?;
        if let Some(min) = min_len {
            if actual < min {
                return Err(ValidationError::Invalid(format!("length must be >= {min}")));
            }
        }
        if let Some(max) = max_len {
            if actual > max {
                return Err(ValidationError::Invalid(format!("length must be <= {max}")));
            }
        }
        Ok(())
    })
}

/// Length of at least `min_len`
pub fn min_length(min_len: usize) -> Validator {
    length(Some(min_len), None)
}

/// Length of at most `max_len`
pub fn max_length(max_len: usize) -> Validator {
    length(None, Some(max_len))
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

fn affix_error(verb: &str, needle: &str, case_sensitive: bool) -> ValidationError {
    let mut msg = format!("must {verb} '{needle}'");
    if !case_sensitive {
        msg.push_str(" (case insensitive)");
    }
    ValidationError::Invalid(msg)
}

/// String must contain `substring`
pub fn contains(substring: impl Into<String>, case_sensitive: bool) -> Validator {
    let substring = substring.into();
    let needle = fold(&substring, case_sensitive);
    Validator::new(move |value| {
        let text = fold(expect_str("contains", value)?, case_sensitive);
        if text.contains(&needle) {
            Ok(())
        } else {
            Err(affix_error("contain", &substring, case_sensitive))
        }
    })
}

/// String must start with `prefix`
pub fn starts_with(prefix: impl Into<String>, case_sensitive: bool) -> Validator {
    let prefix = prefix.into();
    let needle = fold(&prefix, case_sensitive);
    Validator::new(move |value| {
        let text = fold(expect_str("starts_with", value)?, case_sensitive);
        if text.starts_with(&needle) {
            Ok(())
        } else {
            Err(affix_error("start with", &prefix, case_sensitive))
        }
    })
}

/// String must end with `suffix`
pub fn ends_with(suffix: impl Into<String>, case_sensitive: bool) -> Validator {
    let suffix = suffix.into();
    let needle = fold(&suffix, case_sensitive);
    Validator::new(move |value| {
        let text = fold(expect_str("ends_with", value)?, case_sensitive);
        if text.ends_with(&needle) {
            Ok(())
        } else {
            Err(affix_error("end with", &suffix, case_sensitive))
        }
    })
}

/// String must match `pattern` starting at its first character
///
/// # Errors
///
/// Returns the regex compile error for an invalid pattern.
pub fn regex(pattern: &str) -> Result<Validator, regex::Error> {
    let compiled = regex::Regex::new(pattern)?;
    let pattern = pattern.to_string();
    Ok(Validator::new(move |value| {
        let text = expect_str("regex", value)?;
        // leftmost match; anchored semantics means it must begin at 0
        if compiled.find(text).is_some_and(|m| m.start() == 0) {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "must match pattern {pattern}"
            )))
        }
    }))
}

fn char_class(
    name: &'static str,
    message: &'static str,
    accepts: fn(&str) -> bool,
) -> Validator {
    Validator::new(move |value| {
        if accepts(expect_str(name, value)?) {
            Ok(())
        } else {
            Err(ValidationError::invalid(message))
        }
    })
}

/// Only alphabetic characters (and at least one)
pub fn is_alpha() -> Validator {
    char_class(
        "is_alpha",
        "must contain only alphabetic characters",
        |s| !s.is_empty() && s.chars().all(char::is_alphabetic),
    )
}

/// Only alphanumeric characters (and at least one)
pub fn is_alphanumeric() -> Validator {
    char_class(
        "is_alphanumeric",
        "must contain only alphanumeric characters",
        |s| !s.is_empty() && s.chars().all(char::is_alphanumeric),
    )
}

/// Only numeric characters (and at least one)
pub fn is_numeric() -> Validator {
    char_class(
        "is_numeric",
        "must contain only numeric characters",
        |s| !s.is_empty() && s.chars().all(char::is_numeric),
    )
}

/// At least one cased character and no uppercase ones
pub fn is_lowercase() -> Validator {
    char_class("is_lowercase", "must be lowercase", |s| {
        s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
    })
}

/// At least one cased character and no lowercase ones
pub fn is_uppercase() -> Validator {
    char_class("is_uppercase", "must be uppercase", |s| {
        s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
    })
}

/// No whitespace anywhere
pub fn no_whitespace() -> Validator {
    char_class("no_whitespace", "must not contain whitespace", |s| {
        !s.chars().any(char::is_whitespace)
    })
}
