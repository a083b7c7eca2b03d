//! Numeric validators: ranges, sign, divisibility and parity

use super::{ValidationError, Validator, unsupported};
use serde_json::Value;

fn number(validator: &str, value: &Value) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .ok_or_else(|| unsupported(validator, "a number", value))
}

fn bounded(min_val: Option<f64>, max_val: Option<f64>) -> Validator {
    Validator::new(move |value| {
        let n = number("range", value)?;
        if let Some(min) = min_val {
            if n < min {
                return Err(ValidationError::Invalid(format!("must be >= {min}")));
            }
        }
        if let Some(max) = max_val {
            if n > max {
                return Err(ValidationError::Invalid(format!("must be <= {max}")));
            }
        }
        Ok(())
    })
}

/// Number within `[min_val, max_val]`
pub fn range<N: Into<f64>>(min_val: N, max_val: N) -> Validator {
    bounded(Some(min_val.into()), Some(max_val.into()))
}

/// Number of at least `min_val`
pub fn min_value(min_val: impl Into<f64>) -> Validator {
    bounded(Some(min_val.into()), None)
}

/// Number of at most `max_val`
pub fn max_value(max_val: impl Into<f64>) -> Validator {
    bounded(None, Some(max_val.into()))
}

/// Number between the bounds, inclusive or exclusive
pub fn between<N: Into<f64>>(min_val: N, max_val: N, inclusive: bool) -> Validator {
    let (min, max) = (min_val.into(), max_val.into());
    Validator::new(move |value| {
        let n = number("between", value)?;
        let ok = if inclusive {
            min <= n && n <= max
        } else {
            min < n && n < max
        };
        if ok {
            Ok(())
        } else {
            let mode = if inclusive { "inclusive" } else { "exclusive" };
            Err(ValidationError::Invalid(format!(
                "must be between {min} and {max} ({mode})"
            )))
        }
    })
}

fn sign(name: &'static str, message: &'static str, accepts: fn(f64) -> bool) -> Validator {
    Validator::new(move |value| {
        if accepts(number(name, value)?) {
            Ok(())
        } else {
            Err(ValidationError::invalid(message))
        }
    })
}

/// Number > 0
pub fn positive() -> Validator {
    sign("positive", "must be positive (> 0)", |n| n > 0.0)
}

/// Number < 0
pub fn negative() -> Validator {
    sign("negative", "must be negative (< 0)", |n| n < 0.0)
}

/// Number >= 0
pub fn non_negative() -> Validator {
    sign("non_negative", "must be non-negative (>= 0)", |n| n >= 0.0)
}

/// Number <= 0
pub fn non_positive() -> Validator {
    sign("non_positive", "must be non-positive (<= 0)", |n| n <= 0.0)
}

/// Remainder of `value / divisor`, exact for integers
fn remainder(validator: &str, value: &Value, divisor: i64) -> Result<f64, ValidationError> {
    if let Some(n) = value.as_i64() {
        // only overflows for i64::MIN % -1, which divides evenly
        return Ok(n.checked_rem_euclid(divisor).unwrap_or(0) as f64);
    }
    Ok(number(validator, value)?.rem_euclid(divisor as f64))
}

/// Number divisible by `divisor`
///
/// A zero divisor rejects every value.
pub fn divisible_by(divisor: i64) -> Validator {
    Validator::new(move |value| {
        if divisor != 0 && remainder("divisible_by", value, divisor)? == 0.0 {
            Ok(())
        } else {
            Err(ValidationError::Invalid(format!(
                "must be divisible by {divisor}"
            )))
        }
    })
}

/// Even number
pub fn is_even() -> Validator {
    Validator::new(|value| {
        if remainder("is_even", value, 2)? == 0.0 {
            Ok(())
        } else {
            Err(ValidationError::invalid("must be even"))
        }
    })
}

/// Odd number
pub fn is_odd() -> Validator {
    Validator::new(|value| {
        if remainder("is_odd", value, 2)? == 0.0 {
            Err(ValidationError::invalid("must be odd"))
        } else {
            Ok(())
        }
    })
}
