//! Field-level acceptance rules shared by the schemas.
//!
//! Each rule reads one key from an untyped candidate, records its violations
//! into a [`FieldErrors`] list and returns the typed value when the value has
//! the right shape. Range and length violations still return the value so
//! that cross-field checks can run on it.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use super::FieldErrors;

/// Untyped input object, as submitted by a form.
pub type Candidate = Map<String, Value>;

pub(crate) const REQUIRED: &str = "Required";
pub(crate) const INVALID_EMAIL: &str = "Invalid email address";

// Local part may not start with a dot or contain consecutive dots; those two
// constraints are checked outside the regex since `regex` has no lookahead.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Inclusive numeric range, optionally restricted to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRule {
    pub min: f64,
    pub max: f64,
    pub integer: bool,
}

impl NumberRule {
    pub const fn integer(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            integer: true,
        }
    }

    pub const fn decimal(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            integer: false,
        }
    }
}

/// Returns true when `address` matches the accepted email grammar.
pub fn is_valid_email(address: &str) -> bool {
    !address.starts_with('.') && !address.contains("..") && EMAIL_PATTERN.is_match(address)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{}", bound as i64)
    } else {
        format!("{}", bound)
    }
}

/// Reads a required string.
pub(crate) fn string<'a>(
    candidate: &'a Candidate,
    key: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match candidate.get(key) {
        None => {
            errors.push(key, REQUIRED);
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.push(
                key,
                format!("Expected string, received {}", type_name(other)),
            );
            None
        }
    }
}

/// Reads a required string of at least `min` characters.
pub(crate) fn min_chars(
    candidate: &Candidate,
    key: &str,
    min: usize,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = string(candidate, key, errors)?;
    if value.chars().count() < min {
        errors.push(key, message);
    }
    Some(value.to_string())
}

/// Reads a required email address.
pub(crate) fn email(candidate: &Candidate, key: &str, errors: &mut FieldErrors) -> Option<String> {
    let value = string(candidate, key, errors)?;
    if !is_valid_email(value) {
        errors.push(key, INVALID_EMAIL);
    }
    Some(value.to_string())
}

/// Converts loosely-typed input to a number the way form inputs are coerced:
/// blank text and `null` become 0, booleans 1/0, anything unparseable NaN.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// Reads a number (string or numeric input) and checks it against `rule`.
pub(crate) fn coerced_number(
    candidate: &Candidate,
    key: &str,
    rule: NumberRule,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let n = coerce_number(candidate.get(key));
    if n.is_nan() {
        errors.push(key, "Expected number, received nan");
        return None;
    }
    if rule.integer && n.fract() != 0.0 {
        errors.push(key, "Expected integer, received float");
    }
    if n < rule.min {
        errors.push(
            key,
            format!(
                "Number must be greater than or equal to {}",
                format_bound(rule.min)
            ),
        );
    }
    if n > rule.max {
        errors.push(
            key,
            format!(
                "Number must be less than or equal to {}",
                format_bound(rule.max)
            ),
        );
    }
    Some(n)
}

/// Reads one value of a closed string enumeration.
pub(crate) fn one_of<T>(candidate: &Candidate, key: &str, errors: &mut FieldErrors) -> Option<T>
where
    T: FromStr + IntoEnumIterator + AsRef<str>,
{
    let expected = T::iter()
        .map(|v| format!("'{}'", v.as_ref()))
        .collect::<Vec<_>>()
        .join(" | ");

    match candidate.get(key) {
        None => {
            errors.push(key, REQUIRED);
            None
        }
        Some(Value::String(s)) => match T::from_str(s) {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(
                    key,
                    format!("Invalid enum value. Expected {}, received '{}'", expected, s),
                );
                None
            }
        },
        Some(other) => {
            errors.push(
                key,
                format!("Expected {}, received {}", expected, type_name(other)),
            );
            None
        }
    }
}

/// Reads an optional boolean that defaults to `false` when absent.
pub(crate) fn flag(candidate: &Candidate, key: &str, errors: &mut FieldErrors) -> Option<bool> {
    match candidate.get(key) {
        None => Some(false),
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            errors.push(
                key,
                format!("Expected boolean, received {}", type_name(other)),
            );
            None
        }
    }
}
