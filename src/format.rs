//! Conversion of CLDR `{N}` placeholders to positional format specifiers.
//!
//! CLDR patterns use zero-based `{0}`, `{1}` ... placeholders. Consumers of
//! the generated data use one-based positional specifiers (`%1$s`), so a
//! literal `%` must be doubled on the way through.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{(\d+)\}").unwrap();
}

/// Converts a pattern such as `"{0} of {1}"` into `"%1$s of %2$s"`.
///
/// The conversion is not idempotent: running it twice doubles percent
/// signs again, so each field must be converted exactly once.
pub fn to_positional(pattern: &str) -> String {
    let escaped = pattern.replace('%', "%%");
    PLACEHOLDER_REGEX
        .replace_all(&escaped, |caps: &Captures| {
            match caps[1].parse::<u64>() {
                Ok(index) => format!("%{}$s", index + 1),
                // Out-of-range indexes are kept verbatim
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Applies [`to_positional`] to a string value; other values pass through.
pub fn convert_value(value: Value) -> Value {
    match value {
        Value::String(pattern) => Value::String(to_positional(&pattern)),
        other => other,
    }
}
