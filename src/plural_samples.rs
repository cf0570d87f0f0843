//! Sample numbers attached to plural rules (`@integer ...`, `@decimal ...`).
//!
//! Samples are not used to check the compiled conditions; they are shipped
//! as test fixtures so the runtime consumer can verify its own evaluation.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::plural_rules::RuleError;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^[+-]?\d+$").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?\d+\.\d+$").unwrap();
    static ref INTEGER_RANGE: Regex = Regex::new(r"^([+-]?\d+)~([+-]?\d+)$").unwrap();
    static ref DECIMAL_RANGE: Regex =
        Regex::new(r"^([+-]?\d+(?:\.\d+)?)~([+-]?\d+(?:\.\d+)?)$").unwrap();
}

const ELLIPSIS: &str = "…";

/// One sample value: its literal text and, for integers, its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub text: String,
    pub integer: Option<i64>,
}

impl Sample {
    fn integer(text: &str) -> Result<Self, RuleError> {
        let value = text
            .trim_start_matches('+')
            .parse()
            .map_err(|_| RuleError::ExampleToken(text.to_string()))?;
        Ok(Sample {
            text: text.to_string(),
            integer: Some(value),
        })
    }

    fn decimal(text: &str) -> Self {
        Sample {
            text: text.to_string(),
            integer: None,
        }
    }
}

/// Parses one `@`-section, e.g. `"integer 0, 2~16, 100, …"`.
///
/// Ranges contribute their two end points; the trailing ellipsis marks an
/// open-ended list and is dropped.
pub fn parse_sample_section(section: &str) -> Result<Vec<Sample>, RuleError> {
    let section = section.trim();
    let (tag, values) = section.split_once(' ').unwrap_or((section, ""));
    if tag != "integer" && tag != "decimal" {
        return Err(RuleError::ExampleToken(format!("@{}", tag)));
    }
    let values = values.trim();
    let values = values.strip_suffix(", …").unwrap_or(values);

    let mut samples = Vec::new();
    for token in values.split(", ").map(str::trim) {
        if token == ELLIPSIS || token.is_empty() {
            continue;
        }
        if INTEGER.is_match(token) {
            samples.push(Sample::integer(token)?);
        } else if DECIMAL.is_match(token) {
            samples.push(Sample::decimal(token));
        } else if let Some(caps) = INTEGER_RANGE.captures(token) {
            samples.push(Sample::integer(&caps[1])?);
            samples.push(Sample::integer(&caps[2])?);
        } else if let Some(caps) = DECIMAL_RANGE.captures(token) {
            samples.push(Sample::decimal(&caps[1]));
            samples.push(Sample::decimal(&caps[2]));
        } else {
            return Err(RuleError::ExampleToken(token.to_string()));
        }
    }
    Ok(samples)
}

/// Flattens samples for the fixture file: each sample's text, followed by
/// its integer value when it has one.
pub fn samples_to_json(samples: &[Sample]) -> Value {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        out.push(Value::String(sample.text.clone()));
        if let Some(value) = sample.integer {
            out.push(Value::from(value));
        }
    }
    Value::Array(out)
}
