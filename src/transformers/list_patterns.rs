//! List patterns (`listPatterns.json`).
//!
//! `listPattern-type-<X>` keys are renamed to `<X>` and every pattern in
//! them is converted to positional format.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::Error,
    format::convert_value,
    tree::{self, Node},
};

lazy_static! {
    static ref LIST_PATTERN_KEY: Regex = Regex::new(r"^listPattern-type-(.+)$").unwrap();
}

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    for key in tree::keys(data) {
        let invalid = || Error::InvalidNode {
            file: file.to_string(),
            node: key.clone(),
        };
        let name = LIST_PATTERN_KEY
            .captures(&key)
            .map(|caps| caps[1].to_string())
            .ok_or_else(invalid)?;
        let mut patterns = match tree::remove(data, &key) {
            Some(Value::Object(patterns)) => patterns,
            _ => return Err(invalid()),
        };
        tree::map_values(&mut patterns, convert_value);
        data.insert(name, Value::Object(patterns));
    }
    Ok(())
}
