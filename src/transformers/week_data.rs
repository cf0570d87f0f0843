//! Supplemental week data (`weekData.json`).

use serde_json::Value;

use crate::{
    error::Error,
    tree::{self, Node, child_map_mut},
};

/// Weekday names in index order (Sunday is 0).
pub const WEEKDAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

const DROPPED: [&str; 3] = ["firstDay-alt-variant", "weekendStart", "weekendEnd"];

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    for value in child_map_mut(data, "minDays", file)?.values_mut() {
        *value = Value::from(parse_day_count(value)?);
    }
    for value in child_map_mut(data, "firstDay", file)?.values_mut() {
        *value = Value::from(weekday_index(value)?);
    }
    for key in DROPPED {
        tree::remove(data, key);
    }
    Ok(())
}

/// Parses a digit-only string such as `"4"`.
fn parse_day_count(value: &Value) -> Result<u64, Error> {
    let bad_number = || Error::InvalidNumber(value_text(value));
    let Value::String(text) = value else {
        return Err(bad_number());
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_number());
    }
    text.parse().map_err(|_| bad_number())
}

fn weekday_index(value: &Value) -> Result<usize, Error> {
    value
        .as_str()
        .and_then(|name| WEEKDAYS.iter().position(|day| *day == name))
        .ok_or_else(|| Error::UnknownEnum {
            kind: "weekday name",
            value: value_text(value),
        })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
