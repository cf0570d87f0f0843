//! Measurement units (`units.json`).
//!
//! Source layout per width:
//!
//! ```json
//! {"long": {"length-meter": {"unitPattern-count-one": "{0} meter"}, "per": {"compoundUnitPattern": "{0} per {1}"}}}
//! ```
//!
//! Destination layout:
//!
//! ```json
//! {"long": {"length": {"meter": {"one": "%1$s meter"}}, "_compoundPattern": "%1$s per %2$s"}}
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::Error,
    format::convert_value,
    tree::{self, Node},
};

lazy_static! {
    static ref UNIT_KEY: Regex = Regex::new(r"^(\w+)-(.+)$").unwrap();
    static ref PLURAL_KEY: Regex = Regex::new(r"^unitPattern-count-(.+)$").unwrap();
    static ref DURATION_KEY: Regex = Regex::new(r"^durationUnit-type-(.+)$").unwrap();
}

const WIDTHS: [&str; 3] = ["long", "short", "narrow"];

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    for key in tree::keys(data) {
        if WIDTHS.contains(&key.as_str()) {
            let Some(Value::Object(width)) = data.get_mut(&key) else {
                return Err(invalid(file, &key));
            };
            transform_width(width, &key, file)?;
        } else if let Some(caps) = DURATION_KEY.captures(&key) {
            let duration_type = caps[1].to_string();
            let pattern = match tree::remove(data, &key) {
                Some(Value::Object(mut node))
                    if tree::has_exact_keys(&node, &["durationUnitPattern"]) =>
                {
                    tree::remove(&mut node, "durationUnitPattern").unwrap_or(Value::Null)
                }
                _ => return Err(invalid(file, &key)),
            };
            let durations = data
                .entry("_durationPattern")
                .or_insert_with(|| Value::Object(Node::new()));
            if let Value::Object(durations) = durations {
                durations.insert(duration_type, pattern);
            }
        } else {
            return Err(invalid(file, &key));
        }
    }
    Ok(())
}

fn transform_width(width: &mut Node, width_name: &str, file: &str) -> Result<(), Error> {
    for unit_key in tree::keys(width) {
        let node_path = format!("{}/{}", width_name, unit_key);
        let Some(Value::Object(mut unit)) = tree::remove(width, &unit_key) else {
            return Err(invalid(file, &node_path));
        };

        if unit_key == "per" {
            if !tree::has_exact_keys(&unit, &["compoundUnitPattern"]) {
                return Err(invalid(file, &node_path));
            }
            let pattern = tree::remove(&mut unit, "compoundUnitPattern").unwrap_or(Value::Null);
            width.insert("_compoundPattern".to_string(), convert_value(pattern));
            continue;
        }

        let caps = UNIT_KEY
            .captures(&unit_key)
            .ok_or_else(|| invalid(file, &node_path))?;
        let (kind, name) = (caps[1].to_string(), caps[2].to_string());

        let mut patterns = Node::new();
        for (count_key, pattern) in unit {
            let Some(count) = PLURAL_KEY.captures(&count_key) else {
                return Err(invalid(file, &format!("{}/{}", node_path, count_key)));
            };
            patterns.insert(count[1].to_string(), convert_value(pattern));
        }

        let kind_node = nested_map(width, &kind).ok_or_else(|| invalid(file, &node_path))?;
        let name_node = nested_map(kind_node, &name).ok_or_else(|| invalid(file, &node_path))?;
        name_node.extend(patterns);
    }
    Ok(())
}

/// Returns the map under `key`, creating it when absent. `None` when the
/// key already holds something else.
fn nested_map<'a>(node: &'a mut Node, key: &str) -> Option<&'a mut Node> {
    node.entry(key)
        .or_insert_with(|| Value::Object(Node::new()))
        .as_object_mut()
}

fn invalid(file: &str, node: &str) -> Error {
    Error::InvalidUnitNode {
        file: file.to_string(),
        node: node.to_string(),
    }
}
