//! Supplemental metazone mapping (`metaZones.json`).
//!
//! `metazoneInfo.timezone` nests zone names up to three levels deep
//! (`America` → `Argentina` → `Buenos_Aires`). Each zone ends in a list of
//! `{"usesMetazone": {"_mzone", "_from", "_to"}}` periods, which are
//! unwrapped to `{"mzone", "from", "to"}`.

use serde_json::Value;

use crate::{
    error::Error,
    tree::{self, Node, child_map_mut},
};

/// Named levels allowed above a period list.
const MAX_DEPTH: usize = 3;

const PERIOD_KEYS: [&str; 3] = ["_mzone", "_from", "_to"];

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    let info = child_map_mut(data, "metazoneInfo", file)?;
    if !tree::has_exact_keys(info, &["timezone"]) {
        return Err(invalid(
            file,
            format!("expected the sole key 'timezone', found: {}", tree::key_list(info)),
        ));
    }
    let zones = match tree::remove(info, "timezone") {
        Some(Value::Object(zones)) => zones,
        _ => return Err(invalid(file, "'timezone' should be a map")),
    };
    let mut fixed = Node::new();
    for (id, zone) in zones {
        let zone = fix_zone(zone, 1, &id, file)?;
        fixed.insert(id, zone);
    }
    data.insert("metazoneInfo".to_string(), Value::Object(fixed));
    Ok(())
}

/// Walks one zone subtree. Lists hold periods; maps hold nested zone names.
fn fix_zone(node: Value, depth: usize, path: &str, file: &str) -> Result<Value, Error> {
    match node {
        Value::Array(periods) => periods
            .into_iter()
            .map(|period| fix_period(period, path, file))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(children) if depth < MAX_DEPTH => {
            let mut fixed = Node::new();
            for (id, child) in children {
                let child_path = format!("{}/{}", path, id);
                fixed.insert(id, fix_zone(child, depth + 1, &child_path, file)?);
            }
            Ok(Value::Object(fixed))
        }
        Value::Object(_) => Err(invalid(file, format!("'{}' is nested too deeply", path))),
        _ => Err(invalid(file, format!("'{}' should be a list or a map", path))),
    }
}

fn fix_period(period: Value, path: &str, file: &str) -> Result<Value, Error> {
    let Value::Object(mut period) = period else {
        return Err(invalid(file, format!("period of '{}' should be a map", path)));
    };
    if !tree::has_exact_keys(&period, &["usesMetazone"]) {
        return Err(invalid(
            file,
            format!(
                "period of '{}' should hold only 'usesMetazone', found: {}",
                path,
                tree::key_list(&period)
            ),
        ));
    }
    let Some(Value::Object(uses)) = tree::remove(&mut period, "usesMetazone") else {
        return Err(invalid(file, format!("'usesMetazone' of '{}' should be a map", path)));
    };
    let mut fixed = Node::new();
    for (key, value) in uses {
        if !PERIOD_KEYS.contains(&key.as_str()) {
            return Err(invalid(
                file,
                format!("unexpected key '{}' in a period of '{}'", key, path),
            ));
        }
        fixed.insert(key[1..].to_string(), value);
    }
    Ok(Value::Object(fixed))
}

fn invalid(file: &str, detail: impl Into<String>) -> Error {
    Error::InvalidMetazoneNode {
        file: file.to_string(),
        detail: detail.into(),
    }
}
