//! Supplemental territory containment (`territoryContainment.json`).

use serde_json::Value;

use crate::{
    error::Error,
    tree::{self, Node},
};

/// Marks alternate groupings such as `EU-status-grouping`.
const STATUS_QUALIFIER: &str = "-status-";

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    for key in tree::keys(data) {
        if key.contains(STATUS_QUALIFIER) {
            tree::remove(data, &key);
            continue;
        }
        let Some(Value::Object(group)) = data.get_mut(&key) else {
            return Err(Error::InvalidNode {
                file: file.to_string(),
                node: key,
            });
        };
        tree::remove(group, "_grouping");
        tree::rename_key(group, "_contains", "contains");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_groups_are_normalized() {
        let mut data = json!({
            "001": {"_contains": ["019", "002"]},
            "EU": {"_contains": ["AT", "BE"], "_grouping": "true"},
            "EU-status-grouping": {"_contains": ["AT"]},
            "QO": {"_contains": ["AQ"]}
        })
        .as_object()
        .cloned()
        .unwrap();
        transform(&mut data, "territoryContainment.json").unwrap();
        assert_eq!(
            serde_json::Value::Object(data),
            json!({
                "001": {"contains": ["019", "002"]},
                "EU": {"contains": ["AT", "BE"]},
                "QO": {"contains": ["AQ"]}
            })
        );
    }

    #[test]
    fn test_non_map_group_fails() {
        let mut data = json!({"001": "019"}).as_object().cloned().unwrap();
        let err = transform(&mut data, "territoryContainment.json").unwrap_err();
        assert!(matches!(err, Error::InvalidNode { ref node, .. } if node == "001"));
    }
}
