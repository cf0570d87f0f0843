//! Root-path descent into CLDR documents.
//!
//! Every CLDR JSON file wraps its payload in a chain of single-key maps
//! (`main` → locale → `dates` → ...). Known metadata siblings such as
//! `identity` or `version` are pruned before asserting that exactly one key
//! remains at each level.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    error::Error,
    tree::{Node, key_list},
};

/// Keys to delete before the one-key check, indexed by the `/`-joined path
/// prefix at which they appear (the top level is the empty prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSet {
    entries: BTreeMap<String, Vec<String>>,
}

impl PruneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `keys` to the entry for `path`.
    pub fn with<I, S>(mut self, path: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(path.into())
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// Keys pruned at `path`.
    pub fn keys_at(&self, path: &str) -> &[String] {
        self.entries.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Descends `data` along `roots`, returning the map found at the end.
///
/// At each level the keys listed in `prune` for the current prefix are
/// removed; the remaining map must then hold exactly the next root.
pub fn descend<S: AsRef<str>>(
    data: Value,
    roots: &[S],
    prune: &PruneSet,
    file: &str,
) -> Result<Node, Error> {
    let mut data = data;
    let mut path = String::new();
    for root in roots {
        let root = root.as_ref();
        let Value::Object(mut node) = data else {
            return Err(Error::structural(file, &path, "decoded data should be a map"));
        };
        for key in prune.keys_at(&path) {
            node.shift_remove(key.as_str());
        }
        if node.len() != 1 || !node.contains_key(root) {
            return Err(Error::structural(
                file,
                &path,
                format!(
                    "expected a map with the sole key '{}', keys found: {}",
                    root,
                    key_list(&node)
                ),
            ));
        }
        data = node.shift_remove(root).unwrap_or(Value::Null);
        path.push('/');
        path.push_str(root);
    }
    match data {
        Value::Object(node) => Ok(node),
        _ => Err(Error::structural(file, &path, "decoded data should be a map")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn main_prune(locale: &str) -> PruneSet {
        PruneSet::new().with(format!("/main/{}", locale), ["identity"])
    }

    #[test]
    fn test_descend_prunes_identity() {
        let data = json!({
            "main": {
                "en": {
                    "identity": {"version": {"_number": "1"}},
                    "units": {"long": {}}
                }
            }
        });
        let roots = ["main", "en", "units"];
        let node = descend(data, &roots, &main_prune("en"), "units.json").unwrap();
        assert!(node.contains_key("long"));
    }

    #[test]
    fn test_descend_rejects_extra_sibling() {
        let data = json!({"main": {"en": {"units": {}, "extra": {}}}});
        let roots = ["main", "en", "units"];
        let err = descend(data, &roots, &main_prune("en"), "units.json").unwrap_err();
        match err {
            Error::StructuralMismatch { file, path, detail } => {
                assert_eq!(file, "units.json");
                assert_eq!(path, "/main/en");
                assert!(detail.contains("units, extra"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_descend_rejects_wrong_key() {
        let data = json!({"supplemental": {"weekData": {}}});
        let roots = ["supplemental", "plurals-type-cardinal"];
        let err = descend(data, &roots, &PruneSet::new(), "plurals.json").unwrap_err();
        assert!(matches!(
            err,
            Error::StructuralMismatch { ref path, .. } if path == "/supplemental"
        ));
    }

    #[test]
    fn test_descend_rejects_scalar_leaf() {
        let data = json!({"supplemental": {"version": "25"}});
        let roots = ["supplemental", "version"];
        let err = descend(data, &roots, &PruneSet::new(), "x.json").unwrap_err();
        assert!(matches!(
            err,
            Error::StructuralMismatch { ref path, .. } if path == "/supplemental/version"
        ));
    }

    #[test]
    fn test_descend_rejects_non_map_root() {
        let err = descend(json!([1, 2]), &["main"], &PruneSet::new(), "x.json").unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch { ref path, .. } if path.is_empty()));
    }

    #[test]
    fn test_prune_applies_only_at_its_level() {
        let prune = PruneSet::new().with("/supplemental", ["version", "generation"]);
        let data = json!({
            "version": "top-level is not pruned",
            "supplemental": {"version": {}, "generation": {}, "weekData": {}}
        });
        assert!(descend(data, &["supplemental", "weekData"], &prune, "weekData.json").is_err());

        let data = json!({"supplemental": {
            "version": {},
            "generation": {},
            "weekData": {"minDays": {}}
        }});
        let node = descend(data, &["supplemental", "weekData"], &prune, "weekData.json").unwrap();
        assert!(node.contains_key("minDays"));
    }

    #[test]
    fn test_empty_roots_returns_document() {
        let data = json!({"a": 1, "b": 2});
        let node = descend(data, &[] as &[&str], &PruneSet::new(), "x.json").unwrap();
        assert_eq!(node.len(), 2);
    }
}
