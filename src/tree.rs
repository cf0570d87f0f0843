//! The in-memory JSON tree shared by source and destination documents.
//!
//! CLDR documents have no fixed schema, so the pipeline works on
//! [`serde_json::Value`] (built with `preserve_order`, so maps keep their
//! insertion order) and uses the accessors below to assert the narrow shape
//! each transformation expects.

use std::{fs, path::Path};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::error::Error;

/// A JSON tree (map, list, string, number or boolean).
pub type Tree = Value;

/// A JSON object with insertion order preserved.
pub type Node = Map<String, Value>;

/// Reads and decodes a JSON document from `path`.
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<Tree, Error> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes `value` as JSON text. Pretty output uses a four-space indent.
pub fn to_json<T: Serialize>(value: &T, pretty: bool, file: &str) -> Result<String, Error> {
    let to_error = |source| Error::Serialization {
        file: file.to_string(),
        source,
    };
    if !pretty {
        return serde_json::to_string(value).map_err(to_error);
    }
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer).map_err(to_error)?;
    String::from_utf8(buffer).map_err(|source| Error::Encoding {
        file: file.to_string(),
        source,
    })
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), Error> {
    let path = path.as_ref();
    let to_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if path.is_file() {
        fs::remove_file(path).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(to_error)
}

/// Returns a snapshot of the keys of `node`, so the node can be mutated
/// while walking them.
pub fn keys(node: &Node) -> Vec<String> {
    node.keys().cloned().collect()
}

/// Returns the keys of `node` joined by `", "`, for error messages.
pub fn key_list(node: &Node) -> String {
    node.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Returns true when `node` holds exactly the keys in `expected`, in order.
pub fn has_exact_keys(node: &Node, expected: &[&str]) -> bool {
    node.len() == expected.len() && node.keys().zip(expected).all(|(k, e)| k == e)
}

/// Borrows the child map stored under `key`.
///
/// Fails with [`Error::MissingNode`] when the key is absent and with
/// [`Error::StructuralMismatch`] when the child is not a map.
pub fn child_map_mut<'a>(node: &'a mut Node, key: &str, file: &str) -> Result<&'a mut Node, Error> {
    match node.get_mut(key) {
        Some(Value::Object(child)) => Ok(child),
        Some(_) => Err(Error::structural(file, key, "expected a map")),
        None => Err(Error::missing_node(file, key)),
    }
}

/// Removes `key` from `node` without disturbing the order of the others.
pub fn remove(node: &mut Node, key: &str) -> Option<Value> {
    node.shift_remove(key)
}

/// Moves the value under `from` to `to`, appending it at the end of the
/// map. Returns false when `from` is absent.
pub fn rename_key(node: &mut Node, from: &str, to: &str) -> bool {
    match node.shift_remove(from) {
        Some(value) => {
            node.insert(to.to_string(), value);
            true
        }
        None => false,
    }
}

/// Replaces every value of `node` with `f(value)`.
pub fn map_values(node: &mut Node, mut f: impl FnMut(Value) -> Value) {
    for value in node.values_mut() {
        *value = f(value.take());
    }
}
