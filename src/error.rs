//! All error types for the cldrpack crate.
//!
//! Every variant is fatal to a build run: the pipeline stops at the first
//! error and the driver reports it once.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid data in {file}: {detail} (path: {path})")]
    StructuralMismatch {
        file: String,
        path: String,
        detail: String,
    },

    #[error("bad number: {0}")]
    InvalidNumber(String),

    #[error("unknown {kind}: {value}")]
    UnknownEnum { kind: &'static str, value: String },

    #[error("invalid metazoneInfo node in {file}: {detail}")]
    InvalidMetazoneNode { file: String, detail: String },

    #[error("invalid node '{node}' in {file}")]
    InvalidUnitNode { file: String, node: String },

    #[error("invalid node '{node}' in {file}")]
    InvalidNode { file: String, node: String },

    #[error("missing node '{node}' in {file}")]
    MissingNode { file: String, node: String },

    #[error("invalid example token '{token}' for '{key}' in {file}")]
    InvalidExampleToken {
        file: String,
        key: String,
        token: String,
    },

    #[error("dangling range in rule '{key}' of {file}: {rule}")]
    DanglingRange {
        file: String,
        key: String,
        rule: String,
    },

    #[error("invalid plural rule '{key}' in {file}: {reason} (rule: {rule})")]
    InvalidPluralRule {
        file: String,
        key: String,
        rule: String,
        reason: String,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode data in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize data of {file}: {source}")]
    Serialization {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialized data of {file} is not valid UTF-8: {source}")]
    Encoding {
        file: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed write to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("extracting {} failed: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a structural mismatch error for `file` at `path`.
    pub fn structural(
        file: impl Into<String>,
        path: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Error::StructuralMismatch {
            file: file.into(),
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Creates a missing node error.
    pub fn missing_node(file: impl Into<String>, node: impl Into<String>) -> Self {
        Error::MissingNode {
            file: file.into(),
            node: node.into(),
        }
    }

    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_structural_mismatch_names_file_and_path() {
        let error = Error::structural("units.json", "/main/en", "expected a map");
        let display = error.to_string();
        assert!(display.contains("units.json"));
        assert!(display.contains("/main/en"));
        assert!(display.contains("expected a map"));
    }

    #[test]
    fn test_invalid_number_error() {
        let error = Error::InvalidNumber("x".to_string());
        assert_eq!(error.to_string(), "bad number: x");
    }

    #[test]
    fn test_unknown_enum_error() {
        let error = Error::UnknownEnum {
            kind: "weekday name",
            value: "xyz".to_string(),
        };
        assert_eq!(error.to_string(), "unknown weekday name: xyz");
    }

    #[test]
    fn test_file_not_found_error() {
        let error = Error::FileNotFound(PathBuf::from("main/en/units.json"));
        assert!(error.to_string().contains("main/en/units.json"));
    }

    #[test]
    fn test_write_error_keeps_source() {
        let error = Error::Write {
            path: PathBuf::from("out.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.to_string().contains("out.json"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_encoding_error_names_file() {
        let source = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let error = Error::Encoding {
            file: "units.json".to_string(),
            source,
        };
        assert!(error.to_string().contains("units.json"));
        assert!(error.to_string().contains("UTF-8"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error_from() {
        let error: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation_error("Validation failed");
        assert_eq!(error.to_string(), "validation error: Validation failed");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::missing_node("localeDisplayNames.json", "codePatterns");
        let debug = format!("{:?}", error);
        assert!(debug.contains("MissingNode"));
        assert!(debug.contains("codePatterns"));
    }
}
