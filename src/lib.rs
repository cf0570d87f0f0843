//! Build-time transformation of CLDR JSON data into compact runtime files.
//!
//! The pipeline reads a fixed catalog of CLDR documents, descends each one
//! to its payload, rewrites it into the destination schema, and writes one
//! JSON file per locale and per supplemental dataset. Plural rules are
//! compiled into `sprintf`-style condition templates, and their sample values are
//! written out as test fixtures.
//!
//! ```no_run
//! use cldrpack::{BuildConfig, pipeline};
//!
//! let config = BuildConfig::new(".").with_pretty(true);
//! let report = pipeline::run(&config)?;
//! println!("{} locales", report.locales);
//! # Ok::<(), cldrpack::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod navigator;
pub mod pipeline;
pub mod plural_rules;
pub mod plural_samples;
pub mod transformers;
pub mod tree;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{FileDescriptor, FileKind, catalog},
    config::{BuildConfig, Dataset},
    error::Error,
    fetch::{ArchiveFetcher, HttpFetcher},
    format::to_positional,
    navigator::{PruneSet, descend},
    pipeline::{BuildReport, run, run_with_fetcher},
    plural_rules::{PluralCategory, PluralOperands, PluralRule, PluralRuleSet},
    transformers::Transform,
    tree::{Node, Tree},
};
