//! Locale display patterns (`localeDisplayNames.json`).

use crate::{
    error::Error,
    format::convert_value,
    tree::{self, Node, child_map_mut},
};

/// Sections that must exist and hold only patterns.
const PATTERN_SECTIONS: [&str; 2] = ["localeDisplayPattern", "codePatterns"];

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    for section in PATTERN_SECTIONS {
        tree::map_values(child_map_mut(data, section, file)?, convert_value);
    }
    Ok(())
}
