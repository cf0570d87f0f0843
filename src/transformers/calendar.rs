//! Gregorian calendar (`ca-gregorian.json`, saved as `calendar.json`).

use crate::{
    error::Error,
    format::convert_value,
    tree::{self, Node, child_map_mut},
};

/// Bulk sub-maps of `dateTimeFormats` that are not shipped.
const DROPPED_DATE_TIME_FORMATS: [&str; 3] = ["availableFormats", "appendItems", "intervalFormats"];

const ERA_RENAMES: [(&str, &str); 3] = [
    ("eraNames", "wide"),
    ("eraAbbr", "abbreviated"),
    ("eraNarrow", "narrow"),
];

pub fn transform(data: &mut Node, file: &str) -> Result<(), Error> {
    let formats = child_map_mut(data, "dateTimeFormats", file)?;
    for key in DROPPED_DATE_TIME_FORMATS {
        tree::remove(formats, key);
    }
    tree::map_values(formats, convert_value);

    let eras = child_map_mut(data, "eras", file)?;
    for (from, to) in ERA_RENAMES {
        tree::rename_key(eras, from, to);
    }
    Ok(())
}
