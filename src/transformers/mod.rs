//! Per-file rewrites from the CLDR layout to the destination schema.
//!
//! Each transformer receives the map returned by
//! [`navigator::descend`](crate::navigator::descend) and rewrites it in
//! place, failing fast on any shape it does not recognize.

use crate::{error::Error, tree::Node};

pub mod calendar;
pub mod list_patterns;
pub mod locale_display_names;
pub mod meta_zones;
pub mod plurals;
pub mod territory_containment;
pub mod time_zone_names;
pub mod units;
pub mod week_data;

/// The transformation registered for an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Copied unchanged after root descent.
    Passthrough,
    Calendar,
    WeekData,
    TerritoryContainment,
    MetaZones,
    TimeZoneNames,
    ListPatterns,
    Units,
    LocaleDisplayNames,
    Plurals,
}

/// Extra artifacts produced next to the destination file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outputs {
    /// Test fixture data, written under the fixtures directory with the
    /// destination file's basename.
    pub fixture: Option<Node>,
}

impl Transform {
    /// Rewrites `data` in place. `file` names the destination file in errors.
    pub fn apply(self, data: &mut Node, file: &str) -> Result<Outputs, Error> {
        match self {
            Transform::Passthrough => {}
            Transform::Calendar => calendar::transform(data, file)?,
            Transform::WeekData => week_data::transform(data, file)?,
            Transform::TerritoryContainment => territory_containment::transform(data, file)?,
            Transform::MetaZones => meta_zones::transform(data, file)?,
            Transform::TimeZoneNames => time_zone_names::transform(data),
            Transform::ListPatterns => list_patterns::transform(data, file)?,
            Transform::Units => units::transform(data, file)?,
            Transform::LocaleDisplayNames => locale_display_names::transform(data, file)?,
            Transform::Plurals => {
                let fixture = plurals::transform(data, file)?;
                return Ok(Outputs {
                    fixture: Some(fixture),
                });
            }
        }
        Ok(Outputs::default())
    }
}
