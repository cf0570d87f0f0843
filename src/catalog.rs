//! The static registry of files copied out of the CLDR archive.

use std::fmt::{Display, Formatter};

use crate::{navigator::PruneSet, transformers::Transform};

/// Where a source file lives in the archive and where its output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Per-locale data under `main/<locale>/`, written to `<dest>/<locale>/`.
    Main,
    /// Shared data under `supplemental/`, written to the destination root.
    Supplemental,
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Main => write!(f, "main"),
            FileKind::Supplemental => write!(f, "supplemental"),
        }
    }
}

/// Describes one output file: its source, the root path to descend, and the
/// transformation applied to the subtree found there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDescriptor {
    pub source: &'static str,
    pub kind: FileKind,
    /// Root path below the standard prefix (`main/<locale>` for main files).
    pub roots: &'static [&'static str],
    pub save_as: Option<&'static str>,
    pub transform: Transform,
}

impl FileDescriptor {
    /// File name used in the destination directory.
    pub fn destination_name(&self) -> &'static str {
        self.save_as.unwrap_or(self.source)
    }

    /// Full root path, including the `main/<locale>` prefix for main files.
    pub fn root_path(&self, locale: &str) -> Vec<String> {
        let prefix: Vec<&str> = match self.kind {
            FileKind::Main => vec!["main", locale],
            FileKind::Supplemental => Vec::new(),
        };
        prefix
            .into_iter()
            .chain(self.roots.iter().copied())
            .map(str::to_string)
            .collect()
    }

    /// Metadata keys pruned while descending.
    pub fn prune_set(&self, locale: &str) -> PruneSet {
        match self.kind {
            FileKind::Main => PruneSet::new().with(format!("/main/{}", locale), ["identity"]),
            FileKind::Supplemental => {
                PruneSet::new().with("/supplemental", ["version", "generation"])
            }
        }
    }
}

const fn main(
    source: &'static str,
    roots: &'static [&'static str],
    transform: Transform,
) -> FileDescriptor {
    FileDescriptor {
        source,
        kind: FileKind::Main,
        roots,
        save_as: None,
        transform,
    }
}

const fn supplemental(
    source: &'static str,
    roots: &'static [&'static str],
    transform: Transform,
) -> FileDescriptor {
    FileDescriptor {
        source,
        kind: FileKind::Supplemental,
        roots,
        save_as: None,
        transform,
    }
}

static CATALOG: [FileDescriptor; 14] = [
    FileDescriptor {
        save_as: Some("calendar.json"),
        ..main(
            "ca-gregorian.json",
            &["dates", "calendars", "gregorian"],
            Transform::Calendar,
        )
    },
    main(
        "timeZoneNames.json",
        &["dates", "timeZoneNames"],
        Transform::TimeZoneNames,
    ),
    main("listPatterns.json", &["listPatterns"], Transform::ListPatterns),
    main("units.json", &["units"], Transform::Units),
    main("dateFields.json", &["dates", "fields"], Transform::Passthrough),
    main(
        "languages.json",
        &["localeDisplayNames", "languages"],
        Transform::Passthrough,
    ),
    main(
        "territories.json",
        &["localeDisplayNames", "territories"],
        Transform::Passthrough,
    ),
    main(
        "localeDisplayNames.json",
        &["localeDisplayNames"],
        Transform::LocaleDisplayNames,
    ),
    supplemental(
        "weekData.json",
        &["supplemental", "weekData"],
        Transform::WeekData,
    ),
    supplemental(
        "parentLocales.json",
        &["supplemental", "parentLocales", "parentLocale"],
        Transform::Passthrough,
    ),
    supplemental(
        "likelySubtags.json",
        &["supplemental", "likelySubtags"],
        Transform::Passthrough,
    ),
    supplemental(
        "territoryContainment.json",
        &["supplemental", "territoryContainment"],
        Transform::TerritoryContainment,
    ),
    supplemental(
        "metaZones.json",
        &["supplemental", "metaZones"],
        Transform::MetaZones,
    ),
    supplemental(
        "plurals.json",
        &["supplemental", "plurals-type-cardinal"],
        Transform::Plurals,
    ),
];

/// All registered files, main files first.
pub fn catalog() -> &'static [FileDescriptor] {
    &CATALOG
}

/// Registered files of the given kind.
pub fn files_of_kind(kind: FileKind) -> impl Iterator<Item = &'static FileDescriptor> {
    CATALOG.iter().filter(move |d| d.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_is_renamed() {
        let calendar = catalog()
            .iter()
            .find(|d| d.source == "ca-gregorian.json")
            .unwrap();
        assert_eq!(calendar.destination_name(), "calendar.json");
        assert_eq!(calendar.transform, Transform::Calendar);
    }

    #[test]
    fn test_main_root_path_is_prefixed() {
        let units = catalog().iter().find(|d| d.source == "units.json").unwrap();
        assert_eq!(units.root_path("de"), vec!["main", "de", "units"]);
        assert_eq!(units.prune_set("de").keys_at("/main/de"), ["identity"]);
    }

    #[test]
    fn test_supplemental_root_path_is_not_prefixed() {
        let plurals = catalog().iter().find(|d| d.source == "plurals.json").unwrap();
        assert_eq!(
            plurals.root_path("en"),
            vec!["supplemental", "plurals-type-cardinal"]
        );
        assert_eq!(
            plurals.prune_set("en").keys_at("/supplemental"),
            ["version", "generation"]
        );
    }

    #[test]
    fn test_destination_names_are_unique_per_kind() {
        for kind in [FileKind::Main, FileKind::Supplemental] {
            let mut names: Vec<_> = files_of_kind(kind).map(|d| d.destination_name()).collect();
            let count = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), count, "duplicate destination in {kind}");
        }
    }

    #[test]
    fn test_kind_counts() {
        assert_eq!(files_of_kind(FileKind::Main).count(), 8);
        assert_eq!(files_of_kind(FileKind::Supplemental).count(), 6);
    }
}
