//! Build configuration, passed explicitly through the pipeline.

use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Which CLDR JSON distribution to build from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dataset {
    /// The modern-coverage archive.
    #[default]
    Modern,
    /// The full archive, covering every locale.
    Full,
}

impl Dataset {
    /// Archive file name inside the source directory.
    pub fn archive_name(&self) -> &'static str {
        match self {
            Dataset::Modern => "data.zip",
            Dataset::Full => "data_full.zip",
        }
    }

    /// Directory the archive is extracted to, inside the source directory.
    pub fn directory_name(&self) -> &'static str {
        match self {
            Dataset::Modern => "data",
            Dataset::Full => "data_full",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Dataset::Modern => "http://www.unicode.org/Public/cldr/25/json.zip",
            Dataset::Full => "http://unicode.org/Public/cldr/25/json_full.zip",
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::Modern => write!(f, "modern"),
            Dataset::Full => write!(f, "full"),
        }
    }
}

/// Settings for one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Holds the downloaded archive and its extracted contents.
    pub source_dir: PathBuf,
    /// Receives per-locale directories and supplemental files. Wiped on
    /// every run.
    pub destination_dir: PathBuf,
    /// Receives the plural-rule test fixtures.
    pub fixtures_dir: PathBuf,
    pub dataset: Dataset,
    /// Emit indented JSON.
    pub pretty: bool,
    /// Delete the extracted archive after a successful run.
    pub post_clean: bool,
    /// Never download; the archive or extracted data must already exist.
    pub offline: bool,
    /// Locale whose files stand in for files a locale lacks.
    pub fallback_locale: String,
}

impl BuildConfig {
    /// Default layout below `root`: `source-data`, `code/data` and
    /// `tests/dataFiles`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            source_dir: root.join("source-data"),
            destination_dir: root.join("code").join("data"),
            fixtures_dir: root.join("tests").join("dataFiles"),
            dataset: Dataset::default(),
            pretty: false,
            post_clean: false,
            offline: false,
            fallback_locale: "en".to_string(),
        }
    }

    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    pub fn with_destination_dir(mut self, destination_dir: impl Into<PathBuf>) -> Self {
        self.destination_dir = destination_dir.into();
        self
    }

    pub fn with_fixtures_dir(mut self, fixtures_dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = fixtures_dir.into();
        self
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_post_clean(mut self, post_clean: bool) -> Self {
        self.post_clean = post_clean;
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Path of the downloaded archive.
    pub fn archive_path(&self) -> PathBuf {
        self.source_dir.join(self.dataset.archive_name())
    }

    /// Root of the extracted data (holds `main/` and `supplemental/`).
    pub fn data_dir(&self) -> PathBuf {
        self.source_dir.join(self.dataset.directory_name())
    }

    /// Checks the settings that can be checked before touching the disk.
    pub fn validate(&self) -> Result<(), Error> {
        self.fallback_locale
            .parse::<LanguageIdentifier>()
            .map_err(|e| {
                Error::InvalidConfig(format!(
                    "fallback locale '{}' is not a valid language identifier: {}",
                    self.fallback_locale, e
                ))
            })?;
        // The destination is wiped on every run
        let destination = absolute(&self.destination_dir);
        for (name, dir) in [("source", &self.source_dir), ("fixtures", &self.fixtures_dir)] {
            if absolute(dir).starts_with(&destination) {
                return Err(Error::InvalidConfig(format!(
                    "destination directory {} must not contain the {} directory {}",
                    self.destination_dir.display(),
                    name,
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
