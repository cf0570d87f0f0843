//! Orchestration of a full build: directories, source acquisition, and the
//! per-file copy of every catalog entry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    catalog::{FileDescriptor, FileKind, files_of_kind},
    config::BuildConfig,
    error::Error,
    fetch::{ArchiveFetcher, HttpFetcher, ensure_source, remove_path},
    navigator::descend,
    tree::{self, read_tree},
};

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub locales: usize,
    pub files_written: usize,
    pub fixtures_written: usize,
}

impl BuildReport {
    fn merge(self, other: BuildReport) -> BuildReport {
        BuildReport {
            locales: self.locales + other.locales,
            files_written: self.files_written + other.files_written,
            fixtures_written: self.fixtures_written + other.fixtures_written,
        }
    }
}

/// Runs the whole build, downloading the archive over HTTP when needed.
pub fn run(config: &BuildConfig) -> Result<BuildReport, Error> {
    run_with_fetcher(config, &HttpFetcher)
}

/// Runs the whole build with the given archive source.
pub fn run_with_fetcher(
    config: &BuildConfig,
    fetcher: &dyn ArchiveFetcher,
) -> Result<BuildReport, Error> {
    config.validate()?;
    prepare_directories(config)?;
    let data_dir = ensure_source(config, fetcher)?;
    let report = process_data(config, &data_dir)?;
    if config.post_clean {
        info!("Removing {}", data_dir.display());
        remove_path(&data_dir)?;
    }
    Ok(report)
}

/// Creates the source and fixtures directories and recreates an empty
/// destination directory.
pub fn prepare_directories(config: &BuildConfig) -> Result<(), Error> {
    fs::create_dir_all(&config.source_dir)?;
    if config.destination_dir.exists() {
        remove_path(&config.destination_dir)?;
    }
    fs::create_dir_all(&config.destination_dir)?;
    fs::create_dir_all(&config.fixtures_dir)?;
    Ok(())
}

/// Transforms every catalog file found in the extracted `data_dir`.
pub fn process_data(config: &BuildConfig, data_dir: &Path) -> Result<BuildReport, Error> {
    let locales = list_locales(&data_dir.join("main"))?;
    info!("Parsing {} locales", locales.len());

    let mut report = BuildReport::default();
    for locale in &locales {
        report = report.merge(process_locale(config, data_dir, locale)?);
    }

    info!("Parsing supplemental files");
    let supplemental_dir = data_dir.join("supplemental");
    for descriptor in files_of_kind(FileKind::Supplemental) {
        let source = supplemental_dir.join(descriptor.source);
        if !source.is_file() {
            return Err(Error::FileNotFound(source));
        }
        let dest = config.destination_dir.join(descriptor.destination_name());
        let fixture = copy_file(config, descriptor, &source, "", &dest)?;
        report.files_written += 1;
        report.fixtures_written += usize::from(fixture);
    }
    Ok(report)
}

/// Locale directories under `main_dir`, sorted.
fn list_locales(main_dir: &Path) -> Result<Vec<String>, Error> {
    if !main_dir.is_dir() {
        return Err(Error::FileNotFound(main_dir.to_path_buf()));
    }
    let mut locales = Vec::new();
    for entry in fs::read_dir(main_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            locales.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    locales.sort();
    Ok(locales)
}

fn process_locale(
    config: &BuildConfig,
    data_dir: &Path,
    locale: &str,
) -> Result<BuildReport, Error> {
    info!("Parsing locale {}", locale);
    let dest_dir = config.destination_dir.join(locale);
    if dest_dir.exists() {
        remove_path(&dest_dir)?;
    }
    fs::create_dir_all(&dest_dir)?;

    let mut report = BuildReport {
        locales: 1,
        ..BuildReport::default()
    };
    for descriptor in files_of_kind(FileKind::Main) {
        let (source, source_locale) =
            resolve_main_source(data_dir, locale, &config.fallback_locale, descriptor)?;
        let dest = dest_dir.join(descriptor.destination_name());
        let fixture = copy_file(config, descriptor, &source, &source_locale, &dest)?;
        report.files_written += 1;
        report.fixtures_written += usize::from(fixture);
    }
    Ok(report)
}

/// Finds the source of a main file for `locale`, falling back to the
/// fallback locale's copy. Returns the path and the locale it belongs to.
fn resolve_main_source(
    data_dir: &Path,
    locale: &str,
    fallback: &str,
    descriptor: &FileDescriptor,
) -> Result<(PathBuf, String), Error> {
    let main_dir = data_dir.join("main");
    let source = main_dir.join(locale).join(descriptor.source);
    if source.is_file() {
        return Ok((source, locale.to_string()));
    }
    let fallback_source = main_dir.join(fallback).join(descriptor.source);
    if !fallback_source.is_file() {
        return Err(Error::FileNotFound(fallback_source));
    }
    warn!(
        "{} has no {}, using the {} copy",
        locale, descriptor.source, fallback
    );
    Ok((fallback_source, fallback.to_string()))
}

/// Reads, descends, transforms and writes one file. Returns whether a
/// fixture was written as well.
fn copy_file(
    config: &BuildConfig,
    descriptor: &FileDescriptor,
    source: &Path,
    locale: &str,
    dest: &Path,
) -> Result<bool, Error> {
    let file = dest.display().to_string();
    let data = read_tree(source)?;
    let mut node = descend(
        data,
        &descriptor.root_path(locale),
        &descriptor.prune_set(locale),
        &source.display().to_string(),
    )?;

    let outputs = descriptor.transform.apply(&mut node, &file)?;
    let json = tree::to_json(&Value::Object(node), config.pretty, &file)?;
    tree::write_file(dest, &json)?;
    debug!("Wrote {}", file);

    let Some(fixture) = outputs.fixture else {
        return Ok(false);
    };
    let fixture_path = config.fixtures_dir.join(descriptor.destination_name());
    let json = tree::to_json(
        &Value::Object(fixture),
        config.pretty,
        &fixture_path.display().to_string(),
    )?;
    tree::write_file(&fixture_path, &json)?;
    debug!("Wrote fixture {}", fixture_path.display());
    Ok(true)
}
