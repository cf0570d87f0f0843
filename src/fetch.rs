//! Acquiring the CLDR JSON archive: download, extraction and cleanup.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
    time::Duration,
};

use tracing::{debug, info};

use crate::{config::BuildConfig, error::Error};

/// Network timeout for the whole archive download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Retrieves an archive from `url` into `dest`.
///
/// Implementations must not leave a partial file at `dest` when they fail.
pub trait ArchiveFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), Error>;
}

/// Downloads over HTTP with `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), Error> {
        info!("Downloading {}", url);
        let result = download_to_file(url, dest);
        if result.is_err() && dest.exists() {
            remove_path(dest)?;
        }
        result
    }
}

fn download_to_file(url: &str, dest: &Path) -> Result<(), Error> {
    let response = http_agent()
        .get(url)
        .call()
        .map_err(|e| Error::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    let mut file = File::create(dest).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })?;
    let written = io::copy(&mut response.into_body().as_reader(), &mut file).map_err(|e| {
        Error::Download {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })?;
    debug!("Wrote {} bytes to {}", written, dest.display());
    Ok(())
}

/// Shared agent with the download timeout applied.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Extracts the zip archive at `archive` into `dest`. On failure the
/// partially extracted directory is removed.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<(), Error> {
    info!("Extracting {} to {}", archive.display(), dest.display());
    let result = unzip(archive, dest);
    if result.is_err() && dest.exists() {
        remove_path(dest)?;
    }
    result
}

fn unzip(archive: &Path, dest: &Path) -> Result<(), Error> {
    let file = File::open(archive).map_err(|source| Error::Read {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = zip::ZipArchive::new(file).map_err(|source| Error::Archive {
        path: archive.to_path_buf(),
        source,
    })?;
    zip.extract(dest).map_err(|source| Error::Archive {
        path: archive.to_path_buf(),
        source,
    })
}

/// Deletes a file or a directory tree.
pub fn remove_path(path: &Path) -> Result<(), Error> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Makes sure the extracted data directory exists, downloading and
/// extracting the archive as needed. Returns the data directory.
pub fn ensure_source(config: &BuildConfig, fetcher: &dyn ArchiveFetcher) -> Result<PathBuf, Error> {
    let data_dir = config.data_dir();
    if data_dir.is_dir() {
        debug!("Using extracted data at {}", data_dir.display());
        return Ok(data_dir);
    }

    std::fs::create_dir_all(&config.source_dir)?;
    let archive = config.archive_path();
    if !archive.is_file() {
        if config.offline {
            return Err(Error::FileNotFound(archive));
        }
        fetcher.fetch(config.dataset.url(), &archive)?;
    }
    extract_archive(&archive, &data_dir)?;
    Ok(data_dir)
}
