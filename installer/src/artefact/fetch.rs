//! Fetching a release artefact and its checksum sidecar.

use super::download::ArtefactDownloader;
use super::release::ReleaseAsset;
use crate::error::{InstallerError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Local copies of a downloaded archive and its sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArtefact {
    /// Path of the downloaded archive.
    pub archive: PathBuf,
    /// Path of the downloaded `.md5` sidecar.
    pub checksum: PathBuf,
}

/// Download the archive for `asset` and its sidecar into `staging_dir`.
///
/// The staging directory is created if needed. Files from a previous run
/// with the same platform are overwritten.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if the staging directory cannot
/// be created and [`InstallerError::Download`] if either transfer fails.
pub fn fetch_artefact(
    asset: &ReleaseAsset,
    base_url: &str,
    staging_dir: &Path,
    downloader: &dyn ArtefactDownloader,
) -> Result<FetchedArtefact> {
    std::fs::create_dir_all(staging_dir)
        .map_err(|e| InstallerError::filesystem("create directory", staging_dir, e))?;

    let archive = staging_dir.join(asset.archive_name());
    let checksum = staging_dir.join(asset.checksum_name());

    let archive_url = asset.archive_url(base_url);
    debug!("downloading {archive_url} to {}", archive.display());
    downloader.download(&archive_url, &archive)?;

    let checksum_url = asset.checksum_url(base_url);
    debug!("downloading {checksum_url} to {}", checksum.display());
    downloader.download(&checksum_url, &checksum)?;

    Ok(FetchedArtefact { archive, checksum })
}
