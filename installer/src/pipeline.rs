//! Install pipeline orchestration.
//!
//! Runs the install stages strictly in order: fetch the archive and its
//! sidecar, verify the digest, extract into `~/.privado/bin`, then put the
//! executable on `PATH`. Every stage is a precondition for the next and
//! any failure aborts the run without rolling back earlier stages.

use crate::artefact::download::{ArtefactDownloader, HttpDownloader};
use crate::artefact::extraction::{ArtefactExtractor, extractor_for};
use crate::artefact::fetch::fetch_artefact;
use crate::artefact::md5_digest::Md5Digest;
use crate::artefact::release::ReleaseAsset;
use crate::artefact::verification::verify_artefact;
use crate::entry_point::{
    EntryPoint, EntryPointOptions, establish_entry_point, mark_executable, prepare_bin_dir,
};
use crate::error::{InstallerError, Result};
use crate::output::write_stderr_line;
use camino::Utf8PathBuf;
use log::debug;
use privado_common::{InstallLayout, PlatformDescriptor};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Configuration for one install run.
#[derive(Debug)]
pub struct InstallConfig<'a> {
    /// The resolved host platform.
    pub platform: PlatformDescriptor,
    /// Paths under the user's home directory.
    pub layout: &'a InstallLayout,
    /// URL prefix that asset names are appended to.
    pub base_url: &'a str,
    /// Root of the staging area, normally the system temp directory.
    pub temp_root: &'a Path,
    /// How to establish the entry point.
    pub entry_point: &'a EntryPointOptions,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// What an install run will touch, computed without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// The release asset for the platform.
    pub asset: ReleaseAsset,
    /// URL of the archive.
    pub archive_url: String,
    /// URL of the checksum sidecar.
    pub checksum_url: String,
    /// Directory receiving the downloads.
    pub staging_dir: PathBuf,
    /// Directory receiving the extracted files.
    pub bin_dir: Utf8PathBuf,
    /// Path of the installed executable.
    pub executable: Utf8PathBuf,
}

impl InstallPlan {
    /// Compute the plan for `config`.
    #[must_use]
    pub fn for_config(config: &InstallConfig<'_>) -> Self {
        let asset = ReleaseAsset::for_platform(config.platform);
        Self {
            archive_url: asset.archive_url(config.base_url),
            checksum_url: asset.checksum_url(config.base_url),
            staging_dir: asset.staging_dir(config.temp_root),
            bin_dir: config.layout.bin_dir(),
            executable: config.layout.executable(config.platform.os()),
            asset,
        }
    }
}

/// The result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// The platform that was installed.
    pub platform: PlatformDescriptor,
    /// The verified archive digest.
    pub digest: Md5Digest,
    /// Path of the installed executable.
    pub executable: Utf8PathBuf,
    /// How the executable was put on `PATH`.
    pub entry_point: EntryPoint,
}

/// Install using the HTTP downloader and the extractor for the platform's
/// archive format.
///
/// # Errors
///
/// Returns the first stage failure; see [`InstallerError`].
pub fn install(config: &InstallConfig<'_>, stderr: &mut dyn Write) -> Result<InstallReport> {
    let format = ReleaseAsset::for_platform(config.platform).format();
    install_with(config, &HttpDownloader, extractor_for(format), stderr)
}

/// Testable inner function with injected dependencies.
///
/// The production entry point [`install`] delegates here with real
/// implementations; tests inject doubles.
///
/// # Errors
///
/// Returns the first stage failure; see [`InstallerError`].
pub fn install_with(
    config: &InstallConfig<'_>,
    downloader: &dyn ArtefactDownloader,
    extractor: &dyn ArtefactExtractor,
    stderr: &mut dyn Write,
) -> Result<InstallReport> {
    let plan = InstallPlan::for_config(config);

    // Step 1: Download archive and sidecar.
    if !config.quiet {
        write_stderr_line(stderr, format!("Downloading {}...", plan.archive_url));
    }
    let fetched = fetch_artefact(&plan.asset, config.base_url, &plan.staging_dir, downloader)?;

    // Step 2: Verify before anything is unpacked.
    let digest = verify_artefact(&fetched)?;
    if !config.quiet {
        write_stderr_line(stderr, format!("Checksum verified ({digest})."));
    }

    // Step 3: Extract into the bin directory.
    prepare_bin_dir(&plan.bin_dir)?;
    if !config.quiet {
        write_stderr_line(stderr, format!("Extracting to {}...", plan.bin_dir));
    }
    let files = extractor
        .extract(&fetched.archive, plan.bin_dir.as_std_path())
        .map_err(|source| InstallerError::Extraction {
            archive: fetched.archive.clone(),
            source,
        })?;
    debug!("extracted {files:?} into {}", plan.bin_dir);
    mark_executable(&plan.executable)?;

    // Step 4: Put the executable on PATH.
    let entry_point = establish_entry_point(
        config.entry_point,
        config.layout.home(),
        &plan.bin_dir,
        &plan.executable,
    )?;

    Ok(InstallReport {
        platform: config.platform,
        digest,
        executable: plan.executable,
        entry_point,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
