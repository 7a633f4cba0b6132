//! Establishing a stable entry point for the installed executable.
//!
//! Root gets a symlink in the system bin directory; everyone else gets a
//! PATH entry in one shell profile (see [`crate::profile`]).

use crate::error::{InstallerError, Result};
use crate::profile::{PathEntryOutcome, ensure_path_entry};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use privado_common::TOOL_NAME;
use std::path::Path;

/// System-wide bin directory used for the privileged symlink.
pub const SYSTEM_BIN_DIR: &str = "/usr/local/bin";

/// How the entry point was established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// A symlink in the system bin directory.
    Symlink {
        /// The link that was created.
        link: Utf8PathBuf,
        /// The installed executable it points at.
        target: Utf8PathBuf,
    },
    /// A PATH entry in a shell profile.
    Profile(PathEntryOutcome),
}

/// Inputs for [`establish_entry_point`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointOptions {
    /// Whether the installer runs as the superuser.
    pub privileged: bool,
    /// Directory receiving the symlink when privileged.
    pub system_bin_dir: Utf8PathBuf,
}

impl EntryPointOptions {
    /// Options for the running process.
    #[must_use]
    pub fn for_current_user() -> Self {
        Self {
            privileged: is_privileged(),
            system_bin_dir: Utf8PathBuf::from(SYSTEM_BIN_DIR),
        }
    }
}

/// Put the installed executable on `PATH`.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if the link or profile cannot be
/// written.
pub fn establish_entry_point(
    options: &EntryPointOptions,
    home: &Utf8Path,
    bin_dir: &Utf8Path,
    executable: &Utf8Path,
) -> Result<EntryPoint> {
    if options.privileged {
        let link = options.system_bin_dir.join(TOOL_NAME);
        replace_symlink(executable.as_std_path(), link.as_std_path())
            .map_err(|e| InstallerError::filesystem("create symlink", &link, e))?;
        debug!("linked {link} -> {executable}");
        return Ok(EntryPoint::Symlink {
            link,
            target: executable.to_owned(),
        });
    }
    ensure_path_entry(home, bin_dir).map(EntryPoint::Profile)
}

/// Create the bin directory and any missing parents.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if the directory cannot be
/// created.
pub fn prepare_bin_dir(bin_dir: &Utf8Path) -> Result<()> {
    std::fs::create_dir_all(bin_dir)
        .map_err(|e| InstallerError::filesystem("create directory", bin_dir, e))
}

/// Mark the installed executable `rwxr-xr-x`.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if the permissions cannot be
/// read or changed.
#[cfg(unix)]
pub fn mark_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)
        .map_err(|e| InstallerError::filesystem("read permissions", path, e))?
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)
        .map_err(|e| InstallerError::filesystem("set permissions", path, e))
}

/// Check that the installed executable exists.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if it is missing.
#[cfg(not(unix))]
pub fn mark_executable(path: &Utf8Path) -> Result<()> {
    std::fs::metadata(path)
        .map(drop)
        .map_err(|e| InstallerError::filesystem("read permissions", path, e))
}

/// Report whether the process runs as the superuser.
#[cfg(unix)]
#[must_use]
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Report whether the process runs as the superuser.
#[cfg(not(unix))]
#[must_use]
pub const fn is_privileged() -> bool {
    false
}

/// Point `link` at `target`, replacing any existing link or file.
#[cfg(unix)]
fn replace_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    match std::fs::symlink_metadata(link) {
        Ok(_) => std::fs::remove_file(link)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn replace_symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "system bin symlinks are only created on Unix",
    ))
}
