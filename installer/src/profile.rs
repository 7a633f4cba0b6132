//! Shell profile selection and PATH entry management.
//!
//! Unprivileged installs put the bin directory on `PATH` by appending one
//! `export` line to a single shell profile in the home directory.
//!
//! The candidates are probed in the order of [`PROFILE_CANDIDATES`] and the
//! **last** existing one is chosen, so a home with both `.bash_profile` and
//! `.zshrc` gets `.zshrc`. When any existing candidate already mentions the
//! bin directory nothing is appended, even if that candidate is not the
//! chosen one: an old entry in `.profile` suppresses the line for a newer
//! `.zshrc`, which zsh users then have to add by hand. When no candidate
//! exists the line is appended to [`FALLBACK_PROFILE`] without checking its
//! contents.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use privado_common::path_exists;
use std::fs;
use std::io::Write;

/// Profile files probed, in precedence order.
pub const PROFILE_CANDIDATES: [&str; 3] = [".profile", ".bash_profile", ".zshrc"];

/// Profile file used when no candidate exists.
pub const FALLBACK_PROFILE: &str = ".bashrc";

/// The profile chosen for the PATH entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelection {
    /// An existing candidate profile.
    Candidate {
        /// The last existing candidate.
        path: Utf8PathBuf,
        /// Whether any existing candidate already references the bin
        /// directory.
        already_present: bool,
    },
    /// No candidate exists; the fallback profile is used.
    Fallback {
        /// Path of the fallback profile.
        path: Utf8PathBuf,
    },
}

impl ProfileSelection {
    /// Return the chosen profile path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Candidate { path, .. } | Self::Fallback { path } => path,
        }
    }
}

/// What happened to the chosen profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntryOutcome {
    /// The export line was appended to the profile.
    Appended {
        /// The profile that was modified.
        profile: Utf8PathBuf,
    },
    /// A profile already referenced the bin directory; nothing was written.
    AlreadyPresent {
        /// The profile that was chosen.
        profile: Utf8PathBuf,
    },
}

impl PathEntryOutcome {
    /// Return the profile the outcome refers to.
    #[must_use]
    pub fn profile(&self) -> &Utf8Path {
        match self {
            Self::Appended { profile } | Self::AlreadyPresent { profile } => profile,
        }
    }
}

/// Return the line appended to a profile to put `bin_dir` on `PATH`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use privado_installer::profile::path_export_line;
///
/// assert_eq!(
///     path_export_line(Utf8Path::new("/home/ada/.privado/bin")),
///     "export PATH=$PATH:/home/ada/.privado/bin"
/// );
/// ```
#[must_use]
pub fn path_export_line(bin_dir: &Utf8Path) -> String {
    format!("export PATH=$PATH:{bin_dir}")
}

/// Choose the profile to modify under `home`.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if a candidate cannot be probed
/// or read.
pub fn select_profile(home: &Utf8Path, bin_dir: &Utf8Path) -> Result<ProfileSelection> {
    let mut chosen = None;
    let mut already_present = false;

    for name in PROFILE_CANDIDATES {
        let candidate = home.join(name);
        let exists = path_exists(candidate.as_std_path())
            .map_err(|e| InstallerError::filesystem("inspect profile", &candidate, e))?;
        if !exists {
            continue;
        }
        let contents = fs::read_to_string(&candidate)
            .map_err(|e| InstallerError::filesystem("read profile", &candidate, e))?;
        if contents.contains(bin_dir.as_str()) {
            already_present = true;
        }
        chosen = Some(candidate);
    }

    let selection = match chosen {
        Some(path) => ProfileSelection::Candidate {
            path,
            already_present,
        },
        None => ProfileSelection::Fallback {
            path: home.join(FALLBACK_PROFILE),
        },
    };
    debug!("selected shell profile {}", selection.path());
    Ok(selection)
}

/// Ensure a profile under `home` puts `bin_dir` on `PATH`.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if a profile cannot be read or
/// written.
pub fn ensure_path_entry(home: &Utf8Path, bin_dir: &Utf8Path) -> Result<PathEntryOutcome> {
    match select_profile(home, bin_dir)? {
        ProfileSelection::Candidate {
            path,
            already_present: true,
        } => Ok(PathEntryOutcome::AlreadyPresent { profile: path }),
        ProfileSelection::Candidate { path, .. } | ProfileSelection::Fallback { path } => {
            append_line(&path, &path_export_line(bin_dir))?;
            Ok(PathEntryOutcome::Appended { profile: path })
        }
    }
}

/// Append `line` to `path`, creating the file if needed.
///
/// A newline is inserted first when the file does not already end with
/// one, so the export never joins an existing last line.
fn append_line(path: &Utf8Path, line: &str) -> Result<()> {
    let needs_separator = match fs::read(path) {
        Ok(bytes) => bytes.last().is_some_and(|byte| *byte != b'\n'),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(InstallerError::filesystem("read profile", path, e)),
    };

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| InstallerError::filesystem("open profile", path, e))?;
    let separator = if needs_separator { "\n" } else { "" };
    writeln!(file, "{separator}{line}")
        .map_err(|e| InstallerError::filesystem("write profile", path, e))?;
    debug!("appended PATH entry to {path}");
    Ok(())
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
