//! Error types for the Privado installer.
//!
//! Every failure is fatal for the install run. [`InstallerError::exit_code`]
//! maps each variant onto the exit status the installer reports, so scripts
//! wrapping the installer can tell platform and integrity problems apart
//! from local filesystem trouble.

use crate::artefact::download::DownloadError;
use crate::artefact::extraction::ExtractionError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for unsupported platforms and download or integrity failures.
pub const EXIT_PLATFORM_OR_INTEGRITY: i32 = 10;

/// Exit status for every other installer failure.
pub const EXIT_GENERAL: i32 = 1;

/// The half of a platform pair that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformComponent {
    /// The operating system token (`$OSTYPE`).
    OperatingSystem,
    /// The machine architecture token (`uname -m`).
    Architecture,
}

impl fmt::Display for PlatformComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperatingSystem => f.write_str("operating system"),
            Self::Architecture => f.write_str("architecture"),
        }
    }
}

/// Errors that can occur during the installation process.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The host reported an OS or architecture token without a release.
    #[error("unsupported {component} \"{value}\"; no Privado release is published for it")]
    UnsupportedPlatform {
        /// Which half of the platform pair was rejected.
        component: PlatformComponent,
        /// The token reported by the host.
        value: String,
    },

    /// The host gave no token at all for one half of the platform pair.
    #[error("could not determine the host {component}")]
    PlatformUndetermined {
        /// Which half of the platform pair is missing.
        component: PlatformComponent,
    },

    /// Fetching the artefact or its checksum sidecar failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The downloaded artefact does not match its checksum sidecar.
    #[error("checksum mismatch for {}: expected {expected}, computed {actual}", .artefact.display())]
    Integrity {
        /// The artefact that failed verification.
        artefact: PathBuf,
        /// The trimmed sidecar content.
        expected: String,
        /// The digest computed from the downloaded bytes.
        actual: String,
    },

    /// Unpacking the artefact failed.
    #[error("failed to extract {}: {source}", .archive.display())]
    Extraction {
        /// The archive being unpacked.
        archive: PathBuf,
        /// The underlying extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// A directory, file, or link operation failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Filesystem {
        /// What the installer was trying to do, e.g. "create directory".
        action: &'static str,
        /// The path being operated on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The home directory is unknown or not valid UTF-8.
    #[error("could not determine a UTF-8 home directory; set HOME and retry")]
    HomeUnavailable,
}

impl InstallerError {
    /// Build a [`InstallerError::Filesystem`] from an action, path, and cause.
    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Return the process exit status for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use privado_installer::error::{InstallerError, PlatformComponent};
    ///
    /// let err = InstallerError::UnsupportedPlatform {
    ///     component: PlatformComponent::Architecture,
    ///     value: "riscv64".to_owned(),
    /// };
    /// assert_eq!(err.exit_code(), 10);
    /// assert_eq!(InstallerError::HomeUnavailable.exit_code(), 1);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedPlatform { .. } | Self::Download(_) | Self::Integrity { .. } => {
                EXIT_PLATFORM_OR_INTEGRITY
            }
            Self::PlatformUndetermined { .. }
            | Self::Extraction { .. }
            | Self::Filesystem { .. }
            | Self::HomeUnavailable => EXIT_GENERAL,
        }
    }
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unsupported_os(
        InstallerError::UnsupportedPlatform {
            component: PlatformComponent::OperatingSystem,
            value: "freebsd13.2".to_owned(),
        },
        10
    )]
    #[case::download(
        InstallerError::Download(DownloadError::NotFound { url: "https://example.test/a".to_owned() }),
        10
    )]
    #[case::integrity(
        InstallerError::Integrity {
            artefact: PathBuf::from("/tmp/a.tar.gz"),
            expected: "a".repeat(32),
            actual: "b".repeat(32),
        },
        10
    )]
    #[case::undetermined(
        InstallerError::PlatformUndetermined { component: PlatformComponent::Architecture },
        1
    )]
    #[case::filesystem(
        InstallerError::filesystem(
            "create directory",
            "/root/.privado/bin",
            std::io::Error::other("denied"),
        ),
        1
    )]
    fn exit_codes_follow_failure_class(#[case] err: InstallerError, #[case] code: i32) {
        assert_eq!(err.exit_code(), code);
    }

    #[test]
    fn unsupported_platform_names_component_and_token() {
        let err = InstallerError::UnsupportedPlatform {
            component: PlatformComponent::OperatingSystem,
            value: "cygwin".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("operating system"));
        assert!(msg.contains("cygwin"));
    }

    #[test]
    fn integrity_error_reports_both_digests() {
        let err = InstallerError::Integrity {
            artefact: PathBuf::from("/tmp/privado-linux-amd64.tar.gz"),
            expected: "0".repeat(32),
            actual: "f".repeat(32),
        };
        let msg = err.to_string();
        assert!(msg.contains(&"0".repeat(32)));
        assert!(msg.contains(&"f".repeat(32)));
        assert!(msg.contains("privado-linux-amd64.tar.gz"));
    }

    #[test]
    fn filesystem_error_preserves_source() {
        let err = InstallerError::filesystem(
            "write profile",
            "/home/ada/.zshrc",
            std::io::Error::other("read-only file system"),
        );
        assert!(err.to_string().contains("write profile"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
