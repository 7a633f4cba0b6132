//! Release asset naming and URL construction.
//!
//! Every platform publishes one archive and one `.md5` sidecar under the
//! rolling `latest` release:
//!
//! ```text
//! <base>privado-<os>-<arch>.<ext>
//! <base>privado-<os>-<arch>.<ext>.md5
//! ```
//!
//! where `<ext>` is `zip` for Windows and `tar.gz` elsewhere.

use privado_common::{Os, PlatformDescriptor, TOOL_NAME};
use std::fmt;
use std::path::{Path, PathBuf};

/// The GitHub repository owner/name for URL construction.
pub const RELEASE_REPOSITORY: &str = "Privado-Inc/privado-cli";

/// The rolling release tag name.
pub const RELEASE_TAG: &str = "latest";

/// Suffix appended to an archive name to form its checksum sidecar name.
pub const CHECKSUM_SUFFIX: &str = ".md5";

/// Archive container formats used by release assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// Gzip-compressed tarball.
    TarGz,
    /// Zip archive.
    Zip,
}

impl ArchiveFormat {
    /// Return the format published for `os`.
    #[must_use]
    pub const fn for_os(os: Os) -> Self {
        match os {
            Os::Windows => Self::Zip,
            Os::Linux | Os::Darwin => Self::TarGz,
        }
    }

    /// Return the file extension, without a leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The release asset published for one platform.
///
/// # Examples
///
/// ```
/// use privado_common::{Arch, Os, PlatformDescriptor};
/// use privado_installer::artefact::release::{ArchiveFormat, ReleaseAsset};
///
/// let asset = ReleaseAsset::for_platform(PlatformDescriptor::new(Os::Windows, Arch::Amd64));
/// assert_eq!(asset.format(), ArchiveFormat::Zip);
/// assert_eq!(asset.archive_name(), "privado-windows-amd64.zip");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseAsset {
    platform: PlatformDescriptor,
    format: ArchiveFormat,
}

impl ReleaseAsset {
    /// Describe the asset for `platform`.
    #[must_use]
    pub const fn for_platform(platform: PlatformDescriptor) -> Self {
        Self {
            platform,
            format: ArchiveFormat::for_os(platform.os()),
        }
    }

    /// Return the platform this asset targets.
    #[must_use]
    pub const fn platform(&self) -> PlatformDescriptor {
        self.platform
    }

    /// Return the archive format.
    #[must_use]
    pub const fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Return the archive file name, e.g. `privado-linux-amd64.tar.gz`.
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{TOOL_NAME}-{}.{}", self.platform, self.format)
    }

    /// Return the checksum sidecar file name.
    #[must_use]
    pub fn checksum_name(&self) -> String {
        format!("{}{CHECKSUM_SUFFIX}", self.archive_name())
    }

    /// Return the archive URL: `{base}{os}-{arch}.{ext}`.
    ///
    /// `base` already ends with the `privado-` asset prefix.
    #[must_use]
    pub fn archive_url(&self, base: &str) -> String {
        format!(
            "{base}{}-{}.{}",
            self.platform.os(),
            self.platform.arch(),
            self.format
        )
    }

    /// Return the checksum sidecar URL: the archive URL plus `.md5`.
    #[must_use]
    pub fn checksum_url(&self, base: &str) -> String {
        format!("{}{CHECKSUM_SUFFIX}", self.archive_url(base))
    }

    /// Return the platform-keyed staging directory under `temp_root`.
    ///
    /// The name depends only on the platform so repeated runs overwrite the
    /// previous download instead of accumulating new ones.
    #[must_use]
    pub fn staging_dir(&self, temp_root: &Path) -> PathBuf {
        temp_root.join(format!("{TOOL_NAME}-{}", self.platform))
    }
}

/// Return the URL prefix that asset names are appended to.
///
/// # Examples
///
/// ```
/// use privado_installer::artefact::release::default_base_url;
///
/// assert_eq!(
///     default_base_url(),
///     "https://github.com/Privado-Inc/privado-cli/releases/download/latest/privado-"
/// );
/// ```
#[must_use]
pub fn default_base_url() -> String {
    format!("https://github.com/{RELEASE_REPOSITORY}/releases/download/{RELEASE_TAG}/{TOOL_NAME}-")
}
