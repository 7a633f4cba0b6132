//! On-disk layout shared by the installer and the runtime.
//!
//! Everything the tool owns lives under `~/.privado`; the installed
//! executable sits in `~/.privado/bin`.

use crate::dirs::BaseDirs;
use crate::platform::Os;
use camino::{Utf8Path, Utf8PathBuf};

/// Name of the tool, used for the executable and the OS cache subdirectory.
pub const TOOL_NAME: &str = "privado";

/// Name of the per-user configuration directory inside the home directory.
pub const CONFIG_DIR_NAME: &str = ".privado";

/// Name of the install directory inside the configuration directory.
pub const BIN_DIR_NAME: &str = "bin";

/// Paths derived from a user's home directory.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use privado_common::{InstallLayout, Os};
///
/// let layout = InstallLayout::new(Utf8PathBuf::from("/home/ada"));
/// assert_eq!(layout.bin_dir(), "/home/ada/.privado/bin");
/// assert_eq!(layout.executable(Os::Linux), "/home/ada/.privado/bin/privado");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    home: Utf8PathBuf,
}

impl InstallLayout {
    /// Build a layout rooted at `home`.
    #[must_use]
    pub const fn new(home: Utf8PathBuf) -> Self {
        Self { home }
    }

    /// Build a layout from the host home directory.
    ///
    /// Returns `None` when the home directory is unknown or not UTF-8.
    pub fn from_dirs(dirs: &dyn BaseDirs) -> Option<Self> {
        let home = dirs.home_dir()?;
        Utf8PathBuf::from_path_buf(home).ok().map(Self::new)
    }

    /// Return the home directory.
    #[must_use]
    pub fn home(&self) -> &Utf8Path {
        &self.home
    }

    /// Return `~/.privado`.
    #[must_use]
    pub fn config_dir(&self) -> Utf8PathBuf {
        self.home.join(CONFIG_DIR_NAME)
    }

    /// Return `~/.privado/bin`.
    #[must_use]
    pub fn bin_dir(&self) -> Utf8PathBuf {
        self.config_dir().join(BIN_DIR_NAME)
    }

    /// Return the installed executable path for `os`.
    #[must_use]
    pub fn executable(&self, os: Os) -> Utf8PathBuf {
        self.bin_dir().join(os.executable_name())
    }
}
