//! Directory resolution abstraction for platform-specific paths.
//!
//! Callers depend on [`BaseDirs`] rather than on `directories-next`
//! directly so tests can point the home and cache roots at a sandbox.

use std::path::PathBuf;

/// Source of the per-user base directories.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
pub trait BaseDirs {
    /// Return the user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Return the OS-standard per-user cache root.
    ///
    /// - Linux: `$XDG_CACHE_HOME` or `~/.cache`
    /// - macOS: `~/Library/Caches`
    /// - Windows: `%LOCALAPPDATA%`
    fn cache_dir(&self) -> Option<PathBuf>;
}

/// [`BaseDirs`] backed by the host environment.
///
/// The directories are looked up once, in [`SystemBaseDirs::new`], so the
/// home directory and the cache root always come from the same snapshot of
/// the environment.
#[derive(Debug, Clone)]
pub struct SystemBaseDirs {
    dirs: Option<directories_next::BaseDirs>,
}

impl SystemBaseDirs {
    /// Snapshot the host's base directories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirs: directories_next::BaseDirs::new(),
        }
    }
}

impl Default for SystemBaseDirs {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        self.dirs.as_ref().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn cache_dir(&self) -> Option<PathBuf> {
        self.dirs.as_ref().map(|dirs| dirs.cache_dir().to_path_buf())
    }
}
