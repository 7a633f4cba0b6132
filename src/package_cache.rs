//! Build-tool dependency caches.
//!
//! The analysis container mounts a Maven or Gradle cache so repeated scans
//! do not download the same dependencies. An existing cache under the
//! primary cache directory wins, then the user's own `~/.m2` or `~/.gradle`,
//! and only then is a fresh one created.

use crate::cache::{CacheResolver, create_dir_all, exists};
use crate::config::Configuration;
use crate::error::CacheResolutionError;
use camino::Utf8PathBuf;
use log::debug;
use privado_common::BaseDirs;
use serde::Serialize;
use std::fmt;

/// A supported package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Maven, cached in `.m2`.
    Maven,
    /// Gradle, cached in `.gradle`.
    Gradle,
}

impl PackageManager {
    /// Package manager assumed for names that are not recognised.
    pub const DEFAULT: Self = Self::Gradle;

    /// Map a package-manager identifier onto a variant.
    ///
    /// `m2` selects Maven and `gradle` selects Gradle. Every other name
    /// selects [`Self::DEFAULT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use privado::package_cache::PackageManager;
    ///
    /// assert_eq!(PackageManager::from_name("m2"), PackageManager::Maven);
    /// assert_eq!(PackageManager::from_name("npm"), PackageManager::Gradle);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "m2" => Self::Maven,
            "gradle" => Self::Gradle,
            _ => Self::DEFAULT,
        }
    }

    /// Return the cache directory name, e.g. `.m2`.
    #[must_use]
    pub const fn directory_name(self) -> &'static str {
        match self {
            Self::Maven => ".m2",
            Self::Gradle => ".gradle",
        }
    }

    /// Return the identifier accepted by [`Self::from_name`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maven => "m2",
            Self::Gradle => "gradle",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locates or creates the cache directory for a package manager.
pub struct PackageCacheResolver<'a> {
    config: &'a Configuration,
    dirs: &'a dyn BaseDirs,
}

impl<'a> PackageCacheResolver<'a> {
    /// Build a resolver over a bootstrapped configuration.
    #[must_use]
    pub const fn new(config: &'a Configuration, dirs: &'a dyn BaseDirs) -> Self {
        Self { config, dirs }
    }

    /// Return the cache directory for `manager`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheResolutionError`] if a candidate cannot be inspected
    /// or the directory cannot be created. Nothing is retried.
    pub fn resolve(&self, manager: PackageManager) -> Result<Utf8PathBuf, CacheResolutionError> {
        let dir_name = manager.directory_name();

        if let Some(cache_dir) = &self.config.cache_directory {
            let cached = cache_dir.join(dir_name);
            if exists(&cached)? {
                debug!("reusing {manager} cache {cached}");
                return Ok(cached);
            }
        }

        // An empty home would turn this into a path relative to the cwd.
        if !self.config.home_directory.as_str().is_empty() {
            let user_cache = self.config.home_directory.join(dir_name);
            if exists(&user_cache)? {
                debug!("reusing {manager} cache {user_cache}");
                return Ok(user_cache);
            }
        }

        let cache_dir = self.config.cache_directory.clone().map_or_else(
            || CacheResolver::new(&self.config.configuration_directory, self.dirs).create_if_absent(),
            Ok,
        )?;
        let created = cache_dir.join(dir_name);
        create_dir_all(&created)?;
        debug!("created {manager} cache {created}");
        Ok(created)
    }
}
