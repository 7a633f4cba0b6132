//! Primary cache directory resolution.
//!
//! Two locations are recognised, checked in this order:
//!
//! 1. `<config dir>/.cache`
//! 2. `<OS cache root>/privado`
//!
//! Existing installs keep whichever one they created first. New installs
//! create the OS location and only fall back to the config-relative one
//! when the OS reports no cache root.

use crate::error::CacheResolutionError;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use privado_common::{BaseDirs, TOOL_NAME, path_exists};

/// Name of the cache directory inside the configuration directory.
pub const CONFIG_CACHE_DIR_NAME: &str = ".cache";

/// Locates and creates the primary cache directory.
pub struct CacheResolver<'a> {
    config_dir: &'a Utf8Path,
    dirs: &'a dyn BaseDirs,
}

impl<'a> CacheResolver<'a> {
    /// Build a resolver for the configuration directory `config_dir`.
    #[must_use]
    pub const fn new(config_dir: &'a Utf8Path, dirs: &'a dyn BaseDirs) -> Self {
        Self { config_dir, dirs }
    }

    /// Return `<config dir>/.cache`.
    ///
    /// `None` when the configuration directory is relative, which happens
    /// when no home directory was found.
    #[must_use]
    pub fn config_cache_dir(&self) -> Option<Utf8PathBuf> {
        self.config_dir
            .is_absolute()
            .then(|| self.config_dir.join(CONFIG_CACHE_DIR_NAME))
    }

    /// Return `<OS cache root>/privado`, if the OS reports a UTF-8 root.
    #[must_use]
    pub fn os_cache_dir(&self) -> Option<Utf8PathBuf> {
        let root = self.dirs.cache_dir()?;
        Utf8PathBuf::from_path_buf(root)
            .ok()
            .map(|root_dir| root_dir.join(TOOL_NAME))
    }

    /// Return the existing cache directory, if any. Never creates anything.
    ///
    /// # Errors
    ///
    /// Returns [`CacheResolutionError::Inspect`] if a candidate cannot be
    /// checked.
    pub fn resolve(&self) -> Result<Option<Utf8PathBuf>, CacheResolutionError> {
        if let Some(config_cache) = self.config_cache_dir() {
            if exists(&config_cache)? {
                debug!("found cache directory {config_cache}");
                return Ok(Some(config_cache));
            }
        }

        if let Some(os_cache) = self.os_cache_dir() {
            if exists(&os_cache)? {
                debug!("found cache directory {os_cache}");
                return Ok(Some(os_cache));
            }
        }

        Ok(None)
    }

    /// Create the cache directory and return it.
    ///
    /// Prefers the OS location and falls back to `<config dir>/.cache`.
    /// Creating an existing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheResolutionError::Create`] if the directory cannot be
    /// created and [`CacheResolutionError::HomeUnavailable`] if neither
    /// location is anchored to a known directory.
    pub fn create_if_absent(&self) -> Result<Utf8PathBuf, CacheResolutionError> {
        let location = self
            .os_cache_dir()
            .or_else(|| self.config_cache_dir())
            .ok_or(CacheResolutionError::HomeUnavailable)?;
        create_dir_all(&location)?;
        debug!("created cache directory {location}");
        Ok(location)
    }

    /// Return the existing cache directory, creating one when none exists.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::resolve`] or
    /// [`Self::create_if_absent`].
    pub fn resolve_or_create(&self) -> Result<Utf8PathBuf, CacheResolutionError> {
        self.resolve()?
            .map_or_else(|| self.create_if_absent(), Ok)
    }
}

pub(crate) fn exists(path: &Utf8Path) -> Result<bool, CacheResolutionError> {
    path_exists(path.as_std_path()).map_err(|source| CacheResolutionError::Inspect {
        path: path.to_owned(),
        source,
    })
}

pub(crate) fn create_dir_all(path: &Utf8Path) -> Result<(), CacheResolutionError> {
    std::fs::create_dir_all(path).map_err(|source| CacheResolutionError::Create {
        path: path.to_owned(),
        source,
    })
}
