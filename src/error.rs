//! Error types for the Privado runtime bootstrap.
//!
//! Cache resolution failures are typed so callers can decide whether to
//! carry on without a cache. Preflight failures carry the remediation hint
//! shown to the user.

use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// Remediation shown when the container runtime cannot be reached.
pub const PREFLIGHT_HINT: &str =
    "start Docker (or install it from https://docs.docker.com/get-docker/) and retry";

/// Failures while locating or creating a cache directory.
#[derive(Debug, Error)]
pub enum CacheResolutionError {
    /// Checking whether a candidate directory exists failed.
    #[error("failed to inspect cache directory {path}: {source}")]
    Inspect {
        /// The directory being checked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Creating a cache directory failed.
    #[error("failed to create cache directory {path}: {source}")]
    Create {
        /// The directory being created.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Neither a home directory nor an OS cache root is known, so there is
    /// nowhere absolute to put the cache.
    #[error("no home directory or OS cache root is available for the cache; set HOME and retry")]
    HomeUnavailable,
}

/// The container runtime did not answer the liveness probe.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// The runtime command ran but reported failure.
    #[error("Docker is not reachable ({detail}); {hint}", hint = PREFLIGHT_HINT)]
    Unreachable {
        /// The exit status and first line of stderr.
        detail: String,
    },

    /// The runtime command could not be started.
    #[error("could not run `{command}`: {source}; {hint}", hint = PREFLIGHT_HINT)]
    Spawn {
        /// The command that failed to start.
        command: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Top-level failure of a `privado` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Cache resolution failed.
    #[error(transparent)]
    Cache(#[from] CacheResolutionError),

    /// The preflight probe failed.
    #[error(transparent)]
    Preflight(#[from] PreflightError),

    /// The configuration could not be rendered as JSON.
    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),

    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Return the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}
