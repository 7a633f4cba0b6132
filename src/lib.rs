//! Runtime bootstrap for the Privado CLI.
//!
//! Builds the process [`config::Configuration`], resolves the primary and
//! per-package-manager cache directories, and checks that the container
//! runtime is reachable before a scan starts.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod package_cache;
pub mod preflight;

pub use cache::CacheResolver;
pub use config::{BootstrapInputs, Configuration};
pub use error::{CacheResolutionError, CliError, PreflightError};
pub use package_cache::{PackageCacheResolver, PackageManager};
