//! Privado installer library.
//!
//! This crate provides the core functionality for detecting the host
//! platform, fetching and verifying a Privado release, and installing it
//! under `~/.privado/bin`. It is used by the `privado-installer` CLI binary
//! and can be consumed programmatically for testing.
//!
//! # Modules
//!
//! - [`artefact`] - Release asset naming, download, verification, and extraction
//! - [`cli`] - Command-line argument definitions
//! - [`entry_point`] - System symlink or shell profile entry for the executable
//! - [`error`] - Installer error types and exit codes
//! - [`output`] - Progress and summary formatting
//! - [`pipeline`] - Install pipeline orchestration
//! - [`platform`] - Host platform detection
//! - [`profile`] - Shell profile selection and PATH entries

pub mod artefact;
pub mod cli;
pub mod entry_point;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod platform;
pub mod profile;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_utils;
