//! Release artefact naming, retrieval, verification, and unpacking.
//!
//! # Sub-modules
//!
//! - [`release`] — Asset naming and URL construction (`ReleaseAsset`).
//! - [`download`] — Download trait and HTTP implementation.
//! - [`fetch`] — Fetching an artefact and its sidecar into the staging dir.
//! - [`md5_digest`] — MD5 digest newtype (`Md5Digest`).
//! - [`verification`] — Checksum verification against the sidecar.
//! - [`extraction`] — Archive extraction with path traversal protection.

pub mod download;
pub mod extraction;
pub mod fetch;
pub mod md5_digest;
pub mod release;
pub mod verification;
