//! Integrity verification of downloaded artefacts.
//!
//! The archive digest is computed in-process and compared with the trimmed
//! sidecar content. No extraction may happen until [`verify_artefact`]
//! returns `Ok`.

use super::fetch::FetchedArtefact;
use super::md5_digest::Md5Digest;
use crate::error::{InstallerError, Result};
use log::debug;
use md5::{Digest, Md5};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Compute the MD5 digest of a file.
///
/// Reads the file at `path` in chunks and returns the lowercase hex
/// digest.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn compute_md5(path: &Path) -> std::io::Result<Md5Digest> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(Md5Digest::from_hex(format!("{:x}", hasher.finalize())))
}

/// Verify a fetched archive against its sidecar.
///
/// Returns the verified digest.
///
/// # Errors
///
/// Returns [`InstallerError::Filesystem`] if either file cannot be read and
/// [`InstallerError::Integrity`] when the digests differ.
pub fn verify_artefact(fetched: &FetchedArtefact) -> Result<Md5Digest> {
    let sidecar = fs::read_to_string(&fetched.checksum)
        .map_err(|e| InstallerError::filesystem("read checksum", &fetched.checksum, e))?;
    let expected = Md5Digest::from_sidecar(&sidecar);
    let actual = compute_md5(&fetched.archive)
        .map_err(|e| InstallerError::filesystem("read artefact", &fetched.archive, e))?;

    if actual != expected {
        return Err(InstallerError::Integrity {
            artefact: fetched.archive.clone(),
            expected: expected.into_inner(),
            actual: actual.into_inner(),
        });
    }
    debug!("verified {} ({actual})", fetched.archive.display());
    Ok(actual)
}
