//! Shared test utilities for the installer crate.

use crate::artefact::download::{ArtefactDownloader, DownloadError};
use flate2::Compression;
use flate2::write::GzEncoder;
use md5::{Digest, Md5};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Returns the lowercase hex MD5 digest of `bytes`.
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

/// Writes a `.tar.gz` archive at `path` holding `entries` as regular files.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_tar_gz(path: &Path, entries: &[(&str, &[u8])]) {
    fs::write(path, tar_gz_bytes(entries)).expect("write tar.gz archive");
}

/// Builds an in-memory `.tar.gz` archive holding `entries` with mode 0755.
///
/// # Panics
///
/// Panics if the archive cannot be assembled.
pub fn tar_gz_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, name, *contents)
            .expect("append tar entry");
    }
    let encoder = builder.into_inner().expect("finish tar");
    encoder.finish().expect("finish gzip")
}

/// Writes a `.zip` archive at `path` holding `entries` as regular files.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = fs::File::create(path).expect("create zip archive");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    for (name, contents) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(contents).expect("write zip entry");
    }
    writer.finish().expect("finish zip");
}

/// An [`ArtefactDownloader`] that serves canned bodies keyed by URL.
///
/// Unknown URLs fail with [`DownloadError::NotFound`]. Every requested URL
/// is recorded in order.
#[derive(Debug, Default)]
pub struct ServedRelease {
    bodies: HashMap<String, Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl ServedRelease {
    /// Creates a release with no assets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` at `url`.
    #[must_use]
    pub fn with_asset(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Serves `archive` at `archive_url` and its correct digest at the
    /// `.md5` sidecar URL.
    #[must_use]
    pub fn with_verified_asset(self, archive_url: &str, archive: Vec<u8>) -> Self {
        let digest = format!("{}\n", md5_hex(&archive));
        self.with_asset(format!("{archive_url}.md5"), digest)
            .with_asset(archive_url, archive)
    }

    /// Returns the URLs requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl ArtefactDownloader for ServedRelease {
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        self.requested.borrow_mut().push(url.to_owned());
        let body = self.bodies.get(url).ok_or_else(|| DownloadError::NotFound {
            url: url.to_owned(),
        })?;
        fs::write(dest, body)?;
        Ok(())
    }
}
