//! Archive extraction for release artefacts.
//!
//! Unpacks `.tar.gz` and `.zip` archives into the install bin directory with
//! path traversal protection to prevent zip-slip attacks.

use super::release::ArchiveFormat;
use std::fs;
use std::io;
use std::path::{Component, Path};

/// Trait for extracting artefact archives, enabling test mocking.
///
/// # Examples
///
/// ```
/// use privado_installer::artefact::extraction::TarGzExtractor;
///
/// let extractor = TarGzExtractor;
/// // Use extractor.extract(archive_path, dest_dir) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Existing files with the same names are overwritten. Returns the
    /// names of the extracted files.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry
    /// attempts to escape the destination directory.
    /// Returns [`ExtractionError::EmptyArchive`] if no files are found.
    /// Returns [`ExtractionError::Io`] or [`ExtractionError::Zip`] on
    /// read or write failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path)
    -> Result<Vec<String>, ExtractionError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] io::Error),

    /// The zip container is malformed.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Extractor for gzip-compressed tarballs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl ArtefactExtractor for TarGzExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<String>, ExtractionError> {
        let file = fs::File::open(archive_path)?;
        let decoder = flate2::read::GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);
        archive.set_preserve_permissions(true);
        let mut extracted = Vec::new();

        for entry_result in archive.entries()? {
            let mut entry = entry_result?;
            let entry_path = entry.path()?.into_owned();

            validate_entry_path(&entry_path)?;

            let dest_path = dest_dir.join(&entry_path);
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            entry.unpack(&dest_path)?;

            if entry.header().entry_type().is_dir() {
                continue;
            }
            if let Some(name) = entry_path.file_name() {
                extracted.push(name.to_string_lossy().into_owned());
            }
        }

        if extracted.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }

        Ok(extracted)
    }
}

/// Extractor for zip archives.
///
/// Unix permission bits recorded in the archive are restored when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ArtefactExtractor for ZipExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<String>, ExtractionError> {
        let file = fs::File::open(archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut extracted = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let entry_path =
                entry
                    .enclosed_name()
                    .ok_or_else(|| ExtractionError::PathTraversal {
                        path: entry.name().to_owned(),
                    })?;

            validate_entry_path(&entry_path)?;

            let dest_path = dest_dir.join(&entry_path);
            if entry.is_dir() {
                fs::create_dir_all(&dest_path)?;
                continue;
            }
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut out = fs::File::create(&dest_path)?;
            io::copy(&mut entry, &mut out)?;
            restore_mode(&dest_path, entry.unix_mode())?;

            if let Some(name) = entry_path.file_name() {
                extracted.push(name.to_string_lossy().into_owned());
            }
        }

        if extracted.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }

        Ok(extracted)
    }
}

#[cfg(unix)]
fn restore_mode(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    match mode {
        Some(mode) => fs::set_permissions(path, fs::Permissions::from_mode(mode)),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn restore_mode(_path: &Path, _mode: Option<u32>) -> io::Result<()> {
    Ok(())
}

/// Return the extractor for an archive format.
#[must_use]
pub fn extractor_for(format: ArchiveFormat) -> &'static dyn ArtefactExtractor {
    match format {
        ArchiveFormat::TarGz => &TarGzExtractor,
        ArchiveFormat::Zip => &ZipExtractor,
    }
}

/// Validate that an entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    if path.is_absolute() {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir | Component::Prefix(_)) {
            return Err(ExtractionError::PathTraversal {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{write_tar_gz, write_zip};
    use rstest::rstest;
    use std::path::PathBuf;

    #[test]
    fn extracts_tar_gz_archive() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("privado-linux-amd64.tar.gz");
        let dest_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&dest_dir).expect("create dest");
        write_tar_gz(&archive_path, &[("privado", b"#!/bin/sh\necho privado\n".as_slice())]);

        let files = TarGzExtractor
            .extract(&archive_path, &dest_dir)
            .expect("extract");

        assert_eq!(files, vec!["privado"]);
        let contents = fs::read(dest_dir.join("privado")).expect("read");
        assert_eq!(contents, b"#!/bin/sh\necho privado\n");
    }

    #[test]
    fn tar_gz_overwrites_existing_file() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("a.tar.gz");
        let dest_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&dest_dir).expect("create dest");
        fs::write(dest_dir.join("privado"), b"old").expect("seed");
        write_tar_gz(&archive_path, &[("privado", b"new".as_slice())]);

        TarGzExtractor
            .extract(&archive_path, &dest_dir)
            .expect("extract");

        assert_eq!(fs::read(dest_dir.join("privado")).expect("read"), b"new");
    }

    #[test]
    fn extract_empty_tar_gz() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("empty.tar.gz");
        let dest_dir = temp_dir.path().join("out");
        fs::create_dir_all(&dest_dir).expect("create dest");
        write_tar_gz(&archive_path, &[]);

        let result = TarGzExtractor.extract(&archive_path, &dest_dir);
        assert!(matches!(result, Err(ExtractionError::EmptyArchive)));
    }

    #[test]
    fn corrupt_tar_gz_is_an_io_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("corrupt.tar.gz");
        fs::write(&archive_path, b"not gzip at all").expect("write");

        let result = TarGzExtractor.extract(&archive_path, temp_dir.path());
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn extracts_zip_archive() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("privado-windows-amd64.zip");
        let dest_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&dest_dir).expect("create dest");
        write_zip(&archive_path, &[("privado.exe", b"MZ".as_slice())]);

        let files = ZipExtractor
            .extract(&archive_path, &dest_dir)
            .expect("extract");

        assert_eq!(files, vec!["privado.exe"]);
        assert_eq!(fs::read(dest_dir.join("privado.exe")).expect("read"), b"MZ");
    }

    #[test]
    fn zip_entry_escaping_destination_is_rejected() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("evil.zip");
        let dest_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&dest_dir).expect("create dest");
        write_zip(&archive_path, &[("../escape.txt", b"boom".as_slice())]);

        let result = ZipExtractor.extract(&archive_path, &dest_dir);

        assert!(matches!(result, Err(ExtractionError::PathTraversal { .. })));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn corrupt_zip_is_a_zip_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("corrupt.zip");
        fs::write(&archive_path, b"PK but not really").expect("write");

        let result = ZipExtractor.extract(&archive_path, temp_dir.path());
        assert!(matches!(result, Err(ExtractionError::Zip(_))));
    }

    #[rstest]
    #[case::parent_dir("../escape.txt")]
    #[case::nested_parent("foo/../../escape.txt")]
    fn rejects_path_traversal(#[case] bad_path: &str) {
        let path = PathBuf::from(bad_path);
        let result = validate_entry_path(&path);
        assert!(
            matches!(result, Err(ExtractionError::PathTraversal { .. })),
            "expected PathTraversal for {bad_path}"
        );
    }

    #[test]
    fn accepts_normal_paths() {
        assert!(validate_entry_path(Path::new("privado")).is_ok());
        assert!(validate_entry_path(Path::new("lib/privado-core.jar")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn rejects_absolute_path() {
        let result = validate_entry_path(Path::new("/etc/passwd"));
        assert!(matches!(result, Err(ExtractionError::PathTraversal { .. })));
    }

    #[test]
    fn extractor_follows_archive_format() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("a.zip");
        let dest_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&dest_dir).expect("create dest");
        write_zip(&archive_path, &[("privado.exe", b"MZ".as_slice())]);

        let files = extractor_for(ArchiveFormat::Zip)
            .extract(&archive_path, &dest_dir)
            .expect("zip extractor");
        assert_eq!(files, vec!["privado.exe"]);
        assert!(matches!(
            extractor_for(ArchiveFormat::TarGz).extract(&archive_path, &dest_dir),
            Err(ExtractionError::Io(_))
        ));
    }
}
