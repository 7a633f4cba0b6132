//! MD5 digest newtype for artefact verification.
//!
//! Sidecar content is only trimmed, never normalised: comparison against a
//! computed digest is exact, so an uppercase sidecar does not match.

use std::fmt;

/// A hex-encoded MD5 digest string.
///
/// # Examples
///
/// ```
/// use privado_installer::artefact::md5_digest::Md5Digest;
///
/// let digest = Md5Digest::from_sidecar("d41d8cd98f00b204e9800998ecf8427e  \n");
/// assert_eq!(digest.as_str(), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Md5Digest(String);

impl Md5Digest {
    /// Parse the content of a `.md5` sidecar, trimming surrounding
    /// whitespace.
    #[must_use]
    pub fn from_sidecar(content: &str) -> Self {
        Self(content.trim().to_owned())
    }

    /// Wrap the lowercase hex produced by a hasher.
    pub(crate) const fn from_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Md5Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
