//! Platform vocabulary shared by the installer and the runtime.
//!
//! The string forms returned by [`Os::as_str`] and [`Arch::as_str`] are
//! embedded verbatim into release asset names, so they must never change.

use serde::Serialize;
use std::fmt;

/// Operating systems with published release artefacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// GNU/Linux.
    Linux,
    /// macOS.
    Darwin,
    /// Windows (MSYS/Git Bash environments).
    Windows,
}

impl Os {
    /// Return the release-asset token for this operating system.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        }
    }

    /// Return the operating system this binary was compiled for, if it has
    /// published artefacts.
    #[must_use]
    pub fn compiled() -> Option<Self> {
        match std::env::consts::OS {
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Darwin),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    /// Return the executable file name of the tool on this OS.
    #[must_use]
    pub const fn executable_name(self) -> &'static str {
        match self {
            Self::Windows => "privado.exe",
            Self::Linux | Self::Darwin => "privado",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architectures with published release artefacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit x86.
    Amd64,
    /// 64-bit ARM.
    Arm64,
}

impl Arch {
    /// Return the release-asset token for this architecture.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }

    /// Return the architecture this binary was compiled for, if it has
    /// published artefacts.
    #[must_use]
    pub fn compiled() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Self::Amd64),
            "aarch64" => Some(Self::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved `(os, arch)` pair.
///
/// # Examples
///
/// ```
/// use privado_common::{Arch, Os, PlatformDescriptor};
///
/// let platform = PlatformDescriptor::new(Os::Darwin, Arch::Arm64);
/// assert_eq!(platform.to_string(), "darwin-arm64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformDescriptor {
    os: Os,
    arch: Arch,
}

impl PlatformDescriptor {
    /// Pair an operating system with an architecture.
    #[must_use]
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Return the platform this binary was compiled for.
    ///
    /// Returns `None` when either half has no published artefacts.
    #[must_use]
    pub fn compiled() -> Option<Self> {
        Some(Self::new(Os::compiled()?, Arch::compiled()?))
    }

    /// Return the operating system.
    #[must_use]
    pub const fn os(&self) -> Os {
        self.os
    }

    /// Return the architecture.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::linux(Os::Linux, Arch::Amd64, "linux-amd64")]
    #[case::darwin(Os::Darwin, Arch::Arm64, "darwin-arm64")]
    #[case::windows(Os::Windows, Arch::Amd64, "windows-amd64")]
    fn display_joins_tokens_with_a_dash(#[case] os: Os, #[case] arch: Arch, #[case] want: &str) {
        assert_eq!(PlatformDescriptor::new(os, arch).to_string(), want);
    }

    #[test]
    fn windows_executable_carries_exe_suffix() {
        assert_eq!(Os::Windows.executable_name(), "privado.exe");
        assert_eq!(Os::Linux.executable_name(), "privado");
    }

    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    #[test]
    fn compiled_platform_matches_host() {
        assert_eq!(
            PlatformDescriptor::compiled(),
            Some(PlatformDescriptor::new(Os::Linux, Arch::Amd64))
        );
    }
}
