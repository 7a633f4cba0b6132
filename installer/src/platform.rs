//! Host platform detection.
//!
//! Maps the host's OS type token (the shell's `$OSTYPE`) and machine token
//! (`uname -m`) onto a [`PlatformDescriptor`]. The accepted tokens are
//! literal: the resolved values end up verbatim in the release asset URL,
//! so nothing is case-folded or partially matched beyond the prefixes
//! listed on [`parse_os`].

use crate::error::{InstallerError, PlatformComponent, Result};
use log::debug;
use privado_common::exec::capture_stdout;
use privado_common::{Arch, CommandExecutor, Os, PlatformDescriptor};

/// Environment variable carrying the shell's OS type token.
pub const OS_TYPE_ENV: &str = "OSTYPE";

/// The raw platform tokens reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSignals {
    /// OS type token, e.g. `linux-gnu`, `darwin23`, or `msys`.
    pub os_type: Option<String>,
    /// Machine token, e.g. `x86_64` or `arm64`.
    pub machine: Option<String>,
}

impl HostSignals {
    /// Gather the tokens from the running host.
    ///
    /// `$OSTYPE` is only present when the shell exports it, so the OS token
    /// falls back to the token a shell on the compile target would report.
    /// The machine token comes from `uname -m`, falling back to the compile
    /// target when `uname` is unavailable.
    pub fn probe(executor: &dyn CommandExecutor) -> Self {
        let os_type = std::env::var(OS_TYPE_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| compiled_os_type().map(str::to_owned));
        let machine = capture_stdout(executor, "uname", &["-m"])
            .or_else(|| compiled_machine().map(str::to_owned));
        debug!("host signals: os_type={os_type:?} machine={machine:?}");
        Self { os_type, machine }
    }
}

/// Resolve the platform from gathered host signals.
///
/// # Errors
///
/// Returns [`InstallerError::PlatformUndetermined`] when a token is missing
/// and [`InstallerError::UnsupportedPlatform`] when a token is not one of
/// the supported literals.
pub fn detect_host(signals: &HostSignals) -> Result<PlatformDescriptor> {
    let os_type = signals
        .os_type
        .as_deref()
        .ok_or(InstallerError::PlatformUndetermined {
            component: PlatformComponent::OperatingSystem,
        })?;
    let machine = signals
        .machine
        .as_deref()
        .ok_or(InstallerError::PlatformUndetermined {
            component: PlatformComponent::Architecture,
        })?;
    detect(os_type, machine)
}

/// Resolve the platform from an OS type token and a machine token.
///
/// # Errors
///
/// Returns [`InstallerError::UnsupportedPlatform`] for unknown tokens.
///
/// # Examples
///
/// ```
/// use privado_common::{Arch, Os};
/// use privado_installer::platform::detect;
///
/// let platform = detect("darwin22.1.0", "arm64").expect("supported");
/// assert_eq!(platform.os(), Os::Darwin);
/// assert_eq!(platform.arch(), Arch::Arm64);
/// ```
pub fn detect(os_type: &str, machine: &str) -> Result<PlatformDescriptor> {
    Ok(PlatformDescriptor::new(parse_os(os_type)?, parse_arch(machine)?))
}

/// Map an OS type token onto an [`Os`].
///
/// - prefix `linux-gnu` → [`Os::Linux`]
/// - prefix `darwin` → [`Os::Darwin`]
/// - exactly `msys` → [`Os::Windows`]
///
/// # Errors
///
/// Returns [`InstallerError::UnsupportedPlatform`] for anything else.
pub fn parse_os(token: &str) -> Result<Os> {
    if token.starts_with("linux-gnu") {
        Ok(Os::Linux)
    } else if token.starts_with("darwin") {
        Ok(Os::Darwin)
    } else if token == "msys" {
        Ok(Os::Windows)
    } else {
        Err(InstallerError::UnsupportedPlatform {
            component: PlatformComponent::OperatingSystem,
            value: token.to_owned(),
        })
    }
}

/// Map a machine token onto an [`Arch`].
///
/// Only `x86_64` and `arm64` are accepted; `aarch64` is rejected because no
/// asset is published under that name.
///
/// # Errors
///
/// Returns [`InstallerError::UnsupportedPlatform`] for anything else.
pub fn parse_arch(token: &str) -> Result<Arch> {
    match token {
        "x86_64" => Ok(Arch::Amd64),
        "arm64" => Ok(Arch::Arm64),
        other => Err(InstallerError::UnsupportedPlatform {
            component: PlatformComponent::Architecture,
            value: other.to_owned(),
        }),
    }
}

/// The `$OSTYPE` a shell on the compile target reports.
fn compiled_os_type() -> Option<&'static str> {
    Os::compiled().map(|os| match os {
        Os::Linux => "linux-gnu",
        Os::Darwin => "darwin",
        Os::Windows => "msys",
    })
}

/// The `uname -m` token for the compile target.
fn compiled_machine() -> Option<&'static str> {
    Arch::compiled().map(|arch| match arch {
        Arch::Amd64 => "x86_64",
        Arch::Arm64 => "arm64",
    })
}
