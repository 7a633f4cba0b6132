//! Output formatting for the installer CLI.
//!
//! Progress and results go to stderr; nothing in the installer writes to
//! stdout.

use crate::entry_point::EntryPoint;
use crate::pipeline::{InstallPlan, InstallReport};
use crate::profile::PathEntryOutcome;
use std::io::Write;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format the one-line summary printed after a successful install.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use privado_common::{Arch, Os, PlatformDescriptor};
/// use privado_installer::artefact::md5_digest::Md5Digest;
/// use privado_installer::entry_point::EntryPoint;
/// use privado_installer::output::success_message;
/// use privado_installer::pipeline::InstallReport;
///
/// let report = InstallReport {
///     platform: PlatformDescriptor::new(Os::Linux, Arch::Amd64),
///     digest: Md5Digest::from_sidecar("d41d8cd98f00b204e9800998ecf8427e"),
///     executable: Utf8PathBuf::from("/root/.privado/bin/privado"),
///     entry_point: EntryPoint::Symlink {
///         link: Utf8PathBuf::from("/usr/local/bin/privado"),
///         target: Utf8PathBuf::from("/root/.privado/bin/privado"),
///     },
/// };
/// assert_eq!(
///     success_message(&report),
///     "Installed privado (linux-amd64) to /root/.privado/bin/privado; linked /usr/local/bin/privado"
/// );
/// ```
#[must_use]
pub fn success_message(report: &InstallReport) -> String {
    let entry = match &report.entry_point {
        EntryPoint::Symlink { link, .. } => format!("linked {link}"),
        EntryPoint::Profile(PathEntryOutcome::Appended { profile }) => {
            format!("added to PATH in {profile}; open a new shell to use it")
        }
        EntryPoint::Profile(PathEntryOutcome::AlreadyPresent { profile }) => {
            format!("PATH already set in {profile}")
        }
    };
    format!(
        "Installed privado ({}) to {}; {entry}",
        report.platform, report.executable
    )
}

/// Format the plan shown by `--dry-run`.
#[must_use]
pub fn dry_run_text(plan: &InstallPlan, privileged: bool) -> String {
    let entry_point = if privileged {
        "symlink in /usr/local/bin"
    } else {
        "PATH entry in a shell profile"
    };
    [
        "Dry run - no files will be modified".to_owned(),
        String::new(),
        format!("Platform: {}", plan.asset.platform()),
        format!("Archive: {}", plan.archive_url),
        format!("Checksum: {}", plan.checksum_url),
        format!("Download directory: {}", plan.staging_dir.display()),
        format!("Install directory: {}", plan.bin_dir),
        format!("Entry point: {entry_point}"),
    ]
    .join("\n")
}
