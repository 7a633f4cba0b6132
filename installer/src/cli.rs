//! CLI argument definitions for the Privado installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use clap::Parser;

/// Install the Privado CLI for the current user.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "privado-installer")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install the Privado CLI for the current user.\n\n",
    "Detects the host platform, downloads the matching release archive and its ",
    "MD5 checksum, verifies the archive, and unpacks it into ~/.privado/bin. ",
    "When run as root the executable is linked into /usr/local/bin; otherwise ",
    "one shell profile is updated to put ~/.privado/bin on PATH.",
))]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0   installed\n",
    "  10  unsupported platform, download failure, or checksum mismatch\n",
    "  1   any other failure\n\n",
    "EXAMPLES:\n",
    "  Install for the current user:\n",
    "    $ privado-installer\n\n",
    "  Preview the download URLs and install directory:\n",
    "    $ privado-installer --dry-run",
))]
pub struct Cli {
    /// Show the download URLs and install directory, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case::defaults(&["privado-installer"], false, false)]
    #[case::dry_run(&["privado-installer", "--dry-run"], true, false)]
    #[case::quiet_short(&["privado-installer", "-q"], false, true)]
    #[case::both(&["privado-installer", "--quiet", "--dry-run"], true, true)]
    fn flags_parse(#[case] args: &[&str], #[case] dry_run: bool, #[case] quiet: bool) {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        assert_eq!(cli.dry_run, dry_run);
        assert_eq!(cli.quiet, quiet);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["privado-installer", "--force"]).is_err());
    }
}
