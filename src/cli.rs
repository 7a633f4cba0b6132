//! Command-line interface for the `privado` runtime bootstrap commands.

use clap::{Parser, Subcommand};

/// Inspect the Privado CLI configuration and its local caches.
#[derive(Parser, Debug, Clone)]
#[command(name = "privado")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0   success\n",
    "  1   cache resolution failed or Docker is not reachable\n\n",
    "EXAMPLES:\n",
    "  Show where the Maven cache lives:\n",
    "    $ privado cache m2\n\n",
    "  Check that Docker is running:\n",
    "    $ privado doctor",
))]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the resolved configuration.
    Config {
        /// Print the configuration as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve, creating if needed, the cache directory for a package
    /// manager.
    Cache {
        /// Package manager: `m2` or `gradle`. Other names use the Gradle
        /// cache.
        package_manager: String,
    },

    /// Check that the Docker daemon is reachable.
    Doctor,
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
    #[case::config(&["privado", "config"], Command::Config { json: false })]
    #[case::config_json(&["privado", "config", "--json"], Command::Config { json: true })]
    #[case::cache(
        &["privado", "cache", "m2"],
        Command::Cache { package_manager: "m2".to_owned() }
    )]
    #[case::doctor(&["privado", "doctor"], Command::Doctor)]
    fn subcommands_parse(#[case] args: &[&str], #[case] expected: Command) {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        assert_eq!(cli.command, expected);
    }

    #[rstest]
    #[case::missing_subcommand(&["privado"])]
    #[case::missing_package_manager(&["privado", "cache"])]
    #[case::unknown_subcommand(&["privado", "scan"])]
    fn invalid_invocations_are_rejected(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
