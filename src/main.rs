//! Privado CLI entrypoint for the runtime bootstrap commands.

use clap::Parser;
use privado::cli::{Cli, Command};
use privado::config::Configuration;
use privado::error::CliError;
use privado::output::{config_text, write_stderr_line};
use privado::package_cache::{PackageCacheResolver, PackageManager};
use privado::preflight::check_container_runtime;
use privado_common::{BaseDirs, CommandExecutor, SystemBaseDirs, SystemCommandExecutor};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(
        &cli.command,
        &SystemBaseDirs::new(),
        &SystemCommandExecutor,
        &mut stdout,
    );
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    command: &Command,
    dirs: &dyn BaseDirs,
    executor: &dyn CommandExecutor,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Config { json } => {
            let config = Configuration::bootstrap(dirs);
            if *json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(stdout, "{}", config_text(&config))?;
            }
        }
        Command::Cache { package_manager } => {
            let config = Configuration::bootstrap(dirs);
            let manager = PackageManager::from_name(package_manager);
            let dir = PackageCacheResolver::new(&config, dirs).resolve(manager)?;
            writeln!(stdout, "{dir}")?;
        }
        Command::Doctor => {
            check_container_runtime(executor)?;
            writeln!(stdout, "Docker is reachable")?;
        }
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            err.exit_code()
        }
    }
}
