//! Privado installer CLI entrypoint.
//!
//! This binary downloads, verifies, and installs the Privado CLI for the
//! host platform, then puts it on `PATH`.

use clap::Parser;
use privado_common::{InstallLayout, SystemBaseDirs, SystemCommandExecutor};
use privado_installer::artefact::release::default_base_url;
use privado_installer::cli::Cli;
use privado_installer::entry_point::EntryPointOptions;
use privado_installer::error::{InstallerError, Result};
use privado_installer::output::{dry_run_text, success_message, write_stderr_line};
use privado_installer::pipeline::{InstallConfig, InstallPlan, install};
use privado_installer::platform::{HostSignals, detect_host};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    // Step 1: Resolve the platform and the install layout.
    let signals = HostSignals::probe(&SystemCommandExecutor);
    let platform = detect_host(&signals)?;
    let layout = InstallLayout::from_dirs(&SystemBaseDirs::new())
        .ok_or(InstallerError::HomeUnavailable)?;

    let base_url = default_base_url();
    let temp_root = std::env::temp_dir();
    let entry_point = EntryPointOptions::for_current_user();
    let config = InstallConfig {
        platform,
        layout: &layout,
        base_url: &base_url,
        temp_root: &temp_root,
        entry_point: &entry_point,
        quiet: cli.quiet,
    };

    // Dry-run mode: show what would be done without side effects
    if cli.dry_run {
        let plan = InstallPlan::for_config(&config);
        write_stderr_line(stderr, dry_run_text(&plan, entry_point.privileged));
        return Ok(());
    }

    // Step 2: Fetch, verify, extract, and link.
    let report = install(&config, stderr)?;
    write_stderr_line(stderr, success_message(&report));
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            err.exit_code()
        }
    }
}
