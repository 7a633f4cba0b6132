//! Process execution seam.
//!
//! The installer asks `uname` for the machine architecture and the runtime
//! probes the container engine; both go through [`CommandExecutor`] so
//! tests can script the responses.

use std::io;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning or waiting for the
    /// command. A non-zero exit status is not an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use privado_common::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let output = SystemCommandExecutor.run("uname", &["-m"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        Command::new(cmd).args(args).output()
    }
}

/// Run a command and return its trimmed stdout when it exits successfully.
///
/// Spawn failures, non-zero exits, non-UTF-8 output, and empty output all
/// yield `None`.
pub fn capture_stdout(executor: &dyn CommandExecutor, cmd: &str, args: &[&str]) -> Option<String> {
    let output = executor.run(cmd, args).ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
