//! Container runtime liveness probe.
//!
//! Scans run inside a container, so every command that needs the engine
//! first checks that Docker answers. There is no retry.

use crate::error::PreflightError;
use log::debug;
use privado_common::CommandExecutor;

/// Command used to reach the container runtime.
pub const DOCKER_COMMAND: &str = "docker";

/// Run `docker info` and fail unless it exits successfully.
///
/// # Errors
///
/// Returns [`PreflightError::Spawn`] if the command cannot be started and
/// [`PreflightError::Unreachable`] if it exits with a failure status.
///
/// # Examples
///
/// ```no_run
/// use privado::preflight::check_container_runtime;
/// use privado_common::SystemCommandExecutor;
///
/// check_container_runtime(&SystemCommandExecutor)?;
/// # Ok::<(), privado::error::PreflightError>(())
/// ```
pub fn check_container_runtime(executor: &dyn CommandExecutor) -> Result<(), PreflightError> {
    let output = executor
        .run(DOCKER_COMMAND, &["info"])
        .map_err(|source| PreflightError::Spawn {
            command: DOCKER_COMMAND,
            source,
        })?;

    if output.status.success() {
        debug!("container runtime is reachable");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(
            || output.status.to_string(),
            |line| format!("{}: {line}", output.status),
        );
    Err(PreflightError::Unreachable { detail })
}
