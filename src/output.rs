//! Output formatting for the `privado` commands.
//!
//! Command results go to stdout; errors go to stderr.

use crate::config::Configuration;
use std::io::Write;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format the configuration as aligned `name: value` lines.
#[must_use]
pub fn config_text(config: &Configuration) -> String {
    let cache = config
        .cache_directory
        .as_ref()
        .map_or_else(|| "(unresolved)".to_owned(), ToString::to_string);
    let release = config
        .privado_repository_release_filename
        .as_deref()
        .unwrap_or("(unsupported platform)");
    let mode = if config.dev_mode { "development" } else { "release" };

    [
        format!("Mode:            {mode}"),
        format!("Home:            {}", config.home_directory),
        format!("Configuration:   {}", config.configuration_directory),
        format!("User config:     {}", config.user_configuration_file_path),
        format!("User key:        {}", config.user_key_path),
        format!("Cache:           {cache}"),
        format!("Repository:      {}", config.privado_repository),
        format!("Release archive: {release}"),
        format!("Telemetry:       {}", config.privado_telemetry_endpoint),
        format!("Image:           {}", config.container.image_url),
    ]
    .join("\n")
}
