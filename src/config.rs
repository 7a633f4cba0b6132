//! Process-wide configuration for the Privado CLI.
//!
//! [`Configuration`] is built once at startup by [`Configuration::bootstrap`]
//! and passed by reference to everything that needs it. Construction never
//! fails: an unknown home directory or an unusable cache directory is
//! logged and leaves the affected fields empty, and callers resolve the
//! cache lazily through [`crate::cache::CacheResolver`].
//!
//! The process environment is captured in [`BootstrapInputs`] up front so
//! the derivation itself is a pure function of its inputs.

use crate::cache::CacheResolver;
use crate::package_cache::PackageManager;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use privado_common::{BaseDirs, InstallLayout, PlatformDescriptor, TOOL_NAME};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that forces developer mode when truthy.
pub const DEV_MODE_ENV: &str = "PRIVADO_DEV";

/// Environment variable overriding the image tag in developer mode.
pub const IMAGE_TAG_ENV: &str = "PRIVADO_TAG";

/// Environment variable carrying the CI user identity.
pub const CI_USER_ID_ENV: &str = "PRIVADO_CI_USER_ID";

/// Environment variable carrying the container registry access key.
pub const DOCKER_ACCESS_KEY_ENV: &str = "PRIVADO_DOCKER_ACCESS_KEY";

/// Image tag used for releases.
pub const RELEASE_IMAGE_TAG: &str = "latest";

/// Image tag used in developer mode when [`IMAGE_TAG_ENV`] is unset.
pub const DEV_IMAGE_TAG: &str = "dev";

/// Telemetry host for releases.
pub const RELEASE_TELEMETRY_HOST: &str = "cli.privado.ai";

/// Telemetry host in developer mode.
pub const DEV_TELEMETRY_HOST: &str = "t.cli.privado.ai";

/// GitHub repository name.
pub const REPOSITORY_NAME: &str = "Privado-Inc/privado-cli";

/// Pause between consecutive remote requests.
pub const SLOWDOWN_TIME: Duration = Duration::from_millis(600);

/// Snapshot of the process environment that feeds [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapInputs {
    /// Raw value of [`DEV_MODE_ENV`].
    pub dev_override: Option<String>,
    /// Raw value of [`IMAGE_TAG_ENV`].
    pub tag_override: Option<String>,
    /// Path of the running executable.
    pub executable: Option<PathBuf>,
    /// The system temporary directory.
    pub temp_dir: PathBuf,
}

impl BootstrapInputs {
    /// Capture the inputs from the running process.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            dev_override: std::env::var(DEV_MODE_ENV).ok(),
            tag_override: std::env::var(IMAGE_TAG_ENV).ok(),
            executable: std::env::current_exe().ok(),
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Report whether developer settings apply.
    ///
    /// True when [`DEV_MODE_ENV`] parses as true or the executable lives
    /// under the temporary directory, which is where throwaway builds run
    /// from.
    #[must_use]
    pub fn dev_mode(&self) -> bool {
        let forced = self.dev_override.as_deref().and_then(parse_bool) == Some(true);
        forced || self.runs_from_temp_dir()
    }

    fn runs_from_temp_dir(&self) -> bool {
        !self.temp_dir.as_os_str().is_empty()
            && self
                .executable
                .as_deref()
                .is_some_and(|exe| exe.starts_with(&self.temp_dir))
    }
}

/// Parse a boolean flag value.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, and `True` as true and the
/// matching `0`/`f`/`false` spellings as false. Anything else is `None`.
///
/// # Examples
///
/// ```
/// use privado::config::parse_bool;
///
/// assert_eq!(parse_bool("T"), Some(true));
/// assert_eq!(parse_bool("False"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Container-side paths and the image reference for the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerConfiguration {
    /// Fully qualified image reference.
    pub image_url: String,
    /// Environment variable holding the registry access key.
    pub docker_access_key_env: &'static str,
    /// Mount point of the user key.
    pub user_key_volume_dir: &'static str,
    /// Mount point of the registry key.
    pub docker_key_volume_dir: &'static str,
    /// Mount point of the user configuration file.
    pub user_config_volume_dir: &'static str,
    /// Mount point of the logging configuration.
    pub log_config_volume_dir: &'static str,
    /// Mount point of the scanned source tree.
    pub source_code_volume_dir: &'static str,
    /// Mount point of the bundled rules.
    pub internal_rules_volume_dir: &'static str,
    /// Mount point of user-supplied rules.
    pub external_rules_volume_dir: &'static str,
    /// Mount point of the Maven cache.
    pub m2_package_cache_volume_dir: &'static str,
    /// Mount point of the Gradle cache.
    pub gradle_package_cache_volume_dir: &'static str,
    /// Path of the engine binary inside the image.
    pub privado_core_bin_path: &'static str,
}

impl ContainerConfiguration {
    /// Build the container settings for an image tag.
    #[must_use]
    pub fn for_tag(tag: &str) -> Self {
        Self {
            image_url: format!("public.ecr.aws/privado/privado:{tag}"),
            docker_access_key_env: DOCKER_ACCESS_KEY_ENV,
            user_key_volume_dir: "/app/keys/user.key",
            docker_key_volume_dir: "/app/keys/docker.key",
            user_config_volume_dir: "/app/config/config.json",
            log_config_volume_dir: "/app/config/log4j2.xml",
            source_code_volume_dir: "/app/code",
            internal_rules_volume_dir: "/app/rules",
            external_rules_volume_dir: "/app/external-rules",
            m2_package_cache_volume_dir: "/root/.m2",
            gradle_package_cache_volume_dir: "/root/.gradle",
            privado_core_bin_path: "/usr/local/bin/core",
        }
    }

    /// Return the container-side cache mount for a package manager.
    #[must_use]
    pub const fn package_cache_mount(&self, manager: PackageManager) -> &'static str {
        match manager {
            PackageManager::Maven => self.m2_package_cache_volume_dir,
            PackageManager::Gradle => self.gradle_package_cache_volume_dir,
        }
    }
}

/// Paths, endpoints, and constants shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// The user's home directory; empty when it could not be determined.
    pub home_directory: Utf8PathBuf,
    /// The primary cache directory, once resolved.
    pub cache_directory: Option<Utf8PathBuf>,
    /// `~/.privado`.
    pub configuration_directory: Utf8PathBuf,
    /// `~/.privado/config.json`.
    pub user_configuration_file_path: Utf8PathBuf,
    /// `~/.privado/keys`.
    pub user_key_directory: Utf8PathBuf,
    /// `~/.privado/keys/user.key`.
    pub user_key_path: Utf8PathBuf,
    /// Environment variable naming the CI user.
    pub ci_user_identifier_env_key: &'static str,
    /// Directory name of the Maven cache.
    pub m2_cache_directory_name: &'static str,
    /// Directory name of the Gradle cache.
    pub gradle_cache_directory_name: &'static str,
    /// Location of scan results relative to the scanned repository.
    pub privacy_results_path_suffix: Utf8PathBuf,
    /// Repository URL.
    pub privado_repository: String,
    /// Repository owner and name.
    pub privado_repository_name: &'static str,
    /// Release archive name for the platform this binary was built for.
    pub privado_repository_release_filename: Option<String>,
    /// Telemetry endpoint.
    pub privado_telemetry_endpoint: String,
    /// Pause between consecutive remote requests.
    pub slowdown_time: Duration,
    /// Whether developer settings are active.
    pub dev_mode: bool,
    /// Image tag for the analysis engine.
    pub image_tag: String,
    /// Container settings.
    pub container: ContainerConfiguration,
}

impl Configuration {
    /// Build the configuration for the running process.
    #[must_use]
    pub fn bootstrap(dirs: &dyn BaseDirs) -> Self {
        Self::bootstrap_with(dirs, &BootstrapInputs::from_process())
    }

    /// Build the configuration from captured inputs.
    ///
    /// The cache directory is resolved, and created when nothing exists
    /// yet. Failures are logged and leave it unset.
    #[must_use]
    pub fn bootstrap_with(dirs: &dyn BaseDirs, inputs: &BootstrapInputs) -> Self {
        let home = resolve_home(dirs);
        let mut config = Self::derive(home.clone().unwrap_or_default(), inputs);

        if home.is_none() {
            warn!("skipping cache directory resolution without a home directory");
            return config;
        }

        config.cache_directory = CacheResolver::new(&config.configuration_directory, dirs)
            .resolve_or_create()
            .inspect(|cache| debug!("using cache directory {cache}"))
            .inspect_err(|err| warn!("cache directory unavailable: {err}"))
            .ok();
        config
    }

    /// Derive every field except the cache directory.
    #[must_use]
    pub fn derive(home: Utf8PathBuf, inputs: &BootstrapInputs) -> Self {
        let dev_mode = inputs.dev_mode();
        let (telemetry_host, image_tag) = if dev_mode {
            let tag = inputs
                .tag_override
                .clone()
                .filter(|tag| !tag.is_empty())
                .unwrap_or_else(|| DEV_IMAGE_TAG.to_owned());
            (DEV_TELEMETRY_HOST, tag)
        } else {
            (RELEASE_TELEMETRY_HOST, RELEASE_IMAGE_TAG.to_owned())
        };

        let layout = InstallLayout::new(home);
        let configuration_directory = layout.config_dir();
        let user_key_directory = configuration_directory.join("keys");
        Self {
            home_directory: layout.home().to_owned(),
            cache_directory: None,
            user_configuration_file_path: configuration_directory.join("config.json"),
            user_key_path: user_key_directory.join("user.key"),
            user_key_directory,
            configuration_directory,
            ci_user_identifier_env_key: CI_USER_ID_ENV,
            m2_cache_directory_name: PackageManager::Maven.directory_name(),
            gradle_cache_directory_name: PackageManager::Gradle.directory_name(),
            privacy_results_path_suffix: Utf8Path::new(".privado").join("privado.json"),
            privado_repository: format!("https://github.com/{REPOSITORY_NAME}"),
            privado_repository_name: REPOSITORY_NAME,
            privado_repository_release_filename: PlatformDescriptor::compiled()
                .map(|platform| format!("{TOOL_NAME}-{platform}.tar.gz")),
            privado_telemetry_endpoint: format!("https://{telemetry_host}/api/event?version=2"),
            slowdown_time: SLOWDOWN_TIME,
            dev_mode,
            container: ContainerConfiguration::for_tag(&image_tag),
            image_tag,
        }
    }
}

fn resolve_home(dirs: &dyn BaseDirs) -> Option<Utf8PathBuf> {
    let Some(raw) = dirs.home_dir() else {
        warn!("could not determine the home directory");
        return None;
    };
    Utf8PathBuf::from_path_buf(raw).map_or_else(
        |path| {
            warn!("ignoring non-UTF-8 home directory {}", path.display());
            None
        },
        Some,
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
