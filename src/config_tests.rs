//! Unit tests for configuration bootstrap.

use super::*;
use privado_common::test_support::MockBaseDirs;
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn release_inputs() -> BootstrapInputs {
    BootstrapInputs {
        dev_override: None,
        tag_override: None,
        executable: Some(PathBuf::from("/usr/local/bin/privado")),
        temp_dir: PathBuf::from("/tmp"),
    }
}

struct Sandbox {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Sandbox {
    fn home(&self) -> Utf8PathBuf {
        self.root.join("home")
    }

    fn os_cache_root(&self) -> Utf8PathBuf {
        self.root.join("os-cache")
    }

    fn dirs(&self, with_home: bool) -> MockBaseDirs {
        let home = with_home.then(|| self.home().into_std_path_buf());
        let os_root = self.os_cache_root().into_std_path_buf();
        let mut dirs = MockBaseDirs::new();
        dirs.expect_home_dir().returning(move || home.clone());
        dirs.expect_cache_dir()
            .returning(move || Some(os_root.clone()));
        dirs
    }
}

#[fixture]
fn sandbox() -> Sandbox {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    std::fs::create_dir_all(root.join("home")).expect("create home");
    Sandbox { _dir: dir, root }
}

#[rstest]
#[case("1", Some(true))]
#[case("t", Some(true))]
#[case("TRUE", Some(true))]
#[case("True", Some(true))]
#[case("0", Some(false))]
#[case("F", Some(false))]
#[case("false", Some(false))]
#[case("yes", None)]
#[case("tRuE", None)]
#[case("", None)]
fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
#[case::unset(None, false)]
#[case::truthy(Some("1"), true)]
#[case::falsy(Some("false"), false)]
#[case::garbage(Some("sometimes"), false)]
fn dev_override_controls_dev_mode(#[case] raw: Option<&str>, #[case] expected: bool) {
    let inputs = BootstrapInputs {
        dev_override: raw.map(str::to_owned),
        ..release_inputs()
    };
    assert_eq!(inputs.dev_mode(), expected);
}

#[test]
fn executable_under_temp_dir_enables_dev_mode() {
    let inputs = BootstrapInputs {
        executable: Some(PathBuf::from("/tmp/build-1234/exe/privado")),
        ..release_inputs()
    };
    assert!(inputs.dev_mode());
}

#[test]
fn temp_dir_match_is_per_component() {
    let inputs = BootstrapInputs {
        executable: Some(PathBuf::from("/tmpfiles/privado")),
        ..release_inputs()
    };
    assert!(!inputs.dev_mode());
}

#[test]
fn empty_temp_dir_never_matches() {
    let inputs = BootstrapInputs {
        executable: Some(PathBuf::from("/anywhere/privado")),
        temp_dir: PathBuf::new(),
        ..release_inputs()
    };
    assert!(!inputs.dev_mode());
}

#[test]
fn release_mode_uses_production_endpoints() {
    let config = Configuration::derive(Utf8PathBuf::from("/home/ada"), &release_inputs());

    assert!(!config.dev_mode);
    assert_eq!(config.image_tag, "latest");
    assert_eq!(
        config.privado_telemetry_endpoint,
        "https://cli.privado.ai/api/event?version=2"
    );
    assert_eq!(
        config.container.image_url,
        "public.ecr.aws/privado/privado:latest"
    );
}

#[rstest]
#[case::default_tag(None, "dev")]
#[case::empty_tag(Some(""), "dev")]
#[case::override_tag(Some("pr-512"), "pr-512")]
fn dev_mode_uses_dev_endpoints(#[case] tag: Option<&str>, #[case] expected_tag: &str) {
    let inputs = BootstrapInputs {
        dev_override: Some("true".to_owned()),
        tag_override: tag.map(str::to_owned),
        ..release_inputs()
    };
    let config = Configuration::derive(Utf8PathBuf::from("/home/ada"), &inputs);

    assert!(config.dev_mode);
    assert_eq!(config.image_tag, expected_tag);
    assert_eq!(
        config.privado_telemetry_endpoint,
        "https://t.cli.privado.ai/api/event?version=2"
    );
    assert!(config.container.image_url.ends_with(&format!(":{expected_tag}")));
}

#[test]
fn tag_override_is_ignored_in_release_mode() {
    let inputs = BootstrapInputs {
        tag_override: Some("pr-512".to_owned()),
        ..release_inputs()
    };
    let config = Configuration::derive(Utf8PathBuf::from("/home/ada"), &inputs);
    assert_eq!(config.image_tag, "latest");
}

#[test]
fn paths_live_under_home() {
    let config = Configuration::derive(Utf8PathBuf::from("/home/ada"), &release_inputs());

    assert_eq!(config.home_directory, "/home/ada");
    assert_eq!(config.configuration_directory, "/home/ada/.privado");
    assert_eq!(
        config.user_configuration_file_path,
        "/home/ada/.privado/config.json"
    );
    assert_eq!(config.user_key_directory, "/home/ada/.privado/keys");
    assert_eq!(config.user_key_path, "/home/ada/.privado/keys/user.key");
    assert_eq!(config.privacy_results_path_suffix, ".privado/privado.json");
    assert!(config.cache_directory.is_none());
}

#[test]
fn static_fields_match_the_release_repository() {
    let config = Configuration::derive(Utf8PathBuf::from("/home/ada"), &release_inputs());

    assert_eq!(config.ci_user_identifier_env_key, "PRIVADO_CI_USER_ID");
    assert_eq!(config.m2_cache_directory_name, ".m2");
    assert_eq!(config.gradle_cache_directory_name, ".gradle");
    assert_eq!(
        config.privado_repository,
        "https://github.com/Privado-Inc/privado-cli"
    );
    assert_eq!(config.privado_repository_name, "Privado-Inc/privado-cli");
    assert_eq!(config.slowdown_time, Duration::from_millis(600));
    if let Some(filename) = &config.privado_repository_release_filename {
        assert!(filename.starts_with("privado-"));
        assert!(filename.ends_with(".tar.gz"));
    }
}

#[rstest]
#[case(PackageManager::Maven, "/root/.m2")]
#[case(PackageManager::Gradle, "/root/.gradle")]
fn container_mounts_follow_package_manager(
    #[case] manager: PackageManager,
    #[case] expected: &str,
) {
    let container = ContainerConfiguration::for_tag("latest");
    assert_eq!(container.package_cache_mount(manager), expected);
    assert_eq!(container.docker_access_key_env, "PRIVADO_DOCKER_ACCESS_KEY");
    assert_eq!(container.source_code_volume_dir, "/app/code");
}

#[rstest]
fn bootstrap_reuses_existing_config_cache(sandbox: Sandbox) {
    let config_cache = sandbox.home().join(".privado").join(".cache");
    std::fs::create_dir_all(&config_cache).expect("create config cache");
    let dirs = sandbox.dirs(true);

    let config = Configuration::bootstrap_with(&dirs, &release_inputs());

    assert_eq!(config.cache_directory, Some(config_cache));
    assert!(!sandbox.os_cache_root().exists());
}

#[rstest]
fn bootstrap_creates_os_cache_when_nothing_exists(sandbox: Sandbox) {
    let dirs = sandbox.dirs(true);

    let config = Configuration::bootstrap_with(&dirs, &release_inputs());

    let expected = sandbox.os_cache_root().join("privado");
    assert_eq!(config.cache_directory.as_ref(), Some(&expected));
    assert!(expected.is_dir());
    assert_eq!(config.home_directory, sandbox.home());
}

#[rstest]
fn bootstrap_without_home_leaves_cache_unset(sandbox: Sandbox) {
    let dirs = sandbox.dirs(false);

    let config = Configuration::bootstrap_with(&dirs, &release_inputs());

    assert!(config.cache_directory.is_none());
    assert_eq!(config.home_directory, "");
    assert!(!sandbox.os_cache_root().exists());
}

#[rstest]
fn bootstrap_survives_unusable_cache_location(sandbox: Sandbox) {
    std::fs::write(sandbox.os_cache_root(), b"not a directory").expect("block os root");
    let dirs = sandbox.dirs(true);

    let config = Configuration::bootstrap_with(&dirs, &release_inputs());

    assert!(config.cache_directory.is_none());
}

#[test]
fn from_process_reads_environment() {
    temp_env::with_vars(
        [(DEV_MODE_ENV, Some("1")), (IMAGE_TAG_ENV, Some("nightly"))],
        || {
            let inputs = BootstrapInputs::from_process();
            assert_eq!(inputs.dev_override.as_deref(), Some("1"));
            assert_eq!(inputs.tag_override.as_deref(), Some("nightly"));
            assert!(inputs.dev_mode());
        },
    );
}

#[test]
fn configuration_serialises_to_json() {
    let config = Configuration::derive(Utf8PathBuf::from("/home/ada"), &release_inputs());
    let json = serde_json::to_value(&config).expect("serialise");

    assert_eq!(json["configuration_directory"], "/home/ada/.privado");
    assert_eq!(json["cache_directory"], serde_json::Value::Null);
    assert_eq!(json["container"]["image_url"], "public.ecr.aws/privado/privado:latest");
}
