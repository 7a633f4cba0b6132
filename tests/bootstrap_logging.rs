//! Log records emitted while bootstrapping the configuration.
//!
//! Startup failures are swallowed, so the warning is the only trace they
//! leave. Kept in its own test binary because the logger is process-global.

use logtest::Logger;
use privado::config::{BootstrapInputs, Configuration};
use privado_common::test_support::MockBaseDirs;

#[test]
fn missing_home_directory_is_logged_and_tolerated() {
    let mut logger = Logger::start();
    let mut dirs = MockBaseDirs::new();
    dirs.expect_home_dir().returning(|| None);
    dirs.expect_cache_dir().never();

    let config = Configuration::bootstrap_with(&dirs, &BootstrapInputs::default());

    assert!(config.cache_directory.is_none());
    let mut warnings = Vec::new();
    while let Some(record) = logger.pop() {
        if record.level() == log::Level::Warn {
            warnings.push(record.args().to_string());
        }
    }
    assert!(
        warnings
            .iter()
            .any(|message| message.contains("could not determine the home directory")),
        "warnings were {warnings:?}"
    );
    assert!(
        warnings
            .iter()
            .any(|message| message.contains("skipping cache directory resolution")),
        "warnings were {warnings:?}"
    );
}
