//! Configuration location override through `LOGSIM_INSTALLER_CONFIG`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use logsim_installer::application::ports::ConfigStore;
use logsim_installer::infra::config::{CONFIG_ENV, DEFAULT_CONFIG_PATH, YamlConfigStore};
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
#[allow(unsafe_code)]
fn test_env_override_selects_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("installer.yaml");
    std::fs::write(&path, "commands:\n  package_timeout_secs: 60\n").unwrap();

    // SAFETY: serialised by #[serial]; no other thread reads the environment.
    unsafe { std::env::set_var(CONFIG_ENV, &path) };
    let store = YamlConfigStore::from_env();
    unsafe { std::env::remove_var(CONFIG_ENV) };

    assert_eq!(store.path(), path);
    assert_eq!(store.load().unwrap().commands.package_timeout_secs, 60);
}

#[test]
#[serial]
#[allow(unsafe_code)]
fn test_unset_override_uses_system_path() {
    // SAFETY: serialised by #[serial]; no other thread reads the environment.
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert_eq!(
        YamlConfigStore::from_env().path(),
        std::path::PathBuf::from(DEFAULT_CONFIG_PATH)
    );
}

#[test]
#[serial]
#[allow(unsafe_code)]
fn test_empty_override_is_ignored() {
    // SAFETY: serialised by #[serial]; no other thread reads the environment.
    unsafe { std::env::set_var(CONFIG_ENV, "") };
    let store = YamlConfigStore::from_env();
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert_eq!(store.path(), std::path::PathBuf::from(DEFAULT_CONFIG_PATH));
}
