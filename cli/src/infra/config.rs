//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::InstallerConfig;
use crate::domain::config::validate;

/// Environment variable that overrides the configuration location.
pub const CONFIG_ENV: &str = "LOGSIM_INSTALLER_CONFIG";
/// Configuration location when the override is unset.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/log_simulator/installer.yaml";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    /// Store at `$LOGSIM_INSTALLER_CONFIG`, falling back to the system path.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        Self { path }
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<InstallerConfig> {
        if !self.path.exists() {
            return Ok(InstallerConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let config: InstallerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        validate(&config).with_context(|| format!("invalid {}", self.path.display()))?;
        Ok(config)
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}
