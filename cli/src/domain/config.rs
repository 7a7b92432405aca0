//! Domain types and validators for installer configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::prerequisite::{DEFAULT_RUNTIME_MIN_VERSION, parse_major_minor};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/log_simulator/installer.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstallerConfig {
    pub logging: LoggingConfig,
    pub commands: CommandsConfig,
    pub prerequisites: PrerequisitesConfig,
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `logsim_installer=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// External command limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Timeout for systemctl and probe commands.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for package index refresh and package installation.
    #[serde(default = "default_package_timeout_secs")]
    pub package_timeout_secs: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            package_timeout_secs: default_package_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_package_timeout_secs() -> u64 {
    900
}

/// Prerequisite floors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerequisitesConfig {
    #[serde(default = "default_runtime_min_version")]
    pub runtime_min_version: String,
}

impl Default for PrerequisitesConfig {
    fn default() -> Self {
        Self {
            runtime_min_version: default_runtime_min_version(),
        }
    }
}

fn default_runtime_min_version() -> String {
    DEFAULT_RUNTIME_MIN_VERSION.to_string()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Reject configurations that would make a run misbehave.
///
/// # Errors
///
/// Returns an error if a timeout is zero or the version floor does not parse.
pub fn validate(config: &InstallerConfig) -> Result<()> {
    anyhow::ensure!(
        config.commands.timeout_secs > 0,
        "commands.timeout_secs must be greater than 0"
    );
    anyhow::ensure!(
        config.commands.package_timeout_secs > 0,
        "commands.package_timeout_secs must be greater than 0"
    );
    parse_major_minor(&config.prerequisites.runtime_min_version)?;
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
