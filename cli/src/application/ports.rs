//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`
//! or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{InstallerConfig, ServiceAction, ServiceState};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// The returned `Output` carries exit status and captured stdout/stderr;
/// callers branch on it directly rather than on any ambient state.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Host Ports ────────────────────────────────────────────────────────────────

/// Service-manager transitions and state queries for one unit at a time.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Issue `action` against `unit` and return the raw command result.
    async fn apply(&self, action: ServiceAction, unit: &str) -> Result<Output>;
    /// Observe the current state of `unit`.
    async fn state(&self, unit: &str) -> Result<ServiceState>;
}

/// Package-manager operations used for prerequisite remediation.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Name of the package tool, for messages.
    fn tool(&self) -> &str;
    /// Whether the package tool is installed.
    fn is_available(&self) -> bool;
    /// Refresh the package index.
    async fn refresh_index(&self) -> Result<Output>;
    /// Install all `packages` in one transaction.
    async fn install(&self, packages: &[&str]) -> Result<Output>;
}

/// Queries the installed version of the agent's runtime.
#[allow(async_fn_in_trait)]
pub trait RuntimeProbe {
    /// Raw version string of the installed runtime, or `None` if it is absent.
    async fn installed_version(&self) -> Result<Option<String>>;
}

/// Answers whether the process runs with administrator privilege.
pub trait PrivilegeProbe {
    /// # Errors
    ///
    /// Returns an error if the effective identity cannot be determined.
    fn is_elevated(&self) -> Result<bool>;
}

/// Serialises installer runs on a host.
pub trait RunLock {
    /// Held for the rest of the run; dropping it releases the lock.
    type Guard;
    /// Acquire the lock without blocking.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::Lock` if another run holds it.
    fn acquire(&self) -> Result<Self::Guard>;
}

/// Filesystem operations the orchestrator performs on the host.
pub trait HostFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Copy `from` over `to`, replacing any existing file.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

/// Interaction provider for operator confirmations.
///
/// Unattended runs get a provider that declines without blocking.
pub trait Prompter {
    /// Ask a yes/no question whose default answer is "no".
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading installer configuration.
pub trait ConfigStore {
    /// Load configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<InstallerConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> PathBuf;
}
