//! Application wiring: builds the production adapters and runs one invocation.
//!
//! `main` resolves arguments and owns the process exit code; everything
//! between a resolved `Invocation` and an `InstallOutcome` is assembled here.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ConfigStore, PrivilegeProbe};
use crate::application::services::orchestrator::{self, Host, InstallOutcome, Plan};
use crate::application::services::privilege;
use crate::domain::paths::LOCK_FILE;
use crate::domain::{InstallationPaths, InstallerConfig, Invocation, PrerequisiteRequirement};
use crate::infra::apt::{AptPackageManager, PythonRuntime};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::infra::host::{FileRunLock, ProcPrivilegeProbe};
use crate::infra::prompt::ConsolePrompter;
use crate::infra::systemctl::SystemctlServiceManager;
use crate::output::{HumanRenderer, OutputContext, TerminalReporter};

/// Unified application context for a single run.
pub struct AppContext {
    /// Terminal output context.
    pub output: OutputContext,
    /// Loaded (or default) installer configuration.
    pub config: InstallerConfig,
    /// Source and destination locations.
    pub paths: InstallationPaths,
}

impl AppContext {
    /// Pass the privilege gate, then load configuration and initialise
    /// diagnostic logging.
    ///
    /// The configuration file may be readable by root only, so nothing is
    /// read before the gate.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::Privilege` when not elevated, or an error if
    /// the configuration file exists but is unreadable or invalid.
    pub fn new(probe: &impl PrivilegeProbe, store: &impl ConfigStore) -> Result<Self> {
        privilege::ensure_elevated(probe)?;
        let output = OutputContext::new(false);
        let config = store.load()?;
        crate::logging::init(&config.logging.level);
        tracing::debug!(path = %store.path().display(), ?config, "configuration loaded");
        Ok(Self {
            output,
            config,
            paths: InstallationPaths::default(),
        })
    }

    /// Execute `invocation` against the live host and render the outcome.
    ///
    /// # Errors
    ///
    /// Propagates the first failing gate from the orchestrator.
    pub async fn run(&self, invocation: Invocation) -> Result<InstallOutcome> {
        let commands = &self.config.commands;
        let timeout = Duration::from_secs(commands.timeout_secs);
        let package_timeout = Duration::from_secs(commands.package_timeout_secs);

        let prompter = if invocation.unattended {
            ConsolePrompter::unattended()
        } else {
            ConsolePrompter::interactive()
        };
        let services = SystemctlServiceManager::new(TokioCommandRunner::new(timeout));
        let packages = AptPackageManager::new(TokioCommandRunner::new(timeout), package_timeout);
        let runtime = PythonRuntime::new(TokioCommandRunner::new(timeout));
        let lock = FileRunLock::new(LOCK_FILE);

        let host = Host {
            privilege: &ProcPrivilegeProbe,
            lock: &lock,
            fs: &LocalFs,
            services: &services,
            packages: &packages,
            runtime: &runtime,
            prompter: &prompter,
        };
        let requirement =
            PrerequisiteRequirement::python(&self.config.prerequisites.runtime_min_version);
        let plan = Plan {
            paths: &self.paths,
            requirement: &requirement,
        };

        let reporter = TerminalReporter::new(&self.output);
        let outcome = orchestrator::run(&host, invocation, &plan, &reporter).await?;
        HumanRenderer::new(&self.output).render_outcome(&outcome, &self.paths);
        Ok(outcome)
    }
}

/// Load configuration from its default location and run `invocation`.
///
/// # Errors
///
/// Returns configuration errors and every orchestrator failure.
pub async fn run(invocation: Invocation) -> Result<InstallOutcome> {
    let ctx = AppContext::new(&ProcPrivilegeProbe, &YamlConfigStore::from_env())?;
    ctx.run(invocation).await
}
