//! Application service: install / uninstall lifecycle orchestration.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through the injected `Host` ports. Gates run strictly
//! in order and the first failure aborts the run; there is no rollback.

use anyhow::Result;

use crate::application::ports::{
    HostFs, PackageManager, PrivilegeProbe, ProgressReporter, Prompter, RunLock, RuntimeProbe,
    ServiceManager,
};
use crate::application::services::{prerequisites, privilege, service_lifecycle, staging};
use crate::domain::{
    InstallError, InstallationPaths, Invocation, InvocationMode, PrerequisiteRequirement,
    ServiceAction, ServiceState, copy_plan,
};

/// Every host capability the orchestrator touches.
pub struct Host<'a, P, L, F, S, K, V, Q> {
    pub privilege: &'a P,
    pub lock: &'a L,
    pub fs: &'a F,
    pub services: &'a S,
    pub packages: &'a K,
    pub runtime: &'a V,
    pub prompter: &'a Q,
}

/// What a run is applied to.
pub struct Plan<'a> {
    pub paths: &'a InstallationPaths,
    pub requirement: &'a PrerequisiteRequirement,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Files staged. `service` is the observed unit state for service installs.
    Installed { service: Option<ServiceState> },
    /// Teardown finished. Both flags are `false` when nothing was installed.
    Uninstalled {
        unit_removed: bool,
        agent_dir_removed: bool,
    },
}

/// Execute `invocation` against `host`.
///
/// # Errors
///
/// Returns the first gate failure as an `InstallError` wrapped in `anyhow`,
/// or `InstallError::Usage` when asked to run the help mode.
pub async fn run<P, L, F, S, K, V, Q>(
    host: &Host<'_, P, L, F, S, K, V, Q>,
    invocation: Invocation,
    plan: &Plan<'_>,
    reporter: &impl ProgressReporter,
) -> Result<InstallOutcome>
where
    P: PrivilegeProbe,
    L: RunLock,
    F: HostFs,
    S: ServiceManager,
    K: PackageManager,
    V: RuntimeProbe,
    Q: Prompter,
{
    if invocation.mode == InvocationMode::Help {
        return Err(InstallError::Usage("help requested".to_string()).into());
    }

    privilege::ensure_elevated(host.privilege)?;
    let _guard = host.lock.acquire()?;
    tracing::info!(mode = ?invocation.mode, unattended = invocation.unattended, "run started");

    match invocation.mode {
        InvocationMode::Uninstall => uninstall(host, plan.paths, reporter).await,
        mode => install(host, mode, plan, reporter).await,
    }
}

async fn install<P, L, F, S, K, V, Q>(
    host: &Host<'_, P, L, F, S, K, V, Q>,
    mode: InvocationMode,
    plan: &Plan<'_>,
    reporter: &impl ProgressReporter,
) -> Result<InstallOutcome>
where
    F: HostFs,
    S: ServiceManager,
    K: PackageManager,
    V: RuntimeProbe,
    Q: Prompter,
{
    prerequisites::check(
        plan.requirement,
        host.runtime,
        host.packages,
        host.prompter,
        reporter,
    )
    .await?;

    staging::stage_files(host.fs, &copy_plan(plan.paths, mode), reporter)?;

    if !mode.registers_service() {
        return Ok(InstallOutcome::Installed { service: None });
    }

    let unit = plan.paths.unit_name();
    service_lifecycle::activate(host.services, &unit, reporter).await?;
    let state = service_lifecycle::observe(host.services, &unit, reporter).await;
    Ok(InstallOutcome::Installed { service: state })
}

async fn uninstall<P, L, F, S, K, V, Q>(
    host: &Host<'_, P, L, F, S, K, V, Q>,
    paths: &InstallationPaths,
    reporter: &impl ProgressReporter,
) -> Result<InstallOutcome>
where
    F: HostFs,
    S: ServiceManager,
{
    let unit = paths.unit_name();
    let unit_file = paths.unit_dest();

    let unit_removed = if host.fs.exists(&unit_file) {
        service_lifecycle::deactivate(host.services, &unit, reporter).await?;
        reporter.step(&format!("Removing {}...", unit_file.display()));
        host.fs
            .remove_file(&unit_file)
            .map_err(|e| InstallError::Remove {
                path: unit_file.clone(),
                reason: format!("{e:#}"),
            })?;
        service_lifecycle::apply(host.services, ServiceAction::Reload, &unit).await?;
        reporter.success(&format!("Unregistered {unit}"));
        true
    } else {
        tracing::debug!(path = %unit_file.display(), "unit file absent; skipping service teardown");
        false
    };

    let agent_dir = &paths.agent_dest_dir;
    let agent_dir_removed = if host.fs.exists(agent_dir) {
        reporter.step(&format!("Removing {}...", agent_dir.display()));
        host.fs
            .remove_dir_all(agent_dir)
            .map_err(|e| InstallError::Remove {
                path: agent_dir.clone(),
                reason: format!("{e:#}"),
            })?;
        reporter.success(&format!("Removed {}", agent_dir.display()));
        true
    } else {
        false
    };

    Ok(InstallOutcome::Uninstalled {
        unit_removed,
        agent_dir_removed,
    })
}
