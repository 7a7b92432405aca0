//! Service-manager transitions for the agent unit.
//!
//! Each transition is issued unconditionally and its own exit status is the
//! source of truth. The first failure aborts the sequence.

use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, ServiceManager};
use crate::domain::service::{ACTIVATE, DEACTIVATE};
use crate::domain::{InstallError, ServiceAction, ServiceState};

/// Issue one transition and fail unless it exits successfully.
///
/// # Errors
///
/// Returns `InstallError::ServiceManager` with the captured stderr on a
/// non-zero exit, or an error if the command could not be run at all.
pub async fn apply(svc: &impl ServiceManager, action: ServiceAction, unit: &str) -> Result<()> {
    let output = svc
        .apply(action, unit)
        .await
        .with_context(|| format!("running systemctl {action} {unit}"))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let detail = if stderr.is_empty() {
        match output.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by a signal".to_string(),
        }
    } else {
        stderr
    };
    Err(InstallError::ServiceManager {
        action,
        unit: unit.to_string(),
        detail,
    }
    .into())
}

/// Reload the registry, start the unit, then enable it at boot.
///
/// # Errors
///
/// Returns the first failing transition; later transitions are not issued.
pub async fn activate(
    svc: &impl ServiceManager,
    unit: &str,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    run_sequence(svc, &ACTIVATE, unit, reporter).await
}

/// Stop the unit, then disable it at boot.
///
/// # Errors
///
/// Returns the first failing transition; later transitions are not issued.
pub async fn deactivate(
    svc: &impl ServiceManager,
    unit: &str,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    run_sequence(svc, &DEACTIVATE, unit, reporter).await
}

async fn run_sequence(
    svc: &impl ServiceManager,
    actions: &[ServiceAction],
    unit: &str,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    for &action in actions {
        reporter.step(&step_message(action, unit));
        apply(svc, action, unit).await?;
        tracing::debug!(%action, unit, "service transition ok");
    }
    Ok(())
}

fn step_message(action: ServiceAction, unit: &str) -> String {
    match action {
        ServiceAction::Reload => "Reloading systemd unit definitions...".to_string(),
        ServiceAction::Start => format!("Starting {unit}..."),
        ServiceAction::Stop => format!("Stopping {unit}..."),
        ServiceAction::Enable => format!("Enabling {unit} at boot..."),
        ServiceAction::Disable => format!("Disabling {unit} at boot..."),
    }
}

/// Observe the unit for the final report.
///
/// A failed query or a unit that is not active after activation becomes a
/// warning; neither fails the run.
pub async fn observe(
    svc: &impl ServiceManager,
    unit: &str,
    reporter: &impl ProgressReporter,
) -> Option<ServiceState> {
    match svc.state(unit).await {
        Ok(state) => {
            if !state.is_running() {
                reporter.warn(&format!(
                    "{unit} is {}; check `journalctl -u {unit}`",
                    state.describe()
                ));
            }
            Some(state)
        }
        Err(e) => {
            reporter.warn(&format!("Could not query {unit} state: {e:#}"));
            None
        }
    }
}
