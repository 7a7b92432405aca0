//! Privilege gate: the first check of every mutating run.

use anyhow::{Context, Result};

use crate::application::ports::PrivilegeProbe;
use crate::domain::InstallError;

/// Abort unless the process runs elevated.
///
/// # Errors
///
/// Returns `InstallError::Privilege` when not elevated, or an error if the
/// effective identity cannot be read.
pub fn ensure_elevated(probe: &impl PrivilegeProbe) -> Result<()> {
    let elevated = probe
        .is_elevated()
        .context("determining effective user")?;
    if !elevated {
        return Err(InstallError::Privilege.into());
    }
    tracing::debug!("privilege gate passed");
    Ok(())
}
