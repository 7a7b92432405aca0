//! File staging: place the agent, its config and (for service installs)
//! its unit on the host.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{HostFs, ProgressReporter};
use crate::domain::{FileCopyTask, InstallError};

/// Copy every task in order, overwriting existing destinations.
///
/// All sources are checked before the first destination is touched, so a
/// half-populated staging directory never produces a half-installed host.
///
/// # Errors
///
/// - `InstallError::MissingArtifact` if any source is absent.
/// - `InstallError::CreateDir` / `InstallError::Copy` naming the failing path.
pub fn stage_files(
    fs: &impl HostFs,
    tasks: &[FileCopyTask],
    reporter: &impl ProgressReporter,
) -> Result<()> {
    if let Some(missing) = tasks.iter().find(|t| !fs.exists(&t.source)) {
        return Err(InstallError::MissingArtifact {
            path: missing.source.clone(),
        }
        .into());
    }

    for task in tasks {
        if let Some(parent) = task.dest.parent()
            && !fs.exists(parent)
        {
            fs.create_dir_all(parent)
                .map_err(|e| InstallError::CreateDir {
                    path: parent.to_path_buf(),
                    reason: format!("{e:#}"),
                })?;
        }

        fs.copy(&task.source, &task.dest)
            .and_then(|()| fs.set_mode(&task.dest, task.mode))
            .map_err(|e| InstallError::Copy {
                from: task.source.clone(),
                to: task.dest.clone(),
                reason: format!("{e:#}"),
            })?;
        tracing::debug!(from = %task.source.display(), to = %task.dest.display(), mode = format_args!("{:o}", task.mode), "staged");
        reporter.success(&format!("Installed {}", task.dest.display()));
    }
    Ok(())
}
