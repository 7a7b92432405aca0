//! Prerequisite gate: package tool presence and runtime version floor.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{PackageManager, ProgressReporter, Prompter, RuntimeProbe};
use crate::domain::InstallError;
use crate::domain::prerequisite::{PrerequisiteRequirement, parse_major_minor, satisfies};

/// How the gate concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteOutcome {
    /// The installed runtime already meets the floor.
    Satisfied { installed: String },
    /// The operator accepted remediation and the packages were installed.
    Remediated,
}

/// Verify the package tool and runtime for `req`.
///
/// When the runtime is missing or too old the operator is asked through
/// `prompter` whether to install it. Declining aborts the run. Accepting
/// refreshes the package index and installs `req.packages`; the runtime is
/// not probed again afterwards.
///
/// # Errors
///
/// - `InstallError::PackageToolMissing` if the package tool is absent.
/// - `InstallError::InvalidVersion` if either version string is malformed.
/// - `InstallError::Prerequisite` if the runtime is unsatisfied and the
///   operator declines.
/// - `InstallError::PackageInstall` if a package-manager step fails.
pub async fn check(
    req: &PrerequisiteRequirement,
    runtime: &impl RuntimeProbe,
    packages: &impl PackageManager,
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
) -> Result<PrerequisiteOutcome> {
    if !packages.is_available() {
        return Err(InstallError::PackageToolMissing {
            tool: packages.tool().to_string(),
        }
        .into());
    }

    parse_major_minor(&req.minimum_version)?;

    reporter.step(&format!("Checking {} >= {}...", req.name, req.minimum_version));
    let installed = runtime
        .installed_version()
        .await
        .with_context(|| format!("querying {} version", req.name))?;

    let found = match installed {
        Some(version) => {
            if satisfies(&version, &req.minimum_version)? {
                reporter.success(&format!("{} {version} found", req.name));
                return Ok(PrerequisiteOutcome::Satisfied { installed: version });
            }
            version
        }
        None => "not installed".to_string(),
    };
    tracing::info!(name = %req.name, %found, required = %req.minimum_version, "prerequisite unsatisfied");

    let package_list = req.packages.join(" ");
    let accepted = prompter
        .confirm(&format!(
            "{} {} or later is required (found: {found}). Install {package_list} now?",
            req.name, req.minimum_version
        ))
        .context("asking for prerequisite installation")?;
    if !accepted {
        return Err(InstallError::Prerequisite {
            name: req.name.clone(),
            required: req.minimum_version.clone(),
            found,
            hint: "\nInstall it with your package manager and re-run the installer.",
        }
        .into());
    }

    remediate(req, packages, reporter).await?;
    Ok(PrerequisiteOutcome::Remediated)
}

async fn remediate(
    req: &PrerequisiteRequirement,
    packages: &impl PackageManager,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("Refreshing package index...");
    let output = packages
        .refresh_index()
        .await
        .context("refreshing package index")?;
    if !output.status.success() {
        return Err(InstallError::PackageInstall {
            step: "refresh index".to_string(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    let names: Vec<&str> = req.packages.iter().map(String::as_str).collect();
    reporter.step(&format!("Installing {}...", names.join(" ")));
    let output = packages
        .install(&names)
        .await
        .with_context(|| format!("installing {}", names.join(" ")))?;
    if !output.status.success() {
        return Err(InstallError::PackageInstall {
            step: format!("install {}", names.join(" ")),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }
    reporter.success(&format!("Installed {}", names.join(" ")));
    Ok(())
}
