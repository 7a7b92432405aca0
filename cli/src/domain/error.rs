//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs` or `std::process`. `InstallError` implements
//! `thiserror::Error` and converts to `anyhow::Error` via the `?` operator;
//! callers classify a failure with `err.downcast_ref::<InstallError>()`.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::service::ServiceAction;

/// Every way an installer run can stop short of success.
#[derive(Debug, Error)]
pub enum InstallError {
    // ── Usage ─────────────────────────────────────────────────────────────────
    #[error("{0}")]
    Usage(String),

    // ── Privilege ─────────────────────────────────────────────────────────────
    #[error("This installer must be run as root. Re-run it with sudo.")]
    Privilege,

    #[error("Another installer run holds {}. Wait for it to finish and retry.", path.display())]
    Lock { path: PathBuf },

    // ── Prerequisites ─────────────────────────────────────────────────────────
    #[error("Package manager '{tool}' not found on PATH. It is required to install prerequisites.")]
    PackageToolMissing { tool: String },

    #[error("Invalid version string '{value}': expected <major>.<minor>")]
    InvalidVersion { value: String },

    #[error("{name} {required} or later is required (found: {found}).{hint}")]
    Prerequisite {
        name: String,
        required: String,
        found: String,
        hint: &'static str,
    },

    #[error("Package manager step '{step}' failed: {detail}")]
    PackageInstall { step: String, detail: String },

    // ── Filesystem ────────────────────────────────────────────────────────────
    #[error("Staged artifact not found: {}. Fetch the release bundle first.", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("Cannot create directory {}: {reason}", path.display())]
    CreateDir { path: PathBuf, reason: String },

    #[error("Cannot copy {} to {}: {reason}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Cannot remove {}: {reason}", path.display())]
    Remove { path: PathBuf, reason: String },

    // ── Service manager ───────────────────────────────────────────────────────
    #[error("systemctl {action} {unit} failed: {detail}")]
    ServiceManager {
        action: ServiceAction,
        unit: String,
        detail: String,
    },
}

impl InstallError {
    /// Short category label used in diagnostic logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Privilege => "privilege",
            Self::Lock { .. } => "lock",
            Self::PackageToolMissing { .. }
            | Self::InvalidVersion { .. }
            | Self::Prerequisite { .. }
            | Self::PackageInstall { .. } => "prerequisite",
            Self::MissingArtifact { .. }
            | Self::CreateDir { .. }
            | Self::Copy { .. }
            | Self::Remove { .. } => "io",
            Self::ServiceManager { .. } => "service-manager",
        }
    }
}
