//! Runtime prerequisite and version-floor arithmetic.
//!
//! Pure functions only: no I/O, no async, no process execution.

use semver::Version;

use crate::domain::error::InstallError;

/// Default floor for the agent's interpreter.
pub const DEFAULT_RUNTIME_MIN_VERSION: &str = "3.10";

/// A runtime the agent needs, with its version floor and remediation packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteRequirement {
    pub name: String,
    pub minimum_version: String,
    /// Packages installed together when the operator accepts remediation.
    pub packages: Vec<String>,
}

impl PrerequisiteRequirement {
    /// The Python 3 interpreter plus pip.
    #[must_use]
    pub fn python(minimum_version: &str) -> Self {
        Self {
            name: "python3".to_string(),
            minimum_version: minimum_version.to_string(),
            packages: vec!["python3".to_string(), "python3-pip".to_string()],
        }
    }
}

/// Parse a `<major>[.<minor>[.<anything>]]` version as numeric `major.minor`.
///
/// Components past the minor are ignored (`3.11.0rc1` is `3.11`). A missing
/// minor counts as `0`.
///
/// # Errors
///
/// Returns `InstallError::InvalidVersion` if the major or minor component is
/// not a non-negative integer.
pub fn parse_major_minor(value: &str) -> Result<Version, InstallError> {
    let invalid = || InstallError::InvalidVersion {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let mut parts = trimmed.split('.');
    let major = parts
        .next()
        .filter(|p| !p.is_empty())
        .and_then(|p| p.parse::<u64>().ok())
        .ok_or_else(invalid)?;
    let minor = match parts.next() {
        None => 0,
        Some(p) => p.parse::<u64>().map_err(|_| invalid())?,
    };
    Ok(Version::new(major, minor, 0))
}

/// Returns `Ok(true)` when `installed >= required`.
///
/// # Errors
///
/// Returns `InstallError::InvalidVersion` if either side fails to parse.
pub fn satisfies(installed: &str, required: &str) -> Result<bool, InstallError> {
    let required = parse_major_minor(required)?;
    let installed = parse_major_minor(installed)?;
    Ok(installed >= required)
}

/// Extract the version from `python3 --version` output (`Python 3.10.12`).
#[must_use]
pub fn version_from_banner(banner: &str) -> Option<&str> {
    let line = banner.lines().find(|l| !l.trim().is_empty())?.trim();
    let version = line
        .split_once(char::is_whitespace)
        .map_or(line, |(_, rest)| rest.trim());
    (!version.is_empty()).then_some(version)
}
