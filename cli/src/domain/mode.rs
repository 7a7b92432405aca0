//! Resolved invocation mode.
//!
//! Built once from the parsed command line and passed by value into the
//! orchestrator. Nothing else in the crate reads the raw arguments.

/// What a single run of the installer is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Stage the agent and its config; leave the service manager alone.
    Install,
    /// Stage files, then reload, start and enable the unit.
    InstallAsService,
    /// Tear down the unit (if registered) and remove the agent directory.
    Uninstall,
    /// Print usage and exit non-zero.
    Help,
}

impl InvocationMode {
    /// Returns `true` for the modes that stage files.
    #[must_use]
    pub fn installs(self) -> bool {
        matches!(self, Self::Install | Self::InstallAsService)
    }

    /// Returns `true` when the unit must be staged and activated.
    #[must_use]
    pub fn registers_service(self) -> bool {
        self == Self::InstallAsService
    }
}

/// The immutable result of argument resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub mode: InvocationMode,
    /// Never block on operator input (`-s`).
    pub unattended: bool,
}

impl Invocation {
    #[must_use]
    pub fn new(mode: InvocationMode, unattended: bool) -> Self {
        Self { mode, unattended }
    }
}
