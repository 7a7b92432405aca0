//! Service-manager vocabulary: the transitions we issue and the states we observe.

use std::fmt;

/// A single imperative call against the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    /// Re-read unit definitions from disk.
    Reload,
    Start,
    Stop,
    /// Enable the unit at boot.
    Enable,
    /// Disable the unit at boot.
    Disable,
}

impl ServiceAction {
    /// The `systemctl` verb for this action.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Reload => "daemon-reload",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    /// `daemon-reload` is global; every other verb targets a unit.
    #[must_use]
    pub fn takes_unit(self) -> bool {
        self != Self::Reload
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Activation sequence for a freshly staged unit.
pub const ACTIVATE: [ServiceAction; 3] = [
    ServiceAction::Reload,
    ServiceAction::Start,
    ServiceAction::Enable,
];

/// Deactivation sequence, run before the unit file is removed.
pub const DEACTIVATE: [ServiceAction; 2] = [ServiceAction::Stop, ServiceAction::Disable];

/// The service manager's view of the unit, as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    NotRegistered,
    RegisteredStopped,
    RegisteredRunning,
    /// Enabled at boot and currently active.
    RegisteredEnabled,
    /// Enabled at boot but not active, e.g. it exited or failed after start.
    EnabledNotRunning,
}

impl ServiceState {
    /// Derive the state from `systemctl is-enabled` / `is-active` answers.
    ///
    /// `enabled` and `active` are the trimmed stdout of each query.
    #[must_use]
    pub fn from_queries(enabled: &str, active: &str) -> Self {
        match (enabled, active) {
            ("enabled" | "enabled-runtime", "active" | "reloading" | "activating") => {
                Self::RegisteredEnabled
            }
            ("enabled" | "enabled-runtime", _) => Self::EnabledNotRunning,
            (_, "active" | "reloading" | "activating") => Self::RegisteredRunning,
            ("" | "not-found", _) => Self::NotRegistered,
            _ => Self::RegisteredStopped,
        }
    }

    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::NotRegistered => "not registered",
            Self::RegisteredStopped => "registered, stopped",
            Self::RegisteredRunning => "running",
            Self::RegisteredEnabled => "running, enabled at boot",
            Self::EnabledNotRunning => "enabled at boot, not running",
        }
    }

    /// Whether the unit was active when observed.
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::RegisteredRunning | Self::RegisteredEnabled)
    }
}
