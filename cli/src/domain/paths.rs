//! Installation layout and the ordered copy plan.
//!
//! Pure path arithmetic: no filesystem access.

use std::path::{Path, PathBuf};

use crate::domain::mode::InvocationMode;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Where the fetcher unpacks the release bundle.
pub const STAGING_DIR: &str = "/tmp/log_simulator";
/// Agent script inside the bundle.
pub const AGENT_FILE: &str = "log_simulator.py";
/// Agent configuration inside the bundle.
pub const CONFIG_FILE: &str = "config.ini";
/// systemd unit inside the bundle. Also the unit name.
pub const UNIT_FILE: &str = "log_simulator.service";
/// Agent installation directory, relative to the host root.
pub const AGENT_DEST_DIR: &str = "opt/log_simulator";
/// systemd unit directory, relative to the host root.
pub const UNIT_DEST_DIR: &str = "etc/systemd/system";
/// Advisory lock serialising installer runs on one host.
pub const LOCK_FILE: &str = "/run/log_simulator-install.lock";

const AGENT_MODE: u32 = 0o755;
const DATA_MODE: u32 = 0o644;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Source and destination locations for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationPaths {
    pub agent_source: PathBuf,
    pub config_source: PathBuf,
    pub unit_source: PathBuf,
    pub agent_dest_dir: PathBuf,
    pub unit_dest_dir: PathBuf,
}

impl Default for InstallationPaths {
    fn default() -> Self {
        Self::under(Path::new(STAGING_DIR), Path::new("/"))
    }
}

impl InstallationPaths {
    /// The standard layout with destinations rooted at `root`.
    #[must_use]
    pub fn under(staging: &Path, root: &Path) -> Self {
        Self {
            agent_source: staging.join(AGENT_FILE),
            config_source: staging.join(CONFIG_FILE),
            unit_source: staging.join(UNIT_FILE),
            agent_dest_dir: root.join(AGENT_DEST_DIR),
            unit_dest_dir: root.join(UNIT_DEST_DIR),
        }
    }

    #[must_use]
    pub fn agent_dest(&self) -> PathBuf {
        self.agent_dest_dir.join(file_name(&self.agent_source))
    }

    #[must_use]
    pub fn config_dest(&self) -> PathBuf {
        self.agent_dest_dir.join(file_name(&self.config_source))
    }

    #[must_use]
    pub fn unit_dest(&self) -> PathBuf {
        self.unit_dest_dir.join(file_name(&self.unit_source))
    }

    /// Name systemd knows the unit by: the unit file's name.
    #[must_use]
    pub fn unit_name(&self) -> String {
        file_name(&self.unit_source).to_string_lossy().into_owned()
    }
}

fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

/// One file to place on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopyTask {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Unix permission bits applied after the copy.
    pub mode: u32,
}

/// Ordered copy list for `mode`: agent, config, then unit for service installs.
///
/// Uninstall and help stage nothing.
#[must_use]
pub fn copy_plan(paths: &InstallationPaths, mode: InvocationMode) -> Vec<FileCopyTask> {
    if !mode.installs() {
        return Vec::new();
    }

    let mut tasks = vec![
        FileCopyTask {
            source: paths.agent_source.clone(),
            dest: paths.agent_dest(),
            mode: AGENT_MODE,
        },
        FileCopyTask {
            source: paths.config_source.clone(),
            dest: paths.config_dest(),
            mode: DATA_MODE,
        },
    ];
    if mode.registers_service() {
        tasks.push(FileCopyTask {
            source: paths.unit_source.clone(),
            dest: paths.unit_dest(),
            mode: DATA_MODE,
        });
    }
    tasks
}
