//! Host identity and run serialisation: `PrivilegeProbe` and `RunLock`.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::application::ports::{PrivilegeProbe, RunLock};
use crate::domain::InstallError;

/// Reads the effective uid from the ownership of `/proc/self`.
pub struct ProcPrivilegeProbe;

impl PrivilegeProbe for ProcPrivilegeProbe {
    fn is_elevated(&self) -> Result<bool> {
        let uid = std::fs::metadata("/proc/self")
            .context("reading /proc/self")?
            .uid();
        tracing::debug!(uid, "effective uid");
        Ok(uid == 0)
    }
}

/// Exclusive advisory lock on a well-known file.
pub struct FileRunLock {
    path: PathBuf,
}

impl FileRunLock {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Holds the lock until dropped.
#[derive(Debug)]
pub struct RunLockGuard {
    file: File,
}

impl Drop for RunLockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl RunLock for FileRunLock {
    type Guard = RunLockGuard;

    fn acquire(&self) -> Result<RunLockGuard> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("opening lock file {}", self.path.display()))?;
        if file.try_lock_exclusive().is_err() {
            return Err(InstallError::Lock {
                path: self.path.clone(),
            }
            .into());
        }
        tracing::debug!(path = %self.path.display(), "run lock acquired");
        Ok(RunLockGuard { file })
    }
}
