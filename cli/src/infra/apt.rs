//! `PackageManager` backed by `apt-get`, and the python3 `RuntimeProbe`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, PackageManager, RuntimeProbe};
use crate::domain::prerequisite::version_from_banner;

const APT_GET: &str = "apt-get";
const PYTHON: &str = "python3";

/// Debian/Ubuntu package installation through `apt-get`.
pub struct AptPackageManager<R: CommandRunner> {
    runner: R,
    /// Index refreshes and installs download packages; they get a longer limit.
    timeout: Duration,
}

impl<R: CommandRunner> AptPackageManager<R> {
    pub fn new(runner: R, timeout: Duration) -> Self {
        Self { runner, timeout }
    }
}

impl<R: CommandRunner> PackageManager for AptPackageManager<R> {
    fn tool(&self) -> &str {
        APT_GET
    }

    fn is_available(&self) -> bool {
        which::which(APT_GET).is_ok()
    }

    async fn refresh_index(&self) -> Result<Output> {
        self.runner
            .run_with_timeout(APT_GET, &["-q", "update"], self.timeout)
            .await
    }

    async fn install(&self, packages: &[&str]) -> Result<Output> {
        let mut args = vec!["-q", "-y", "install"];
        args.extend_from_slice(packages);
        self.runner
            .run_with_timeout(APT_GET, &args, self.timeout)
            .await
    }
}

/// Probes the installed Python 3 interpreter with `python3 --version`.
pub struct PythonRuntime<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> PythonRuntime<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> RuntimeProbe for PythonRuntime<R> {
    async fn installed_version(&self) -> Result<Option<String>> {
        if which::which(PYTHON).is_err() {
            return Ok(None);
        }
        let output = self.runner.run(PYTHON, &["--version"]).await?;
        if !output.status.success() {
            return Ok(None);
        }
        // Python < 3.4 printed the banner on stderr.
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        Ok(version_from_banner(&banner).map(str::to_string))
    }
}
