//! `ServiceManager` backed by `systemctl`.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::{ServiceAction, ServiceState};

const SYSTEMCTL: &str = "systemctl";

/// Drives systemd through the `systemctl` CLI.
pub struct SystemctlServiceManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemctlServiceManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn query(&self, verb: &str, unit: &str) -> Result<String> {
        // is-enabled / is-active exit non-zero for "disabled" and "inactive";
        // the answer is on stdout either way.
        let output = self.runner.run(SYSTEMCTL, &[verb, unit]).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl<R: CommandRunner> ServiceManager for SystemctlServiceManager<R> {
    async fn apply(&self, action: ServiceAction, unit: &str) -> Result<Output> {
        if action.takes_unit() {
            self.runner.run(SYSTEMCTL, &[action.verb(), unit]).await
        } else {
            self.runner.run(SYSTEMCTL, &[action.verb()]).await
        }
    }

    async fn state(&self, unit: &str) -> Result<ServiceState> {
        let enabled = self.query("is-enabled", unit).await?;
        let active = self.query("is-active", unit).await?;
        Ok(ServiceState::from_queries(&enabled, &active))
    }
}
